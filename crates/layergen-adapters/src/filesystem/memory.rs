//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use layergen_core::application::ports::Filesystem;
use layergen_core::error::EngineResult;

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating parent directories (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path, content.into());
    }

    /// All file paths currently held (testing helper).
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> EngineResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| layergen_core::application::ApplicationError::AdapterStateError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> EngineResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| layergen_core::application::ApplicationError::AdapterStateError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(layergen_core::application::ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> EngineResult<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| layergen_core::application::ApplicationError::AdapterStateError)?;
        Ok(inner.files.get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> EngineResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| layergen_core::application::ApplicationError::AdapterStateError)?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn list_files(&self, root: &Path) -> EngineResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| layergen_core::application::ApplicationError::AdapterStateError)?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("a")).unwrap();
        fs.write_file(Path::new("a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("a/b.txt")).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn list_files_is_prefix_scoped_and_sorted() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("shop/models/user.py", "");
        fs.seed_file("shop/api/user_router.py", "");
        fs.seed_file("other/x.py", "");

        let files = fs.list_files(Path::new("shop")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("shop/api/user_router.py"),
                PathBuf::from("shop/models/user.py"),
            ]
        );
    }

    #[test]
    fn remove_dir_all_removes_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("shop/models/user.py", "");
        fs.seed_file("billing/models/invoice.py", "");

        fs.remove_dir_all(Path::new("shop")).unwrap();
        assert!(!fs.exists(Path::new("shop/models/user.py")));
        assert!(fs.exists(Path::new("billing/models/invoice.py")));
    }
}
