//! TOML configuration source with one-time external breakdown.
//!
//! Loads a domain from either of two on-disk shapes:
//!
//! # External (single file, one-time-use)
//!
//! ```toml
//! [domain]
//! name    = "Shop"
//! package = "app.shop"
//!
//! [[entities]]
//! name = "User"
//!
//! [[entities.fields]]
//! name = "email"
//! type = "email"
//! ```
//!
//! # Co-located (per-domain directory, persistent)
//!
//! ```text
//! shop/
//! ├── domain.toml              ← [domain] + [generation]
//! ├── entities/
//! │   ├── order.toml           ← one entity per file
//! │   └── user.toml
//! ├── entity/
//! │   └── context.toml         ← optional layer fragment
//! ├── data_access/
//! ├── business_logic/
//! └── interface/
//! ```
//!
//! On first encountering an external file `shop.toml` under `LoadMode::
//! Persist`, the loader performs a **breakdown**: it writes the sibling
//! `shop/` tree above and the external file is never re-read once that
//! tree exists. `LoadMode::ReadOnly` (used by `validate`) never writes.
//!
//! Layer fragments (`<layer>/context.toml`) are free-form TOML tables,
//! surfaced as JSON values for the merger.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use layergen_core::{
    application::{
        ApplicationError,
        ports::{ConfigSource, LoadMode, LoadedDomain},
    },
    domain::{DomainConfiguration, DomainError, EntityConfiguration, Layer, naming},
    error::{Context as _, EngineError, EngineResult},
};

const DOMAIN_FILE: &str = "domain.toml";
const ENTITIES_DIR: &str = "entities";
const FRAGMENT_FILE: &str = "context.toml";

/// Production configuration source reading TOML from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlConfigSource;

impl TomlConfigSource {
    /// Create a new TOML configuration source.
    pub fn new() -> Self {
        Self
    }
}

/// The co-located root corresponding to an external file:
/// `domains/shop.toml` → `domains/shop/`.
pub fn colocated_root(external: &Path) -> PathBuf {
    let stem = external
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    external.with_file_name(stem)
}

/// The directory holding a domain's fragments, given either input shape.
/// Useful for wiring template overrides.
pub fn domain_dir(config_path: &Path) -> PathBuf {
    if config_path.is_dir() {
        config_path.to_path_buf()
    } else {
        colocated_root(config_path)
    }
}

impl ConfigSource for TomlConfigSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path, mode: LoadMode) -> EngineResult<LoadedDomain> {
        if path.is_dir() {
            return load_colocated(path);
        }

        if !path.is_file() {
            return Err(DomainError::ConfigurationNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        // Once the breakdown exists the external file is dead weight;
        // the co-located tree is authoritative.
        let root = colocated_root(path);
        if root.join(DOMAIN_FILE).is_file() {
            debug!(root = %root.display(), "co-located tree present, external file ignored");
            return load_colocated(&root);
        }

        let config = parse_external(path)?;

        if mode == LoadMode::Persist {
            break_down(&config, &root)?;
            info!(root = %root.display(), "external configuration broken down");
        }

        Ok(LoadedDomain {
            config,
            layer_fragments: BTreeMap::new(),
        })
    }
}

// ── External form ─────────────────────────────────────────────────────────────

fn parse_external(path: &Path) -> EngineResult<DomainConfiguration> {
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|e| load_failed(path, e))
}

/// Write the persistent co-located tree for an external configuration.
fn break_down(config: &DomainConfiguration, root: &Path) -> EngineResult<()> {
    let entities_dir = root.join(ENTITIES_DIR);
    fs::create_dir_all(&entities_dir).map_err(|e| fs_error(&entities_dir, e))?;

    let domain_file = DomainFile {
        domain: config.domain.clone(),
        generation: config.generation.clone(),
    };
    write_toml(&root.join(DOMAIN_FILE), &domain_file)?;

    for entity in &config.entities {
        let name = format!("{}.toml", naming::to_snake_case(&entity.name));
        write_toml(&entities_dir.join(name), entity)?;
    }

    for layer in Layer::ALL {
        let dir = root.join(layer.as_str());
        fs::create_dir_all(&dir).map_err(|e| fs_error(&dir, e))?;
    }

    Ok(())
}

/// Shape of `domain.toml` inside a co-located tree.
#[derive(Debug, Serialize, serde::Deserialize)]
struct DomainFile {
    domain: layergen_core::domain::DomainSection,
    #[serde(default)]
    generation: layergen_core::domain::GenerationOptions,
}

// ── Co-located form ───────────────────────────────────────────────────────────

fn load_colocated(root: &Path) -> EngineResult<LoadedDomain> {
    let domain_path = root.join(DOMAIN_FILE);
    if !domain_path.is_file() {
        return Err(DomainError::ConfigurationNotFound {
            path: domain_path.display().to_string(),
        }
        .into());
    }

    let domain_file: DomainFile =
        toml::from_str(&read_text(&domain_path)?).map_err(|e| load_failed(&domain_path, e))?;

    let mut entities = Vec::new();
    let entities_dir = root.join(ENTITIES_DIR);
    if entities_dir.is_dir() {
        for path in sorted_toml_files(&entities_dir)? {
            let entity: EntityConfiguration =
                toml::from_str(&read_text(&path)?).map_err(|e| load_failed(&path, e))?;
            entities.push(entity);
        }
    }

    let mut layer_fragments = BTreeMap::new();
    for layer in Layer::ALL {
        let fragment_path = root.join(layer.as_str()).join(FRAGMENT_FILE);
        if fragment_path.is_file() {
            let table: toml::Value =
                toml::from_str(&read_text(&fragment_path)?)
                    .map_err(|e| load_failed(&fragment_path, e))?;
            let json = serde_json::to_value(table).context("fragment conversion failed")?;
            layer_fragments.insert(layer, json);
        }
    }

    debug!(
        entities = entities.len(),
        fragments = layer_fragments.len(),
        "co-located domain loaded"
    );

    Ok(LoadedDomain {
        config: DomainConfiguration {
            domain: domain_file.domain,
            entities,
            generation: domain_file.generation,
        },
        layer_fragments,
    })
}

fn sorted_toml_files(dir: &Path) -> EngineResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| fs_error(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    Ok(paths)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_text(path: &Path) -> EngineResult<String> {
    fs::read_to_string(path).map_err(|e| fs_error(path, e))
}

/// Serialize through JSON first so absent `Option` fields are dropped
/// instead of tripping TOML's lack of a null value.
fn write_toml<T: Serialize>(path: &Path, value: &T) -> EngineResult<()> {
    let json = serde_json::to_value(value).context("serialization failed")?;
    let toml_value =
        toml::Value::try_from(strip_nulls(json)).context("TOML conversion failed")?;
    let text = toml::to_string_pretty(&toml_value).context("TOML serialization failed")?;
    fs::write(path, text).map_err(|e| fs_error(path, e))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

fn load_failed(path: &Path, e: impl std::fmt::Display) -> EngineError {
    ApplicationError::ConfigLoadFailed {
        reason: format!("{}: {}", path.display(), e),
    }
    .into()
}

fn fs_error(path: &Path, e: std::io::Error) -> EngineError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXTERNAL: &str = r#"
[domain]
name = "Shop"
package = "app.shop"

[[entities]]
name = "User"

[[entities.fields]]
name = "email"
type = "email"
required = true

[[entities]]
name = "Order"

[[entities.fields]]
name = "total"
type = "float"

[[entities.relationships]]
entity = "User"
type = "many_to_one"
back_populates = "orders"
foreign_key = "users.id"
"#;

    fn write_external(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("shop.toml");
        fs::write(&path, EXTERNAL).unwrap();
        path
    }

    #[test]
    fn external_file_parses() {
        let dir = TempDir::new().unwrap();
        let path = write_external(&dir);

        let loaded = TomlConfigSource::new()
            .load(&path, LoadMode::ReadOnly)
            .unwrap();
        assert_eq!(loaded.config.domain.name, "Shop");
        assert_eq!(loaded.config.entities.len(), 2);
        assert!(loaded.layer_fragments.is_empty());
    }

    #[test]
    fn read_only_mode_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_external(&dir);

        TomlConfigSource::new()
            .load(&path, LoadMode::ReadOnly)
            .unwrap();
        assert!(!dir.path().join("shop").exists());
    }

    #[test]
    fn persist_mode_breaks_down_once() {
        let dir = TempDir::new().unwrap();
        let path = write_external(&dir);
        let source = TomlConfigSource::new();

        source.load(&path, LoadMode::Persist).unwrap();

        let root = dir.path().join("shop");
        assert!(root.join("domain.toml").is_file());
        assert!(root.join("entities/user.toml").is_file());
        assert!(root.join("entities/order.toml").is_file());
        for layer in Layer::ALL {
            assert!(root.join(layer.as_str()).is_dir());
        }

        // The external file must not be consulted again.
        fs::write(&path, "not even toml").unwrap();
        let reloaded = source.load(&path, LoadMode::Persist).unwrap();
        assert_eq!(reloaded.config.domain.name, "Shop");
        assert_eq!(reloaded.config.entities.len(), 2);
    }

    #[test]
    fn breakdown_round_trips_the_configuration() {
        let dir = TempDir::new().unwrap();
        let path = write_external(&dir);
        let source = TomlConfigSource::new();

        let first = source.load(&path, LoadMode::Persist).unwrap();
        let second = source.load(&path, LoadMode::Persist).unwrap();

        assert_eq!(first.config.domain, second.config.domain);
        assert_eq!(first.config.generation, second.config.generation);
        // Entity files load in name order.
        let mut expected = first.config.entities.clone();
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(second.config.entities, expected);
    }

    #[test]
    fn layer_fragments_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = write_external(&dir);
        let source = TomlConfigSource::new();
        source.load(&path, LoadMode::Persist).unwrap();

        let fragment = dir.path().join("shop/business_logic/context.toml");
        fs::write(&fragment, "cache_ttl = 300\n[service]\nretries = 3\n").unwrap();

        let loaded = source.load(&path, LoadMode::Persist).unwrap();
        let value = &loaded.layer_fragments[&Layer::BusinessLogic];
        assert_eq!(value["cache_ttl"], serde_json::json!(300));
        assert_eq!(value["service"]["retries"], serde_json::json!(3));
        assert!(!loaded.layer_fragments.contains_key(&Layer::Entity));
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = TomlConfigSource::new()
            .load(Path::new("/nonexistent/shop.toml"), LoadMode::ReadOnly)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Domain(DomainError::ConfigurationNotFound { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.toml");
        fs::write(&path, "[domain]\nname = \"Shop\"\ntypo_key = 1\n").unwrap();

        let err = TomlConfigSource::new()
            .load(&path, LoadMode::ReadOnly)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Application(ApplicationError::ConfigLoadFailed { .. })
        ));
    }
}
