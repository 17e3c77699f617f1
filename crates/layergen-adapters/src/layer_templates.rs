//! Built-in layer templates.
//!
//! Ships one template per layer, targeting a Python-style layered web
//! application (SQLAlchemy models, repository/service classes, FastAPI
//! routers). Each body carries default marker blocks so hand-written code
//! survives regeneration, and each output path is itself a substitution
//! expression rendered against the same context as the body.
//!
//! # Overrides
//!
//! A domain's co-located tree may replace a built-in body by providing
//! `<layer dir>/template.py.tpl`, e.g. `shop/interface/template.py.tpl`.
//! The output path stays the built-in one.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use layergen_core::{
    application::{
        ApplicationError,
        ports::{LayerTemplate, TemplateSet},
    },
    domain::Layer,
    error::EngineResult,
};

const OVERRIDE_FILE: &str = "template.py.tpl";

/// Template set backed by the built-in per-layer templates, with optional
/// per-domain body overrides.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTemplateSet {
    domain_dir: Option<PathBuf>,
}

impl BuiltinTemplateSet {
    /// Built-ins only, no override lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-ins plus override lookup under `domain_dir`.
    pub fn with_domain_dir(domain_dir: impl Into<PathBuf>) -> Self {
        Self {
            domain_dir: Some(domain_dir.into()),
        }
    }

    fn override_body(&self, layer: Layer) -> EngineResult<Option<String>> {
        let Some(dir) = &self.domain_dir else {
            return Ok(None);
        };
        let path = dir.join(layer.as_str()).join(OVERRIDE_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "using template override");
        let body = fs::read_to_string(&path).map_err(|e| ApplicationError::FilesystemError {
            path,
            reason: e.to_string(),
        })?;
        Ok(Some(body))
    }
}

impl TemplateSet for BuiltinTemplateSet {
    fn templates_for(&self, layer: Layer) -> EngineResult<Vec<LayerTemplate>> {
        let (id, output_path, body) = match layer {
            Layer::Entity => ("entity/model", MODEL_PATH, MODEL_BODY),
            Layer::DataAccess => ("data_access/repository", REPOSITORY_PATH, REPOSITORY_BODY),
            Layer::BusinessLogic => ("business_logic/service", SERVICE_PATH, SERVICE_BODY),
            Layer::Interface => ("interface/router", ROUTER_PATH, ROUTER_BODY),
        };

        let body = match self.override_body(layer)? {
            Some(custom) => custom,
            None => body.to_string(),
        };

        Ok(vec![LayerTemplate {
            id: id.to_string(),
            body,
            output_path: output_path.to_string(),
        }])
    }
}

// ── Entity layer ──────────────────────────────────────────────────────────────

const MODEL_PATH: &str = "{{ domain.name_snake }}/models/{{ entity.name_snake }}.py";

const MODEL_BODY: &str = r#""""{{ entity.name }} model."""

from sqlalchemy import ARRAY, Boolean, Column, DateTime, Float, ForeignKey, Integer, String, Text
from sqlalchemy.dialects.postgresql import UUID
from sqlalchemy.orm import relationship

from {{ domain.package }}.database import Base


class {{ entity.name }}(Base):
    __tablename__ = "{{ entity.table_name }}"

    id = Column(Integer, primary_key=True, autoincrement=True)
{{ entity.field_declarations }}
{{ entity.relationship_declarations }}
    # BEGIN:custom_fields
    # END:custom_fields

    def __repr__(self) -> str:
        return f"<{{ entity.name }} id={self.id}>"

    # BEGIN:custom_methods
    # END:custom_methods
"#;

// ── Data-access layer ─────────────────────────────────────────────────────────

const REPOSITORY_PATH: &str =
    "{{ domain.name_snake }}/repositories/{{ entity.name_snake }}_repository.py";

const REPOSITORY_BODY: &str = r#""""Data access for {{ entity.name }}."""

from sqlalchemy.orm import Session

from {{ domain.package }}.models.{{ entity.name_snake }} import {{ entity.name }}


class {{ entity.name }}Repository:
    def __init__(self, session: Session) -> None:
        self.session = session

    def get(self, {{ entity.name_snake }}_id: int) -> {{ entity.name }} | None:
        return self.session.get({{ entity.name }}, {{ entity.name_snake }}_id)

    def list_all(self) -> list[{{ entity.name }}]:
        return self.session.query({{ entity.name }}).all()

    def add(self, {{ entity.name_snake }}: {{ entity.name }}) -> {{ entity.name }}:
        self.session.add({{ entity.name_snake }})
        self.session.flush()
        return {{ entity.name_snake }}

    def delete(self, {{ entity.name_snake }}: {{ entity.name }}) -> None:
        self.session.delete({{ entity.name_snake }})

    # BEGIN:custom_queries
    # END:custom_queries
"#;

// ── Business-logic layer ──────────────────────────────────────────────────────

const SERVICE_PATH: &str = "{{ domain.name_snake }}/services/{{ entity.name_snake }}_service.py";

const SERVICE_BODY: &str = r#""""Business logic for {{ entity.name }}."""

from sqlalchemy.orm import Session

from {{ domain.package }}.models.{{ entity.name_snake }} import {{ entity.name }}
from {{ domain.package }}.repositories.{{ entity.name_snake }}_repository import {{ entity.name }}Repository


class {{ entity.name }}NotFound(Exception):
    pass


class {{ entity.name }}Service:
    def __init__(self, session: Session) -> None:
        self.session = session
        self.repository = {{ entity.name }}Repository(session)

    def get_{{ entity.name_snake }}(self, {{ entity.name_snake }}_id: int) -> {{ entity.name }}:
        {{ entity.name_snake }} = self.repository.get({{ entity.name_snake }}_id)
        if {{ entity.name_snake }} is None:
            raise {{ entity.name }}NotFound({{ entity.name_snake }}_id)
        return {{ entity.name_snake }}

    def list_{{ entity.name_plural }}(self) -> list[{{ entity.name }}]:
        return self.repository.list_all()

    def create_{{ entity.name_snake }}(self, **attrs) -> {{ entity.name }}:
        {{ entity.name_snake }} = {{ entity.name }}(**attrs)
        self.repository.add({{ entity.name_snake }})
        self.session.commit()
        return {{ entity.name_snake }}

    # BEGIN:custom_logic
    # END:custom_logic
"#;

// ── Interface layer ───────────────────────────────────────────────────────────

const ROUTER_PATH: &str = "{{ domain.name_snake }}/api/{{ entity.name_snake }}_router.py";

const ROUTER_BODY: &str = r#""""API routes for {{ entity.name }}."""

from fastapi import APIRouter, Depends, HTTPException
from pydantic import BaseModel
from sqlalchemy.orm import Session

from {{ domain.package }}.database import get_session
from {{ domain.package }}.services.{{ entity.name_snake }}_service import (
    {{ entity.name }}NotFound,
    {{ entity.name }}Service,
)

router = APIRouter(prefix="/{{ entity.name_plural }}", tags=["{{ entity.name_plural }}"])


class {{ entity.name }}Schema(BaseModel):
    id: int
{{ entity.schema_field_declarations }}
    class Config:
        from_attributes = True


@router.get("/{{ '{' }}{{ entity.name_snake }}_id{{ '}' }}", response_model={{ entity.name }}Schema)
def get_{{ entity.name_snake }}({{ entity.name_snake }}_id: int, session: Session = Depends(get_session)):
    try:
        return {{ entity.name }}Service(session).get_{{ entity.name_snake }}({{ entity.name_snake }}_id)
    except {{ entity.name }}NotFound:
        raise HTTPException(status_code=404)


@router.get("/", response_model=list[{{ entity.name }}Schema])
def list_{{ entity.name_plural }}(session: Session = Depends(get_session)):
    return {{ entity.name }}Service(session).list_{{ entity.name_plural }}()

# BEGIN:custom_routes
# END:custom_routes
"#;
