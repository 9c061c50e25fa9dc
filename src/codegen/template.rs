//! Handlebars-backed renderer for C++ component headers.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use super::{Render, RenderError, RenderUnit};
use crate::dsl::{Comp, CompField};
use crate::error::Error;

/// The built-in header template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/comp.hh.hbs");

const TEMPLATE_NAME: &str = "comp.hh";

/// Data handed to the template.
#[derive(Serialize)]
struct TemplateData<'a> {
    source: String,
    namespace: &'a str,
    includes: &'a [String],
    comps: Vec<CompData<'a>>,
}

#[derive(Serialize)]
struct CompData<'a> {
    name: &'a str,
    descr: &'a str,
    fields: &'a [CompField],
    /// Fields with a `CompField::Type` entry, in declaration order.
    reflected: Vec<ReflectedField<'a>>,
}

#[derive(Serialize)]
struct ReflectedField<'a> {
    name: &'a str,
    meta_type: &'static str,
    descr: &'a str,
}

impl<'a> From<&'a Comp> for CompData<'a> {
    fn from(comp: &'a Comp) -> Self {
        let reflected = comp
            .fields
            .iter()
            .filter_map(|field| {
                field.ty.meta_type().map(|meta_type| ReflectedField {
                    name: &field.name,
                    meta_type,
                    descr: &field.descr,
                })
            })
            .collect();
        Self {
            name: &comp.name,
            descr: &comp.descr,
            fields: &comp.fields,
            reflected,
        }
    }
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    namespace: String,
    includes: Vec<String>,
}

impl HandlebarsRenderer {
    /// A renderer using the built-in template.
    pub fn new() -> Result<Self, Error> {
        Self::with_template("<built-in>", DEFAULT_TEMPLATE)
    }

    /// A renderer using the template text `source`; `name` is used in errors.
    pub fn with_template(name: &str, source: &str) -> Result<Self, Error> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| Error::Template {
                name: name.to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            registry,
            namespace: "Ares".to_string(),
            includes: Vec::new(),
        })
    }

    /// A renderer using the template file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(Error::io(path))?;
        Self::with_template(&path.display().to_string(), &source)
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn includes(mut self, includes: Vec<String>) -> Self {
        self.includes = includes;
        self
    }
}

impl Render for HandlebarsRenderer {
    fn render(&self, unit: RenderUnit<'_>) -> Result<String, RenderError> {
        let data = TemplateData {
            source: unit.source.display().to_string(),
            namespace: &self.namespace,
            includes: &self.includes,
            comps: unit.comps.iter().map(CompData::from).collect(),
        };
        Ok(self.registry.render(TEMPLATE_NAME, &data)?)
    }
}
