//! Crate-level errors. Every variant carries the path it concerns.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::RenderError;
use crate::dsl::CompileError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input directory: {}", .0.display())]
    InvalidInputDir(PathBuf),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk input tree")]
    Walk(#[from] ignore::Error),

    #[error("{}:{error}", path.display())]
    Compile { path: PathBuf, error: CompileError },

    #[error("failed to render {}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("invalid template {name}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
