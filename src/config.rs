//! Generator configuration — loads an optional `compgen.yaml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// File name looked up in the input directory when no config path is given.
pub const CONFIG_FILE_NAME: &str = "compgen.yaml";

/// Settings for a generator run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension of schema sources, without the dot.
    pub input_ext: String,
    /// Extension of generated headers, without the dot.
    pub output_ext: String,
    /// Handlebars template replacing the built-in one. Relative paths
    /// resolve against the directory of the config file.
    pub template: Option<PathBuf>,
    /// C++ namespace the generated code lives in.
    pub namespace: String,
    /// Extra headers to include in every generated file.
    pub include: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_ext: "comp".to_string(),
            output_ext: "hh".to_string(),
            template: None,
            namespace: "Ares".to_string(),
            include: Vec::new(),
        }
    }
}

/// Load a config file. The file must exist.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let content = std::fs::read_to_string(path).map_err(Error::io(path))?;
    let mut config: Config = serde_yaml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = path.parent() {
        config.template = config
            .template
            .map(|t| if t.is_relative() { dir.join(t) } else { t });
    }
    Ok(config)
}

/// Load a config file, falling back to defaults if it doesn't exist.
pub fn load_config_or_default(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config(path)
}
