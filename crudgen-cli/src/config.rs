//! Configuration management for crudgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, `__` for nesting)
//! 2. A file passed with `--config`
//! 3. `<project root>/crudgen.toml`
//! 4. Hardcoded defaults (fallback, laid out like a Laravel application)
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! [paths]
//! models_dir = "app/Models"
//! controllers_dir = "app/Http/Controllers"
//! views_dir = "resources/views"
//! routes_dir = "routes"
//! stubs_dir = "resources/stubs"
//!
//! [extensions]
//! source = "php"
//! view = "blade.php"
//! stub = "stub"
//!
//! [generator]
//! strict_types = false
//! embedded_fallback = true
//! ```

use crate::error::{Result, ScaffoldError};
use crate::scaffold::ProjectLayout;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// Output and stub directories, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory for generated models
    pub models_dir: PathBuf,
    /// Directory for generated controllers
    pub controllers_dir: PathBuf,
    /// Directory holding one sub-directory of views per resource
    pub views_dir: PathBuf,
    /// Directory holding the `web` route file
    pub routes_dir: PathBuf,
    /// Directory searched for project stubs
    pub stubs_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("app/Models"),
            controllers_dir: PathBuf::from("app/Http/Controllers"),
            views_dir: PathBuf::from("resources/views"),
            routes_dir: PathBuf::from("routes"),
            stubs_dir: PathBuf::from("resources/stubs"),
        }
    }
}

/// File extensions, without the leading dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSettings {
    /// Models, controllers and the route file
    pub source: String,
    /// View templates
    pub view: String,
    /// Stub files
    pub stub: String,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            source: "php".to_string(),
            view: "blade.php".to_string(),
            stub: "stub".to_string(),
        }
    }
}

/// Generator behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Reject field types outside the known set
    pub strict_types: bool,
    /// Fall back to the built-in stubs when the stub directory lacks one
    pub embedded_fallback: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            strict_types: false,
            embedded_fallback: true,
        }
    }
}

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudgenConfig {
    /// Directory settings
    #[serde(default)]
    pub paths: PathSettings,

    /// Extension settings
    #[serde(default)]
    pub extensions: ExtensionSettings,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorSettings,
}

impl CrudgenConfig {
    /// Load configuration for a project
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if:
    /// - `explicit` is given but does not exist
    /// - a configuration file contains invalid TOML
    /// - a value has the wrong type
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Self::base_figment(project_root)?;

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ScaffoldError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CRUDGEN_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// Load configuration without consulting the environment
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if `crudgen.toml` is invalid.
    pub fn load_project(project_root: &Path) -> Result<Self> {
        Ok(Self::base_figment(project_root)?.extract()?)
    }

    fn base_figment(project_root: &Path) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let local_config = project_root.join(CONFIG_FILE_NAME);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Ok(figment)
    }

    /// Resolve output locations under `project_root`
    #[must_use]
    pub fn layout(&self, project_root: &Path) -> ProjectLayout {
        ProjectLayout::new(project_root, &self.paths, &self.extensions)
    }
}
