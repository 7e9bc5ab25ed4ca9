//! Where generated artifacts land inside a project

use super::helpers::TemplateHelpers;
use crate::config::{ExtensionSettings, PathSettings};
use std::path::{Path, PathBuf};

/// Absolute output locations for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    models_dir: PathBuf,
    controllers_dir: PathBuf,
    views_dir: PathBuf,
    routes_dir: PathBuf,
    source_ext: String,
    view_ext: String,
}

impl ProjectLayout {
    /// Resolve the configured directories against `root`
    #[must_use]
    pub fn new(root: &Path, paths: &PathSettings, extensions: &ExtensionSettings) -> Self {
        Self {
            root: root.to_path_buf(),
            models_dir: root.join(&paths.models_dir),
            controllers_dir: root.join(&paths.controllers_dir),
            views_dir: root.join(&paths.views_dir),
            routes_dir: root.join(&paths.routes_dir),
            source_ext: extensions.source.clone(),
            view_ext: extensions.view.clone(),
        }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<models-dir>/<Name>.<ext>`
    #[must_use]
    pub fn model_path(&self, model: &str) -> PathBuf {
        self.models_dir.join(format!("{model}.{}", self.source_ext))
    }

    /// `<controllers-dir>/<Name>Controller.<ext>`
    #[must_use]
    pub fn controller_path(&self, model: &str) -> PathBuf {
        self.controllers_dir.join(format!(
            "{}.{}",
            TemplateHelpers::controller_name(model),
            self.source_ext
        ))
    }

    /// `<views-dir>/<plural-lower>/`
    #[must_use]
    pub fn resource_views_dir(&self, model: &str) -> PathBuf {
        self.views_dir.join(TemplateHelpers::plural_lower(model))
    }

    /// `<views-dir>/<plural-lower>/<view>.<view-ext>`
    #[must_use]
    pub fn view_path(&self, model: &str, view: &str) -> PathBuf {
        self.resource_views_dir(model)
            .join(format!("{view}.{}", self.view_ext))
    }

    /// `<routes-dir>/web.<ext>`
    #[must_use]
    pub fn routes_path(&self) -> PathBuf {
        self.routes_dir.join(format!("web.{}", self.source_ext))
    }

    /// `path` relative to the project root, for display
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
