//! CRUD scaffold generator orchestrator
//!
//! This module coordinates the generation of all files for a CRUD resource:
//! - Model
//! - Controller
//! - List, create and edit views
//! - Route registration
//!
//! Generation happens in two phases. [`ScaffoldGenerator::render`] loads every
//! stub and builds every artifact in memory, so a missing stub aborts before
//! anything touches the disk. [`ScaffoldGenerator::commit`] then writes the
//! artifacts in order and appends the route line. Existing files are
//! overwritten without warning; callers decide whether to ask first.

use super::field_type::FieldCollection;
use super::helpers::TemplateHelpers;
use super::layout::ProjectLayout;
use super::markup::{compile_fields, compile_row_cells, RenderMode};
use super::routes::{route_line, RouteSink};
use super::stubs::{render, StubSource, Substitutions};
use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Data model
    Model,
    /// Request-handling controller
    Controller,
    /// List view
    IndexView,
    /// Create form view
    CreateView,
    /// Edit form view
    EditView,
}

impl ArtifactKind {
    /// All kinds, in generation order
    pub const ALL: [Self; 5] = [
        Self::Model,
        Self::Controller,
        Self::IndexView,
        Self::CreateView,
        Self::EditView,
    ];

    /// Stub rendered for this kind
    #[must_use]
    pub const fn stub_name(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Controller => "Controller",
            Self::IndexView => "views/index",
            Self::CreateView => "views/create",
            Self::EditView => "views/edit",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::IndexView => "list view",
            Self::CreateView => "create view",
            Self::EditView => "edit view",
        })
    }
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// What the file is
    pub kind: ArtifactKind,
    /// Absolute destination path
    pub path: PathBuf,
    /// File content
    pub content: String,
}

/// What a successful run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written, in order
    pub written: Vec<(ArtifactKind, PathBuf)>,
    /// Route line appended (including its leading newline)
    pub route_line: String,
    /// Where the route line went
    pub route_target: String,
}

/// A failed run, with the files written before the failure
#[derive(Debug, Error)]
#[error("generation stopped after writing {} files", .written.len())]
pub struct GenerationError {
    /// Files already on disk when the run stopped
    pub written: Vec<(ArtifactKind, PathBuf)>,
    /// What went wrong
    pub source: ScaffoldError,
}

impl From<ScaffoldError> for GenerationError {
    fn from(source: ScaffoldError) -> Self {
        Self {
            written: Vec::new(),
            source,
        }
    }
}

/// CRUD scaffold generator
pub struct ScaffoldGenerator {
    /// Model name (e.g., "Post", "`UserProfile`")
    model_name: String,
    /// Field definitions
    fields: FieldCollection,
    /// Output locations
    layout: ProjectLayout,
    /// Stub lookup
    stubs: Box<dyn StubSource>,
}

impl ScaffoldGenerator {
    /// Create a new scaffold generator
    ///
    /// # Arguments
    ///
    /// * `model_name` - Name of the resource (e.g., "Post")
    /// * `fields` - Parsed field definitions; may be empty
    /// * `layout` - Where artifacts are written
    /// * `stubs` - Where stubs are loaded from
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidResourceName`] if `model_name` is not
    /// usable as a class and file name.
    pub fn new(
        model_name: String,
        fields: FieldCollection,
        layout: ProjectLayout,
        stubs: Box<dyn StubSource>,
    ) -> Result<Self> {
        if !TemplateHelpers::is_valid_resource_name(&model_name) {
            return Err(ScaffoldError::InvalidResourceName(model_name));
        }

        Ok(Self {
            model_name,
            fields,
            layout,
            stubs,
        })
    }

    /// Resource name
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Output locations
    #[must_use]
    pub const fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Route line this resource registers
    #[must_use]
    pub fn route_line(&self) -> String {
        route_line(&self.model_name)
    }

    /// Render and write everything, then register the route
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] carrying [`ScaffoldError::StubNotFound`]
    /// (nothing written) or [`ScaffoldError::WriteFailure`] (with the files
    /// written before the failure).
    pub fn generate(&self, routes: &mut dyn RouteSink) -> std::result::Result<GenerationReport, GenerationError> {
        let artifacts = self.render()?;
        self.commit(&artifacts, routes)
    }

    /// Render every artifact in memory
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::StubNotFound`] for the first stub that
    /// cannot be loaded.
    pub fn render(&self) -> Result<Vec<GeneratedArtifact>> {
        ArtifactKind::ALL
            .into_iter()
            .map(|kind| self.render_artifact(kind))
            .collect()
    }

    /// Render a single artifact
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::StubNotFound`] if its stub cannot be loaded.
    pub fn render_artifact(&self, kind: ArtifactKind) -> Result<GeneratedArtifact> {
        let substitutions = self.substitutions(kind);
        let content = render(self.stubs.as_ref(), kind.stub_name(), &substitutions)?;
        let path = self.artifact_path(kind);

        debug!(%kind, path = %path.display(), bytes = content.len(), "rendered artifact");

        Ok(GeneratedArtifact {
            kind,
            path,
            content,
        })
    }

    /// Write rendered artifacts, then append the route line
    ///
    /// Directories are created as needed and existing files are replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] with [`ScaffoldError::WriteFailure`] and
    /// the files written so far.
    pub fn commit(
        &self,
        artifacts: &[GeneratedArtifact],
        routes: &mut dyn RouteSink,
    ) -> std::result::Result<GenerationReport, GenerationError> {
        let mut written = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            if let Err(source) = write_artifact(artifact) {
                return Err(GenerationError { written, source });
            }
            info!(kind = %artifact.kind, path = %artifact.path.display(), "wrote artifact");
            written.push((artifact.kind, artifact.path.clone()));
        }

        let line = self.route_line();
        if let Err(source) = routes.append(&line) {
            return Err(GenerationError { written, source });
        }
        info!(target_file = %routes.describe(), "registered resource route");

        Ok(GenerationReport {
            written,
            route_line: line,
            route_target: routes.describe(),
        })
    }

    fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Model => self.layout.model_path(&self.model_name),
            ArtifactKind::Controller => self.layout.controller_path(&self.model_name),
            ArtifactKind::IndexView => self.layout.view_path(&self.model_name, "index"),
            ArtifactKind::CreateView => self.layout.view_path(&self.model_name, "create"),
            ArtifactKind::EditView => self.layout.view_path(&self.model_name, "edit"),
        }
    }

    fn substitutions(&self, kind: ArtifactKind) -> Substitutions {
        let base = Substitutions::new()
            .with("modelName", self.model_name.as_str())
            .with("modelNamePluralLowerCase", TemplateHelpers::plural_lower(&self.model_name))
            .with("modelNameSingularLowerCase", TemplateHelpers::singular_lower(&self.model_name));

        match kind {
            ArtifactKind::Model => base.with("fillable", self.fillable()),
            ArtifactKind::Controller => base.with("validationRules", self.validation_rules()),
            ArtifactKind::IndexView => base
                .with("fields", compile_fields(&self.fields, RenderMode::List))
                .with("rowFields", compile_row_cells(&self.fields)),
            ArtifactKind::CreateView => {
                base.with("fields", compile_fields(&self.fields, RenderMode::CreateForm))
            }
            ArtifactKind::EditView => {
                base.with("fields", compile_fields(&self.fields, RenderMode::EditForm))
            }
        }
    }

    /// Quoted, comma-separated field names: `'title', 'body'`
    #[must_use]
    pub fn fillable(&self) -> String {
        self.fields
            .names()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One `'field' => 'rule|rule'` entry per field that has rules
    #[must_use]
    pub fn validation_rules(&self) -> String {
        self.fields
            .iter()
            .filter(|field| !field.validations.is_empty())
            .map(|field| format!("'{}' => '{}'", field.name, field.rule_string()))
            .collect::<Vec<_>>()
            .join(",\n            ")
    }
}

fn write_artifact(artifact: &GeneratedArtifact) -> Result<()> {
    if let Some(parent) = artifact.path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::write(parent, e))?;
    }

    fs::write(&artifact.path, &artifact.content)
        .map_err(|e| ScaffoldError::write(&artifact.path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrudgenConfig;
    use crate::scaffold::routes::MemoryRouteSink;
    use crate::scaffold::stubs::EmbeddedStubs;
    use tempfile::tempdir;

    fn generator(root: &std::path::Path, model: &str, fields: &str) -> ScaffoldGenerator {
        ScaffoldGenerator::new(
            model.to_string(),
            FieldCollection::parse(fields).unwrap(),
            CrudgenConfig::default().layout(root),
            Box::new(EmbeddedStubs),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_model_name() {
        let temp_dir = tempdir().unwrap();
        let result = ScaffoldGenerator::new(
            "../Post".to_string(),
            FieldCollection::default(),
            CrudgenConfig::default().layout(temp_dir.path()),
            Box::new(EmbeddedStubs),
        );
        assert!(matches!(result, Err(ScaffoldError::InvalidResourceName(_))));
    }

    #[test]
    fn test_fillable() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "title:string,body:text,featured:boolean");
        assert_eq!(generator.fillable(), "'title', 'body', 'featured'");
    }

    #[test]
    fn test_fillable_without_fields() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "");
        assert_eq!(generator.fillable(), "");
    }

    #[test]
    fn test_validation_rules_only_for_fields_with_rules() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(
            temp_dir.path(),
            "Post",
            "title:string|required&max:255,body:text,slug:string|unique:posts",
        );
        assert_eq!(
            generator.validation_rules(),
            "'title' => 'required|max:255',\n            'slug' => 'unique:posts'"
        );
    }

    #[test]
    fn test_render_all_artifacts() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "title:string|required");

        let artifacts = generator.render().unwrap();
        let kinds: Vec<_> = artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, ArtifactKind::ALL.to_vec());

        let model = &artifacts[0];
        assert!(model.path.ends_with("app/Models/Post.php"));
        assert!(model.content.contains("class Post extends Model"));
        assert!(model.content.contains("protected $fillable = ['title'];"));

        let controller = &artifacts[1];
        assert!(controller.path.ends_with("app/Http/Controllers/PostController.php"));
        assert!(controller.content.contains("'title' => 'required'"));
        assert!(controller.content.contains("$posts = Post::paginate(10);"));

        let index = &artifacts[2];
        assert!(index.path.ends_with("resources/views/posts/index.blade.php"));
        assert!(index.content.contains("<th>Title</th>"));
        assert!(index.content.contains("<td>{{ $item->title }}</td>"));

        assert!(artifacts[3].content.contains("{{ old('title') }}"));
        assert!(artifacts[4].content.contains("{{ $item->title }}"));

        // render touches nothing
        assert!(!temp_dir.path().join("app").exists());
    }

    #[test]
    fn test_generate_writes_and_registers_route() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "title:string");
        let mut routes = MemoryRouteSink::default();

        let report = generator.generate(&mut routes).unwrap();

        assert_eq!(report.written.len(), 5);
        for (_, path) in &report.written {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert_eq!(routes.lines, vec!["\nRoute::resource('posts', PostController::class);"]);
    }

    #[test]
    fn test_generate_overwrites_existing_files() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "title:string");
        let model_path = generator.layout().model_path("Post");
        fs::create_dir_all(model_path.parent().unwrap()).unwrap();
        fs::write(&model_path, "hand edited").unwrap();

        generator.generate(&mut MemoryRouteSink::default()).unwrap();

        assert!(fs::read_to_string(&model_path).unwrap().contains("class Post"));
    }

    #[test]
    fn test_commit_reports_partial_progress() {
        let temp_dir = tempdir().unwrap();
        let generator = generator(temp_dir.path(), "Post", "title:string");
        let artifacts = generator.render().unwrap();

        // A file where the controllers directory should be blocks the second write
        let controllers_dir = temp_dir.path().join("app/Http/Controllers");
        fs::create_dir_all(controllers_dir.parent().unwrap()).unwrap();
        fs::write(&controllers_dir, "not a directory").unwrap();

        let mut routes = MemoryRouteSink::default();
        let err = generator.commit(&artifacts, &mut routes).unwrap_err();

        assert!(matches!(err.source, ScaffoldError::WriteFailure { .. }));
        assert_eq!(err.to_string(), "generation stopped after writing 1 files");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert_ne!(cause, err.to_string());
        assert!(cause.contains("Controllers"));
        assert_eq!(err.written.len(), 1);
        assert_eq!(err.written[0].0, ArtifactKind::Model);
        assert!(routes.lines.is_empty());
    }
}
