//! CRUD scaffold command
//!
//! Generates the model, controller, list/create/edit views and route
//! registration for one resource.
//!
//! # Example
//!
//! ```bash
//! crudgen crud Post --fields='title:string|required,body:text,published:boolean'
//! ```
//!
//! Re-running the command for the same resource replaces the generated files
//! (after confirmation unless `--force` is given) and appends another route
//! line.

use anyhow::{bail, Context, Result};
use console::{style, Emoji, Term};
use dialoguer::Confirm;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

use crudgen_lib::config::CrudgenConfig;
use crudgen_lib::scaffold::{
    DirectoryStubs, FieldCollection, FileRouteSink, GeneratedArtifact, GenerationError,
    LayeredStubs, ProjectLayout, ScaffoldGenerator, TemplateHelpers, TypePolicy,
};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "+ ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");
static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Flags shared by every run of the command
#[derive(Debug, Clone, Default)]
pub struct CrudOptions {
    /// Project root
    pub root: PathBuf,
    /// Extra configuration file
    pub config: Option<PathBuf>,
    /// Reject unknown field types
    pub strict: bool,
    /// Overwrite existing files without asking
    pub force: bool,
    /// Show what would be written and stop
    pub dry_run: bool,
}

/// CRUD scaffold command
pub struct CrudCommand {
    /// Resource name (e.g., `Post`)
    name: String,
    /// Field specification (e.g., `title:string|required,body:text`)
    fields: Option<String>,
    options: CrudOptions,
    /// Whether the overwrite prompt can be shown
    interactive: bool,
}

impl CrudCommand {
    /// Create a new command
    ///
    /// The overwrite prompt is available when both stdin and stderr are
    /// terminals.
    #[must_use]
    pub fn new(name: String, fields: Option<String>, options: CrudOptions) -> Self {
        Self {
            name,
            fields,
            options,
            interactive: Term::stderr().is_term() && std::io::stdin().is_terminal(),
        }
    }

    /// Override terminal detection for the overwrite prompt
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Execute the scaffold command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The resource name or field specification is invalid
    /// - A stub cannot be found
    /// - A directory or file cannot be written
    pub fn execute(&self) -> Result<()> {
        println!(
            "\n{} {} {}",
            style("Scaffolding CRUD for").cyan().bold(),
            style(&self.name).green().bold(),
            style("...").cyan().bold()
        );

        let root = &self.options.root;
        let config = CrudgenConfig::load(root, self.options.config.as_deref())
            .context("Failed to load configuration")?;

        let policy = if self.options.strict || config.generator.strict_types {
            TypePolicy::Strict
        } else {
            TypePolicy::Permissive
        };
        let fields = FieldCollection::parse_with(self.fields.as_deref().unwrap_or_default(), policy)
            .context("Failed to parse --fields")?;
        info!(resource = %self.name, fields = fields.len(), "parsed field specification");

        let stubs = LayeredStubs::new(
            DirectoryStubs::new(root.join(&config.paths.stubs_dir), config.extensions.stub.as_str()),
            config.generator.embedded_fallback,
        );
        let generator = ScaffoldGenerator::new(
            self.name.clone(),
            fields,
            config.layout(root),
            Box::new(stubs),
        )
        .context("Failed to create scaffold generator")?;

        let artifacts = generator.render().context("Failed to render scaffold files")?;

        if self.options.dry_run {
            print_dry_run(&generator, &artifacts)?;
            return Ok(());
        }

        if !self.options.force
            && !confirm_overwrite(generator.layout(), &artifacts, self.interactive)?
        {
            bail!("Aborted: existing files were left untouched");
        }

        let mut routes = FileRouteSink::new(generator.layout().routes_path());
        match generator.commit(&artifacts, &mut routes) {
            Ok(report) => {
                println!(
                    "\n{} {} files:",
                    style("Generated").green().bold(),
                    report.written.len()
                );
                for (kind, path) in &report.written {
                    println!(
                        "  {CHECK}{} ({})",
                        style(generator.layout().relative(path).display()).dim(),
                        style(kind).dim()
                    );
                }
                println!(
                    "  {CHECK}{} {}",
                    style(report.route_line.trim()).dim(),
                    style(format!("→ {}", report.route_target)).dim()
                );
            }
            Err(GenerationError { written, source }) => {
                eprintln!(
                    "\n{} after writing {} of {} files:",
                    style("Generation stopped").red().bold(),
                    written.len(),
                    artifacts.len()
                );
                for (kind, path) in &written {
                    eprintln!(
                        "  {CHECK}{} ({kind})",
                        generator.layout().relative(path).display()
                    );
                }
                for artifact in artifacts.iter().skip(written.len()) {
                    eprintln!(
                        "  {CROSS}{} ({})",
                        generator.layout().relative(&artifact.path).display(),
                        artifact.kind
                    );
                }
                return Err(anyhow::Error::new(source).context("Failed to write scaffold files"));
            }
        }

        println!(
            "\n{SPARKLE}CRUD scaffold for {} is ready!",
            style(&self.name).green().bold()
        );

        let plural = TemplateHelpers::plural_lower(&self.name);
        println!("\n{}", style("Next steps:").cyan().bold());
        println!("  1. Create a migration for the {} table", style(&plural).yellow());
        println!("  2. Fill in the options of any generated <select> fields");
        println!(
            "  3. Grant the {} permissions to the roles that need them",
            style(format!("view/create/edit/delete-{plural}")).yellow()
        );

        Ok(())
    }
}

/// Ask before replacing existing files
///
/// Returns `true` when there is nothing to replace or the user agreed.
fn confirm_overwrite(
    layout: &ProjectLayout,
    artifacts: &[GeneratedArtifact],
    interactive: bool,
) -> Result<bool> {
    let existing: Vec<_> = artifacts.iter().filter(|a| a.path.exists()).collect();
    if existing.is_empty() {
        return Ok(true);
    }

    println!(
        "\n{} these files already exist and will be replaced:",
        style("Warning:").yellow().bold()
    );
    for artifact in &existing {
        println!("  - {}", layout.relative(&artifact.path).display());
    }

    if !interactive {
        bail!("Refusing to overwrite existing files without a terminal; pass --force to overwrite");
    }

    Confirm::new()
        .with_prompt("Overwrite them?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Print every artifact path and its diff against the file on disk
fn print_dry_run(generator: &ScaffoldGenerator, artifacts: &[GeneratedArtifact]) -> Result<()> {
    let layout = generator.layout();
    println!("\n{} nothing will be written", style("Dry run:").yellow().bold());

    for artifact in artifacts {
        let relative = layout.relative(&artifact.path);

        if !artifact.path.exists() {
            println!(
                "\n{} {} ({}, {} lines)",
                style("new").green().bold(),
                style(relative.display()).bold(),
                artifact.kind,
                artifact.content.lines().count()
            );
            continue;
        }

        let current = fs::read_to_string(&artifact.path)
            .with_context(|| format!("Failed to read {}", artifact.path.display()))?;
        if current == artifact.content {
            println!("\n{} {}", style("unchanged").dim(), relative.display());
            continue;
        }

        println!("\n{} {}", style("replace").yellow().bold(), style(relative.display()).bold());
        let diff = TextDiff::from_lines(&current, &artifact.content);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
                ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
                ChangeTag::Equal => {}
            }
        }
    }

    println!(
        "\n{} {} {}",
        style("append").cyan().bold(),
        style(generator.route_line().trim()).dim(),
        style(format!("→ {}", layout.relative(&layout.routes_path()).display())).dim()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn command(root: &Path, fields: &str, force: bool, dry_run: bool) -> CrudCommand {
        let options = CrudOptions {
            root: root.to_path_buf(),
            force,
            dry_run,
            ..CrudOptions::default()
        };
        CrudCommand::new("Post".to_string(), Some(fields.to_string()), options).interactive(false)
    }

    fn is_empty_dir(path: &Path) -> bool {
        fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn test_malformed_fields_leave_root_untouched() {
        let temp_dir = TempDir::new().unwrap();

        let err = command(temp_dir.path(), "title-string", false, false)
            .execute()
            .unwrap_err();

        assert!(err.to_string().contains("--fields"));
        assert!(is_empty_dir(temp_dir.path()));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();

        command(temp_dir.path(), "title:string|required", false, true)
            .execute()
            .unwrap();

        assert!(is_empty_dir(temp_dir.path()));
    }

    #[test]
    fn test_dry_run_leaves_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        command(temp_dir.path(), "title:string", false, false).execute().unwrap();
        let routes = temp_dir.path().join("routes/web.php");
        let before = fs::read_to_string(&routes).unwrap();

        command(temp_dir.path(), "title:string,body:text", false, true)
            .execute()
            .unwrap();

        assert_eq!(fs::read_to_string(&routes).unwrap(), before);
        let model = fs::read_to_string(temp_dir.path().join("app/Models/Post.php")).unwrap();
        assert!(model.contains("['title']"));
    }

    #[test]
    fn test_fresh_project_needs_no_prompt() {
        let temp_dir = TempDir::new().unwrap();

        command(temp_dir.path(), "title:string", false, false).execute().unwrap();

        assert!(temp_dir.path().join("app/Models/Post.php").exists());
        assert!(temp_dir.path().join("resources/views/posts/edit.blade.php").exists());
        let routes = fs::read_to_string(temp_dir.path().join("routes/web.php")).unwrap();
        assert_eq!(routes, "\nRoute::resource('posts', PostController::class);");
    }

    #[test]
    fn test_refuses_overwrite_without_terminal() {
        let temp_dir = TempDir::new().unwrap();
        let model = temp_dir.path().join("app/Models/Post.php");
        fs::create_dir_all(model.parent().unwrap()).unwrap();
        fs::write(&model, "hand edited").unwrap();

        let err = command(temp_dir.path(), "title:string", false, false)
            .execute()
            .unwrap_err();

        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&model).unwrap(), "hand edited");
        assert!(!temp_dir.path().join("routes").exists());
    }

    #[test]
    fn test_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let model = temp_dir.path().join("app/Models/Post.php");
        fs::create_dir_all(model.parent().unwrap()).unwrap();
        fs::write(&model, "hand edited").unwrap();

        command(temp_dir.path(), "title:string", true, false).execute().unwrap();

        assert!(fs::read_to_string(&model).unwrap().contains("class Post extends Model"));
        let routes = fs::read_to_string(temp_dir.path().join("routes/web.php")).unwrap();
        assert!(routes.contains("PostController::class"));
    }
}
