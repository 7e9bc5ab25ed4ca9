//! Stub management commands
//!
//! - `publish` - Copy the built-in stubs into the project for customisation
//! - `list` - Show which stubs are customised
//! - `diff` - Show changes from the built-in stub

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crudgen_lib::config::CrudgenConfig;
use crudgen_lib::scaffold::stubs::STUB_NAMES;
use crudgen_lib::scaffold::{defaults, DirectoryStubs};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "+ ");
static SKIP: Emoji<'_, '_> = Emoji("- ", "- ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");
static CUSTOM: Emoji<'_, '_> = Emoji("✨ ", "* ");
static DEFAULT: Emoji<'_, '_> = Emoji("  ", "  ");

/// Stub management subcommands
#[derive(Debug, Subcommand)]
pub enum StubsCommand {
    /// Copy the built-in stubs into the project stub directory
    Publish {
        /// Replace stubs that already exist
        #[arg(long)]
        force: bool,
    },
    /// List stubs and whether the project customises them
    List,
    /// Show the diff between the built-in and the project stub
    Diff {
        /// Stub name (e.g., `views/create`)
        name: String,
    },
}

impl StubsCommand {
    /// Execute the stubs command
    ///
    /// # Errors
    ///
    /// Returns error if configuration cannot be loaded or a stub cannot be
    /// read or written.
    pub fn execute(self, root: &Path, config: Option<&Path>) -> Result<()> {
        let config = CrudgenConfig::load(root, config).context("Failed to load configuration")?;
        let stubs = DirectoryStubs::new(root.join(&config.paths.stubs_dir), config.extensions.stub.as_str());

        match self {
            Self::Publish { force } => publish_stubs(&stubs, force),
            Self::List => list_stubs(&stubs, &config.extensions.stub),
            Self::Diff { name } => diff_stub(&stubs, &name),
        }
    }
}

/// Write built-in stubs into the stub directory
fn publish_stubs(stubs: &DirectoryStubs, force: bool) -> Result<()> {
    println!("{FOLDER}Publishing stubs to {}", style(stubs.dir().display()).cyan());
    println!();

    let mut written = 0;
    for name in STUB_NAMES {
        let Some(content) = defaults::builtin(name) else {
            continue;
        };
        let path = stubs.path_for(name);

        if path.exists() && !force {
            println!("  {SKIP}{} (exists, use --force to replace)", style(name).dim());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write stub: {}", path.display()))?;

        println!("  {CHECK}{}", style(name).green());
        written += 1;
    }

    println!();
    println!("{CHECK}Published {written} stubs");
    Ok(())
}

/// Stub names found on disk, relative to the stub directory and without extension
fn stubs_on_disk(dir: &Path, extension: &str) -> Vec<String> {
    let suffix = format!(".{extension}");

    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(dir).ok()?;
            let relative = relative.to_string_lossy().replace('\\', "/");
            relative.strip_suffix(&suffix).map(ToString::to_string)
        })
        .collect()
}

/// List stubs and their customisation status
fn list_stubs(stubs: &DirectoryStubs, extension: &str) -> Result<()> {
    println!("{FOLDER}Stubs");
    println!();
    println!("  Directory: {}", style(stubs.dir().display()).cyan());
    println!();

    let on_disk = stubs_on_disk(stubs.dir(), extension);
    let mut customised = 0;

    for name in STUB_NAMES {
        if on_disk.iter().any(|found| found == name) {
            println!("    {CUSTOM}{}", style(name).yellow());
            customised += 1;
        } else {
            println!("    {DEFAULT}{}", style(name).dim());
        }
    }

    let mut extra: Vec<_> = on_disk
        .iter()
        .filter(|found| !STUB_NAMES.contains(&found.as_str()))
        .collect();
    extra.sort();
    if !extra.is_empty() {
        println!();
        println!("  {}", style("Not used by the generator:").bold());
        for name in extra {
            println!("    {FILE}{}", style(name).dim());
        }
    }

    println!();
    println!(
        "  {} customised, {} built-in",
        style(customised).yellow(),
        style(STUB_NAMES.len() - customised).dim()
    );

    Ok(())
}

/// Show diff between the built-in stub and the project copy
fn diff_stub(stubs: &DirectoryStubs, name: &str) -> Result<()> {
    let Some(builtin) = defaults::builtin(name) else {
        println!("Unknown stub: {}", style(name).red());
        println!();
        println!("Available stubs:");
        for stub in STUB_NAMES {
            println!("  - {stub}");
        }
        bail!("Invalid stub name");
    };

    let path: PathBuf = stubs.path_for(name);
    if !path.exists() {
        println!("Stub '{name}' is not customised (using built-in)");
        return Ok(());
    }

    let custom = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read stub: {}", path.display()))?;

    println!("{FILE}{}", style(name).bold());
    println!();

    let diff = TextDiff::from_lines(builtin, &custom);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
            ChangeTag::Equal => print!(" {change}"),
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_publish_writes_all_stubs() {
        let temp_dir = TempDir::new().unwrap();
        let stubs = DirectoryStubs::new(temp_dir.path(), "stub");

        publish_stubs(&stubs, false).unwrap();

        for name in STUB_NAMES {
            assert!(stubs.path_for(name).exists(), "missing {name}");
        }
        assert!(temp_dir.path().join("views/index.stub").exists());
    }

    #[test]
    fn test_publish_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let stubs = DirectoryStubs::new(temp_dir.path(), "stub");
        fs::write(stubs.path_for("Model"), "mine").unwrap();

        publish_stubs(&stubs, false).unwrap();
        assert_eq!(fs::read_to_string(stubs.path_for("Model")).unwrap(), "mine");

        publish_stubs(&stubs, true).unwrap();
        assert_ne!(fs::read_to_string(stubs.path_for("Model")).unwrap(), "mine");
    }

    #[test]
    fn test_stubs_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("views")).unwrap();
        fs::write(temp_dir.path().join("Model.stub"), "").unwrap();
        fs::write(temp_dir.path().join("views/edit.stub"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let mut found = stubs_on_disk(temp_dir.path(), "stub");
        found.sort();
        assert_eq!(found, vec!["Model", "views/edit"]);
    }

    #[test]
    fn test_stubs_on_disk_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(stubs_on_disk(&temp_dir.path().join("absent"), "stub").is_empty());
    }

    #[test]
    fn test_diff_unknown_stub() {
        let temp_dir = TempDir::new().unwrap();
        let stubs = DirectoryStubs::new(temp_dir.path(), "stub");
        assert!(diff_stub(&stubs, "views/show").is_err());
        assert!(diff_stub(&stubs, "Model").is_ok());
    }
}
