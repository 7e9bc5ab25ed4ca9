//! Route registration
//!
//! The route file is shared by every generated resource and only ever
//! appended to. Repeated runs for the same resource append duplicate lines.

use super::helpers::TemplateHelpers;
use crate::error::{Result, ScaffoldError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resource route line for `model`, including its leading newline
///
/// # Examples
///
/// ```
/// # use crudgen_lib::scaffold::routes::route_line;
/// assert_eq!(
///     route_line("Post"),
///     "\nRoute::resource('posts', PostController::class);"
/// );
/// ```
#[must_use]
pub fn route_line(model: &str) -> String {
    format!(
        "\nRoute::resource('{}', {}::class);",
        TemplateHelpers::plural_lower(model),
        TemplateHelpers::controller_name(model)
    )
}

/// Destination for route registration lines
pub trait RouteSink {
    /// Append `line` verbatim
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::WriteFailure`] if the line cannot be stored.
    fn append(&mut self, line: &str) -> Result<()>;

    /// Human-readable description of where lines go
    fn describe(&self) -> String;
}

/// Appends to a route file on disk, creating it and its directory if needed
#[derive(Debug, Clone)]
pub struct FileRouteSink {
    path: PathBuf,
}

impl FileRouteSink {
    /// Create a sink appending to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Route file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteSink for FileRouteSink {
    fn append(&mut self, line: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::write(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ScaffoldError::write(&self.path, e))?;

        file.write_all(line.as_bytes())
            .map_err(|e| ScaffoldError::write(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Collects route lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteSink {
    /// Lines appended so far
    pub lines: Vec<String>,
}

impl RouteSink for MemoryRouteSink {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory route sink".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_route_line() {
        assert_eq!(
            route_line("Category"),
            "\nRoute::resource('categories', CategoryController::class);"
        );
    }

    #[test]
    fn test_file_sink_appends_without_dedup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes/web.php");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<?php\n").unwrap();

        let mut sink = FileRouteSink::new(&path);
        sink.append(&route_line("Post")).unwrap();
        sink.append(&route_line("Post")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "<?php\n\nRoute::resource('posts', PostController::class);\nRoute::resource('posts', PostController::class);"
        );
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes/web.php");

        let mut sink = FileRouteSink::new(&path);
        sink.append(&route_line("Post")).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("PostController"));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemoryRouteSink::default();
        sink.append("a").unwrap();
        sink.append("b").unwrap();
        assert_eq!(sink.lines, vec!["a", "b"]);
    }
}
