//! Stub loading and placeholder substitution
//!
//! A stub is a text template containing `{{token}}` placeholders. Stubs are
//! looked up by name (`Model`, `Controller`, `views/index`, ...) in a
//! [`StubSource`] and loaded fresh on every render.
//!
//! Substitution is literal and non-recursive: each `{{key}}` whose key is
//! in the [`Substitutions`] is replaced by its value, the replacement text is
//! never rescanned, and placeholders with no value (including view-layer
//! echoes like `{{ $item->title }}`) are copied through unchanged.

use super::defaults;
use crate::error::{Result, ScaffoldError};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Names of all stubs the generator renders
pub const STUB_NAMES: &[&str] = &[
    "Model",
    "Controller",
    "views/index",
    "views/create",
    "views/edit",
];

/// Somewhere stubs can be loaded from
pub trait StubSource {
    /// Load the stub called `name`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::StubNotFound`] if the stub does not exist or
    /// cannot be read.
    fn load(&self, name: &str) -> Result<String>;
}

/// Stubs stored as `<dir>/<name>.<extension>` files
#[derive(Debug, Clone)]
pub struct DirectoryStubs {
    dir: PathBuf,
    extension: String,
}

impl DirectoryStubs {
    /// Create a source reading from `dir`
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Directory the stubs are read from
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a stub called `name` would be read from
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }
}

impl StubSource for DirectoryStubs {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.path_for(name);
        fs::read_to_string(&path).map_err(|source| ScaffoldError::StubNotFound {
            name: name.to_string(),
            source,
        })
    }
}

/// The stubs compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStubs;

impl StubSource for EmbeddedStubs {
    fn load(&self, name: &str) -> Result<String> {
        defaults::builtin(name)
            .map(ToString::to_string)
            .ok_or_else(|| ScaffoldError::StubNotFound {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no built-in stub with this name"),
            })
    }
}

/// Project stubs first, built-in stubs as an optional fallback
#[derive(Debug, Clone)]
pub struct LayeredStubs {
    project: DirectoryStubs,
    fallback: Option<EmbeddedStubs>,
}

impl LayeredStubs {
    /// Create a layered source
    #[must_use]
    pub fn new(project: DirectoryStubs, embedded_fallback: bool) -> Self {
        Self {
            project,
            fallback: embedded_fallback.then_some(EmbeddedStubs),
        }
    }
}

impl StubSource for LayeredStubs {
    fn load(&self, name: &str) -> Result<String> {
        match self.project.load(name) {
            Ok(stub) => {
                debug!(stub = name, path = %self.project.path_for(name).display(), "using project stub");
                Ok(stub)
            }
            Err(ScaffoldError::StubNotFound { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                match self.fallback {
                    Some(embedded) => {
                        debug!(stub = name, "using built-in stub");
                        embedded.load(name)
                    }
                    None => Err(ScaffoldError::StubNotFound {
                        name: name.to_string(),
                        source,
                    }),
                }
            }
            Err(err) => Err(err),
        }
    }
}

/// Placeholder values for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for `{{key}}`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value for `key`, if any
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Load the stub called `name` and fill in its placeholders
///
/// # Errors
///
/// Returns [`ScaffoldError::StubNotFound`] if the stub cannot be loaded.
pub fn render(source: &dyn StubSource, name: &str, substitutions: &Substitutions) -> Result<String> {
    let stub = source.load(name)?;
    Ok(substitute(&stub, substitutions))
}

/// Replace every `{{key}}` that has a value; leave everything else as is
///
/// # Examples
///
/// ```
/// # use crudgen_lib::scaffold::stubs::{substitute, Substitutions};
/// let subs = Substitutions::new().with("modelName", "Post");
/// assert_eq!(
///     substitute("class {{modelName}} {{unknown}} {{ $x }}", &subs),
///     "class Post {{unknown}} {{ $x }}"
/// );
/// ```
#[must_use]
pub fn substitute(template: &str, substitutions: &Substitutions) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let inner = &rest[start + 2..];

        // A key never spans a brace or a line break
        let end = inner
            .find(|c: char| matches!(c, '{' | '}' | '\n'))
            .unwrap_or(inner.len());
        let replacement = inner[end..]
            .starts_with("}}")
            .then(|| substitutions.get(&inner[..end]))
            .flatten()
            .map(|value| (end, value));

        if let Some((end, value)) = replacement {
            output.push_str(value);
            rest = &inner[end + 2..];
        } else {
            // Step past one brace so `{{{key}}}` still finds `{{key}}`
            output.push('{');
            rest = &rest[start + 1..];
        }
    }

    output.push_str(rest);
    output
}
