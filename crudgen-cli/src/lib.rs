//! crudgen library
//!
//! Parses a compact field specification and generates the model, controller,
//! views and route registration for a CRUD resource.
//!
//! ```
//! use crudgen_lib::config::CrudgenConfig;
//! use crudgen_lib::scaffold::{EmbeddedStubs, FieldCollection, ScaffoldGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = std::env::temp_dir().join("crudgen-doc-example");
//! let fields = FieldCollection::parse("title:string|required,body:text")?;
//! let generator = ScaffoldGenerator::new(
//!     "Post".to_string(),
//!     fields,
//!     CrudgenConfig::default().layout(&root),
//!     Box::new(EmbeddedStubs),
//! )?;
//!
//! let artifacts = generator.render()?;
//! assert_eq!(artifacts.len(), 5);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

pub use config::CrudgenConfig;
pub use error::{Result, ScaffoldError};
pub use scaffold::{FieldCollection, FieldSpec, FieldType, ScaffoldGenerator, TemplateHelpers};
