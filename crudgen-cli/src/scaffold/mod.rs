//! CRUD scaffold generator implementation
//!
//! This module turns a resource name and a field specification string into a
//! model, a controller, list/create/edit views and a route registration.

pub mod defaults;
pub mod field_type;
pub mod generator;
pub mod helpers;
pub mod layout;
pub mod markup;
pub mod routes;
pub mod stubs;

pub use field_type::{FieldCollection, FieldSpec, FieldType, TypePolicy};
pub use generator::{
    ArtifactKind, GeneratedArtifact, GenerationError, GenerationReport, ScaffoldGenerator,
};
pub use helpers::TemplateHelpers;
pub use layout::ProjectLayout;
pub use markup::{compile_fields, RenderMode, Widget};
pub use routes::{FileRouteSink, MemoryRouteSink, RouteSink};
pub use stubs::{DirectoryStubs, EmbeddedStubs, LayeredStubs, StubSource, Substitutions};
