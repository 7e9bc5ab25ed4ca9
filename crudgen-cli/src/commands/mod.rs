//! CLI command implementations

pub mod crud;
pub mod stubs;

pub use crud::{CrudCommand, CrudOptions};
pub use stubs::StubsCommand;
