pub mod cli;
pub mod digest;
pub mod entity;
pub mod error;
pub mod format;
pub mod query;
pub mod store;
pub mod workspace;

pub use error::{AtriumError, Result};
pub use workspace::Workspace;
