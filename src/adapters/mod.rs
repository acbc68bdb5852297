pub mod database;
pub mod error;
pub mod filesystem;
pub mod in_memory;
pub mod registry;

pub use error::BackendError;
pub use registry::{BackendKind, BackendRegistry};
