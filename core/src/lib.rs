pub mod codec;
pub mod error;
pub mod filters;
pub mod operation;
pub mod pipeline;

pub use error::EngineError;
pub use operation::Operation;
pub use pipeline::{apply, transform};
