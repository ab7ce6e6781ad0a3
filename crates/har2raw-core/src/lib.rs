pub mod config;
pub mod logging;

pub mod error;
pub mod har;
pub mod import;
pub mod message;
pub mod sink;

pub use error::{BodyPart, ImportError};
pub use import::{convert, import_all, import_one, ImportOptions, ImportSummary};
pub use message::{BuildOptions, BuiltMessage, HttpService};
