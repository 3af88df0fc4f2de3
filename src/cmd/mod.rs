/// Attribute variant report command.
pub mod inspect;

mod error;

/// Command error and result aliases.
pub use error::{CliError, Result};
