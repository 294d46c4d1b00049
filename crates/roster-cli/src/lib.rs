//! Library side of the `roster` command-line tool.

pub mod logging;
pub mod settings;
pub mod summary;
