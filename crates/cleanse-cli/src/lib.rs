//! Library side of the `cleanse` binary: logging and settings.

pub mod logging;
pub mod settings;
