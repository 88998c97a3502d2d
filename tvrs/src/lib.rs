pub mod catalog;
pub mod command;
pub mod error;
pub mod export;
pub mod plot;
pub mod record;
pub mod sanitize;
pub mod stats;

pub use error::{Error, Result};
