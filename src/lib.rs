pub mod aggregate;
pub mod colors;
pub mod config;
pub mod error;
pub mod harness;
pub mod identity;
pub mod matrix;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod report;

pub use error::{Error, Result};
