#![doc = "Common types shared across the comwatch workspace."]

pub mod config;
pub mod error;
pub mod line;
pub mod tick;

pub use config::*;
pub use error::*;
pub use line::*;
pub use tick::*;
