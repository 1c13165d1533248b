pub mod actions;
pub mod auth;
pub mod batch;
pub mod error;
pub mod guard;
pub mod portal;
pub mod prompt;

pub use error::{Error, Result};
