pub mod error;
pub mod input;
pub mod output;
pub mod session;
pub mod work;

pub use error::{Error, Result};
