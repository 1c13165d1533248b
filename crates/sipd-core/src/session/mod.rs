mod store;
mod types;

pub use store::{SessionStore, DEFAULT_SESSION_FILE};
pub use types::CookieRecord;
