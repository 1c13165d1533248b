use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Module {module} did not load after {attempts} navigation attempts")]
    NavigationFailed { module: String, attempts: u32 },

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Browser driver error: {0}")]
    Driver(#[from] sipd_browser::Error),

    #[error(transparent)]
    Core(#[from] sipd_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
