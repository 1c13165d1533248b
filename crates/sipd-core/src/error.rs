use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid cookie JSON: {0}")]
    CorruptSession(#[from] serde_json::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, Error>;
