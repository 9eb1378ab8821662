use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(usize),
}
