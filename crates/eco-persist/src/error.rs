use thiserror::Error;

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid interval configuration: {what}")]
    InvalidInterval { what: &'static str },

    #[error("Bus failure: {0}")]
    Bus(#[from] eco_bus::BusError),
}
