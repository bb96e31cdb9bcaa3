use cim_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("planning configuration error: {0}")]
    Config(String),

    #[error("snapshot parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
