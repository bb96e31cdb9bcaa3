use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search configuration error: {0}")]
    Config(String),

    /// A non-terminal state produced no actions.  This signals a modeling
    /// bug in the snapshot (e.g. an empty edge grouping); the search aborts
    /// rather than returning a best-effort result.
    #[error("non-terminal state has no possible actions")]
    NoActions,
}

pub type SearchResult<T> = Result<T, SearchError>;
