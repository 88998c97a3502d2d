#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("The request was not successful (HTTP {0}). Try again!")]
    RequestFailed(u16),

    #[error("Internal server error. Try again!")]
    InternalServerError,

    #[error("The response was empty. Try again!")]
    EmptyResponse,

    #[error("We found no matches in the database for the entry {0}. Try again!")]
    NotFound(String),

    #[error("Error fetching genres. Try again!")]
    Genres(#[source] Box<Error>),

    #[error("Could not reach the catalog: {0}")]
    Transport(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
