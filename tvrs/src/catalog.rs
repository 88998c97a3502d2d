use crate::error::{Error, Result};
use crate::record::{RawShow, ShowRecord};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com";

/// How a catalog response is treated, decided by status code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    InternalError,
    Failed(u16),
}

pub fn classify(status: StatusCode) -> Status {
    if status == StatusCode::OK {
        Status::Ok
    } else if status == StatusCode::INTERNAL_SERVER_ERROR {
        Status::InternalError
    } else {
        Status::Failed(status.as_u16())
    }
}

/// Outcome of a single-record query.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    ServerError { status: u16 },
    TransportError(String),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Turn anything but `Found` into an error; `what` names the missing
    /// thing in the `NotFound` message.
    pub fn into_result(self, what: &str) -> Result<T> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::NotFound => Err(Error::NotFound(what.to_string())),
            Lookup::ServerError { status: 500 } => Err(Error::InternalServerError),
            Lookup::ServerError { status } => Err(Error::RequestFailed(status)),
            Lookup::TransportError(e) => Err(Error::Transport(e)),
        }
    }
}

/// The read-only queries the tool makes against the show catalog.
pub trait Catalog {
    /// Id of the best match for `name`, if the catalog has one.
    fn search_by_name(&self, name: &str) -> Lookup<u64>;

    fn fetch_by_id(&self, id: u64) -> Lookup<ShowRecord>;

    /// Every show in the catalog, as sent.
    fn list_all(&self) -> Result<Vec<RawShow>>;
}

/// HTTP client for the TVmaze API.
pub struct TvMaze {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMaze {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, path: &str) -> reqwest::Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        info!("GET {}", url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        let text = response.text()?;
        info!("{} -> {}, {} bytes", url, status, text.len());
        Ok((status, text))
    }
}

impl Default for TvMaze {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl Catalog for TvMaze {
    fn search_by_name(&self, name: &str) -> Lookup<u64> {
        let path = format!("/singlesearch/shows?q={}", urlencoding::encode(name));
        match self.get(&path) {
            Ok((status, body)) => interpret_search(status, &body),
            Err(e) => {
                warn!("search for {:?} failed: {}", name, e);
                Lookup::TransportError(e.to_string())
            }
        }
    }

    fn fetch_by_id(&self, id: u64) -> Lookup<ShowRecord> {
        match self.get(&format!("/shows/{}", id)) {
            Ok((status, body)) => interpret_show(status, &body),
            Err(e) => {
                warn!("fetching show {} failed: {}", id, e);
                Lookup::TransportError(e.to_string())
            }
        }
    }

    fn list_all(&self) -> Result<Vec<RawShow>> {
        let (status, body) = self.get("/shows")?;
        interpret_listing(status, &body)
    }
}

fn status_lookup<T>(status: StatusCode) -> Option<Lookup<T>> {
    match classify(status) {
        Status::Ok => None,
        Status::InternalError | Status::Failed(_) => Some(Lookup::ServerError {
            status: status.as_u16(),
        }),
    }
}

fn parse_body(body: &str) -> Value {
    // TVmaze answers an unmatched single search with `200 null`, and some
    // proxies strip that down to an empty body.
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!("unreadable response body: {}", e);
        Value::Null
    })
}

pub fn interpret_search(status: StatusCode, body: &str) -> Lookup<u64> {
    if let Some(failure) = status_lookup(status) {
        return failure;
    }
    match parse_body(body).get("id").and_then(Value::as_u64) {
        Some(id) => Lookup::Found(id),
        None => Lookup::NotFound,
    }
}

pub fn interpret_show(status: StatusCode, body: &str) -> Lookup<ShowRecord> {
    if let Some(failure) = status_lookup(status) {
        return failure;
    }
    match parse_body(body) {
        Value::Null => Lookup::NotFound,
        raw => Lookup::Found(ShowRecord::from_json(&raw)),
    }
}

pub fn interpret_listing(status: StatusCode, body: &str) -> Result<Vec<RawShow>> {
    match classify(status) {
        Status::Ok => {}
        Status::InternalError => return Err(Error::InternalServerError),
        Status::Failed(code) => return Err(Error::RequestFailed(code)),
    }
    match serde_json::from_str::<Option<Vec<RawShow>>>(body)? {
        Some(shows) => Ok(shows),
        None => Err(Error::EmptyResponse),
    }
}
