use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::model::LayoutSnapshot;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("layout request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("layout endpoint answered {status}")]
    UnexpectedStatus { status: StatusCode },
}

/// Blocking client for the layout endpoint. Run it from a worker thread; the
/// session stays mutable while a transfer is outstanding. No retry and no
/// timeout here, both belong to the calling layer.
#[derive(Clone)]
pub struct LayoutClient {
    http: Client,
    layouts_url: String,
}

impl LayoutClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            layouts_url: format!("{}/layouts", base_url.trim_end_matches('/')),
        }
    }

    /// Fetch the shared layout; an empty document means nothing was ever
    /// saved.
    pub fn fetch(&self) -> Result<LayoutSnapshot, PersistenceError> {
        let response = self.http.get(&self.layouts_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PersistenceError::UnexpectedStatus { status });
        }
        Ok(response.json()?)
    }

    /// Ship a full snapshot; the server replaces its slot wholesale.
    pub fn save(&self, snapshot: &LayoutSnapshot) -> Result<(), PersistenceError> {
        let response = self.http.post(&self.layouts_url).json(snapshot).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PersistenceError::UnexpectedStatus { status });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_tolerated() {
        let client = LayoutClient::new("http://127.0.0.1:4600/");
        assert_eq!(client.layouts_url, "http://127.0.0.1:4600/layouts");

        let client = LayoutClient::new("http://127.0.0.1:4600");
        assert_eq!(client.layouts_url, "http://127.0.0.1:4600/layouts");
    }
}
