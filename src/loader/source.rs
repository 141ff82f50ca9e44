//! Publication sources: HTTP(S) endpoints and local JSON files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use tracing::{debug, instrument};
use url::Url;

use crate::record::Publication;
use crate::user_agent;

use super::error::LoadError;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Something that yields the raw publication list.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Fetches and decodes the full list.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on transport, status, IO, or decode failure.
    async fn fetch(&self) -> Result<Vec<Publication>, LoadError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

fn decode(origin: &str, bytes: &[u8]) -> Result<Vec<Publication>, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::decode(origin, e))
}

/// Fetches the list with a single uncached GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Creates a source for `url` with the default connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(url: Url) -> Result<Self, LoadError> {
        Self::with_connect_timeout(url, CONNECT_TIMEOUT_SECS)
    }

    /// Creates a source with an explicit connect timeout. No overall request
    /// timeout is applied.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ClientBuild`] when the HTTP client cannot be built.
    pub fn with_connect_timeout(url: Url, connect_timeout_secs: u64) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(user_agent::default_user_agent())
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .gzip(true)
            .build()
            .map_err(|source| LoadError::ClientBuild { source })?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PublicationSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<Publication>, LoadError> {
        let url = self.url.as_str();
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| LoadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::network(url, e))?;
        debug!(bytes = body.len(), "publication payload received");
        decode(url, &body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Reads the list from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PublicationSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<Publication>, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::io(&self.path, e))?;
        debug!(bytes = bytes.len(), "publication file read");
        decode(&self.path.display().to_string(), &bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Where the publication list lives, as given on the command line or in the
/// config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// HTTP or HTTPS endpoint.
    Url(Url),
    /// Local file (plain path or `file://` URL).
    File(PathBuf),
}

impl DataSource {
    /// Classifies a source string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidSource`] for empty input, URLs with a
    /// scheme other than http/https/file, or unusable `file://` URLs.
    pub fn parse(value: &str) -> Result<Self, LoadError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LoadError::invalid_source(value, "source is empty"));
        }

        match Url::parse(value) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Url(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::File)
                    .map_err(|()| LoadError::invalid_source(value, "file URL has no local path")),
                // Windows drive letters parse as one-letter schemes.
                scheme if scheme.len() == 1 => Ok(Self::File(PathBuf::from(value))),
                scheme => Err(LoadError::invalid_source(
                    value,
                    format!("scheme '{scheme}' is not supported"),
                )),
            },
            Err(_) => Ok(Self::File(PathBuf::from(value))),
        }
    }

    /// Builds the matching [`PublicationSource`].
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ClientBuild`] when the HTTP client cannot be built.
    pub fn into_source(
        self,
        connect_timeout_secs: u64,
    ) -> Result<Box<dyn PublicationSource>, LoadError> {
        Ok(match self {
            Self::Url(url) => Box::new(HttpSource::with_connect_timeout(
                url,
                connect_timeout_secs,
            )?),
            Self::File(path) => Box::new(FileSource::new(path)),
        })
    }
}
