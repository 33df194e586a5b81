use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

use reqwest::Client;

use crate::{info_time, Error, Result};

/// Where a page or a rate table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl From<&str> for Source {
    /// Anything starting with `http://` or `https://` is a URL, everything else a local path.
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Source::Url(value.to_string())
        } else {
            Source::File(PathBuf::from(value))
        }
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::from(value.as_str())
    }
}

impl From<PathBuf> for Source {
    fn from(value: PathBuf) -> Self {
        Source::File(value)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches the whole body of a source as text.
/// A non-success HTTP status or a missing local file is reported as `Error::DataUnavailable`.
pub async fn fetch_source(client: &Client, source: &Source) -> Result<String> {
    info_time!("Fetching: {}", source);
    match source {
        Source::Url(url) => request_text(client, url).await,
        Source::File(path) => match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::DataUnavailable(format!(
                "file not found: {}",
                path.display()
            ))),
            Err(e) => Err(e.into()),
        },
    }
}

async fn request_text(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(Error::DataUnavailable(format!("{url} responded with {status}")));
    }
    let text = res.text().await?;
    Ok(text)
}
