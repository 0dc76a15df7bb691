use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::errors::SourceError;

/// Somewhere site files can be retrieved from, by path relative to the site root.
///
/// Paths are the same relative paths a browser would request, e.g. `data/home-content.json` or
/// `safari-header.html`.
pub trait ContentSource: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Reads site files from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let file_path = self.root.join(path);
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(SourceError::NotFound {
                path: path.to_string(),
            }),
            Err(err) => Err(SourceError::Io {
                path: file_path,
                source: err,
            }),
        }
    }
}

/// Fetches site files over HTTP, relative to a base URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(feature = "http")]
impl ContentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let url = self.url_for(path);
        let request_url = url.clone();

        // ureq is blocking, keep it off the async workers.
        let response = tokio::task::spawn_blocking(move || {
            ureq::get(&request_url)
                .call()
                .and_then(|mut response| response.body_mut().read_to_string())
        })
        .await
        .map_err(|source| SourceError::Join {
            path: path.to_string(),
            source,
        })?;

        match response {
            Ok(body) => Ok(body),
            Err(ureq::Error::StatusCode(404)) => Err(SourceError::NotFound {
                path: path.to_string(),
            }),
            Err(source) => Err(SourceError::Http { url, source }),
        }
    }
}

/// Serves site files from memory. Mostly useful for tests and for rendering content that was
/// produced elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: FxHashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ContentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                path: path.to_string(),
            })
    }
}

/// The source a site build reads from, picked from [`ContentLocation`](crate::ContentLocation).
#[derive(Debug, Clone)]
pub enum SiteSource {
    Directory(DirSource),
    #[cfg(feature = "http")]
    Remote(HttpSource),
}

impl ContentSource for SiteSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        match self {
            SiteSource::Directory(source) => source.fetch(path).await,
            #[cfg(feature = "http")]
            SiteSource::Remote(source) => source.fetch(path).await,
        }
    }
}
