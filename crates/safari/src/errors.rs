//! Error types for the Safari Match renderer.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

use crate::content::Shape;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are printed with Debug, route them through Display instead.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Failure to retrieve a file from a [`ContentSource`](crate::content::ContentSource).
#[derive(Error)]
pub enum SourceError {
    #[error("`{path}` does not exist")]
    NotFound { path: String },
    #[error("Failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "http")]
    #[error("Request for `{url}` failed")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Fetch task for `{path}` did not complete")]
    Join {
        path: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

#[derive(Error)]
pub enum ContentError {
    #[error("Failed to fetch content file `{file}`")]
    Fetch {
        file: String,
        #[source]
        source: SourceError,
    },
    #[error("Content file `{file}` is not valid JSON")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Content file `{file}` is not a JSON object")]
    NotAnObject { file: String },
    #[error("Content file `{file}` has no known section (found keys: {keys})")]
    UnknownShape { file: String, keys: String },
    #[error("Section `{}` has an unexpected structure", shape.key())]
    ShapeMismatch {
        shape: Shape,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Page(#[from] PageError),
}

#[derive(Error)]
pub enum PageError {
    #[error("Placeholder `#{target}` is not present in the page")]
    MissingTarget { target: String },
    #[error("Failed to rewrite page markup")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

#[derive(Error)]
pub enum FragmentError {
    #[error("Failed to fetch fragment `{fragment}`")]
    Fetch {
        fragment: String,
        #[source]
        source: SourceError,
    },
    #[error(transparent)]
    Page(#[from] PageError),
}

#[derive(Error, Debug)]
pub enum SafariError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Fragment(#[from] FragmentError),

    #[error("Invalid page pattern")]
    Pattern(#[from] glob::PatternError),

    #[error("Output directory `{}` contains the site directory", path.display())]
    OutputContainsSiteDir { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(SourceError, ContentError, PageError, FragmentError);
