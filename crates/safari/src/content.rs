//! Loading the site's JSON content files.
//!
//! Content lives in a content directory (`data/` by default) next to the pages, one file per page:
//! `home-content.json`, `updates-content.json` and `contact-content.json`. A file is an object whose
//! top-level keys name its sections, see [`Shape`].
use log::info;

mod document;
mod records;
mod source;

pub use document::{ContentDocument, Shape};
pub use records::{
    Achievement, Animal, Booster, Contact, Diary, Enhancement, Feature, Instruction, JourneyStat,
    Level, Milestone, RecordKind, RosterEntry, SafariJourney, Testimonial, Text, TextBlock,
};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{ContentSource, DirSource, MemorySource, SiteSource};

use crate::diagnostics::{DiagnosticKind, Diagnostics, error_chain};
use crate::errors::ContentError;
use crate::fallback::{FallbackMode, show_error_content};
use crate::page::Page;
use crate::render::{assign, render_content, render_roster, roster};

/// The content file boosters are read from when a document lists animals without boosters.
pub const SHARED_CONTENT_FILE: &str = "home-content.json";

/// Fetches and parses content files from a [`ContentSource`].
#[derive(Debug, Clone)]
pub struct ContentFetcher<S> {
    source: S,
    content_dir: String,
}

impl<S: ContentSource> ContentFetcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_content_dir(source, "data")
    }

    pub fn with_content_dir(source: S, content_dir: impl Into<String>) -> Self {
        Self {
            source,
            content_dir: content_dir.into().trim_matches('/').to_string(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn path_for(&self, file: &str) -> String {
        if self.content_dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.content_dir, file)
        }
    }

    /// Fetches `<content dir>/<file>` and parses it. A failure is final, nothing is retried.
    pub async fn fetch_document(&self, file: &str) -> Result<ContentDocument, ContentError> {
        let raw = self
            .source
            .fetch(&self.path_for(file))
            .await
            .map_err(|source| ContentError::Fetch {
                file: file.to_string(),
                source,
            })?;

        ContentDocument::parse(file, &raw)
    }
}

/// Loads a content file into a single placeholder of the page.
///
/// The document is rendered by its first known section. If the file cannot be fetched or parsed,
/// or its section cannot be rendered, the target is given its fallback content instead. This never
/// fails: every problem ends up in `diagnostics`.
///
/// A document listing animals without boosters gets its boosters from [`SHARED_CONTENT_FILE`]. If
/// that file cannot be loaded, only the animals are shown.
pub async fn load_content_from_json<S: ContentSource>(
    fetcher: &ContentFetcher<S>,
    page: &mut Page,
    file: &str,
    target: &str,
    fallback: FallbackMode,
    diagnostics: &mut Diagnostics,
) {
    let document = match fetcher.fetch_document(file).await {
        Ok(document) => document,
        Err(err) => {
            diagnostics.push(DiagnosticKind::ContentFailed {
                file: file.to_string(),
                target: target.to_string(),
                reason: error_chain(&err),
            });
            show_error_content(page, target, fallback);
            return;
        }
    };

    let result = match document.shape() {
        Some(Shape::Animals) if !document.has(Shape::Boosters) && page.has_target(target) => {
            let shared = match fetcher.fetch_document(SHARED_CONTENT_FILE).await {
                Ok(shared) => Some(shared),
                Err(err) => {
                    diagnostics.push(DiagnosticKind::BoostersUnavailable {
                        reason: error_chain(&err),
                    });
                    None
                }
            };

            roster(&document, shared.as_ref())
                .and_then(|entries| assign(page, target, render_roster(&entries)))
        }
        _ => render_content(&document, page, target, diagnostics),
    };

    match result {
        Ok(()) => info!(target: "content", "Content loaded from {} into #{}", file, target),
        Err(err) => {
            diagnostics.push(DiagnosticKind::ContentFailed {
                file: file.to_string(),
                target: target.to_string(),
                reason: error_chain(&err),
            });
            show_error_content(page, target, fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT_PAGE: &str =
        r#"<html><body><div id="contact-details-content"></div></body></html>"#;

    #[test]
    fn test_path_for() {
        let fetcher = ContentFetcher::new(MemorySource::new());
        assert_eq!(fetcher.path_for("home-content.json"), "data/home-content.json");

        let fetcher = ContentFetcher::with_content_dir(MemorySource::new(), "/content/");
        assert_eq!(fetcher.path_for("home-content.json"), "content/home-content.json");

        let fetcher = ContentFetcher::with_content_dir(MemorySource::new(), "");
        assert_eq!(fetcher.path_for("home-content.json"), "home-content.json");
    }

    #[tokio::test]
    async fn test_load_content_renders_first_shape() {
        let source = MemorySource::new().with_file(
            "data/contact-content.json",
            r#"{"contact":{"email":"team@safarimatch.com"}}"#,
        );
        let fetcher = ContentFetcher::new(source);
        let mut page = Page::new("/contact-safari.html", CONTACT_PAGE);
        let mut diagnostics = Diagnostics::new(page.url());

        load_content_from_json(
            &fetcher,
            &mut page,
            "contact-content.json",
            "contact-details-content",
            FallbackMode::FallbackTable,
            &mut diagnostics,
        )
        .await;

        assert!(page.html().contains("mailto:team@safarimatch.com"));
        assert_eq!(page.writes("contact-details-content"), 1);
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_load_content_fetch_failure_uses_fallback() {
        let fetcher = ContentFetcher::new(MemorySource::new());
        let mut page = Page::new("/contact-safari.html", CONTACT_PAGE);
        let mut diagnostics = Diagnostics::new(page.url());

        load_content_from_json(
            &fetcher,
            &mut page,
            "contact-content.json",
            "contact-details-content",
            FallbackMode::FallbackTable,
            &mut diagnostics,
        )
        .await;

        assert!(page.html().contains(crate::fallback::FALLBACK_EMAIL));
        assert_eq!(page.writes("contact-details-content"), 1);
        assert!(matches!(
            diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::ContentFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_content_parse_failure_uses_error_message() {
        let source = MemorySource::new().with_file("data/contact-content.json", "{\"contact\": ");
        let fetcher = ContentFetcher::new(source);
        let mut page = Page::new("/contact-safari.html", CONTACT_PAGE);
        let mut diagnostics = Diagnostics::new(page.url());

        load_content_from_json(
            &fetcher,
            &mut page,
            "contact-content.json",
            "contact-details-content",
            FallbackMode::ErrorMessage,
            &mut diagnostics,
        )
        .await;

        assert!(page.html().contains(crate::fallback::ERROR_MESSAGE));
        assert_eq!(page.writes("contact-details-content"), 1);
    }

    #[tokio::test]
    async fn test_load_content_fetches_shared_boosters() {
        let source = MemorySource::new()
            .with_file(
                "data/animals.json",
                r#"{"animals":[{"name":"Lion","special_ability":"Roar"}]}"#,
            )
            .with_file(
                "data/home-content.json",
                r#"{"boosters":[{"name":"Thunder","effect":"Row clear"}]}"#,
            );
        let fetcher = ContentFetcher::new(source);
        let mut page = Page::new("/", r#"<div id="animals-boosters-content"></div>"#);
        let mut diagnostics = Diagnostics::new(page.url());

        load_content_from_json(
            &fetcher,
            &mut page,
            "animals.json",
            "animals-boosters-content",
            FallbackMode::FallbackTable,
            &mut diagnostics,
        )
        .await;

        assert!(page.html().contains(r#"<h3 class="animal-name">Lion</h3>"#));
        assert!(page.html().contains(r#"<h3 class="booster-name">Thunder</h3>"#));
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_load_content_animals_only_when_boosters_missing() {
        let source = MemorySource::new().with_file(
            "data/animals.json",
            r#"{"animals":[{"name":"Lion","special_ability":"Roar"}]}"#,
        );
        let fetcher = ContentFetcher::new(source);
        let mut page = Page::new("/", r#"<div id="animals-boosters-content"></div>"#);
        let mut diagnostics = Diagnostics::new(page.url());

        load_content_from_json(
            &fetcher,
            &mut page,
            "animals.json",
            "animals-boosters-content",
            FallbackMode::FallbackTable,
            &mut diagnostics,
        )
        .await;

        assert!(page.html().contains("animal-card"));
        assert!(!page.html().contains("booster-card"));
        assert!(matches!(
            diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::BoostersUnavailable { .. })
        ));
    }
}
