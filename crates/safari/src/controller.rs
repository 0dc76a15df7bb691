//! Decides what each page shows, and fills it in.
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, info};

use crate::content::{ContentDocument, ContentFetcher, ContentSource, Shape};
use crate::diagnostics::{DiagnosticKind, Diagnostics, error_chain};
use crate::fallback::{FallbackMode, show_error_content};
use crate::fragments::{FragmentOptions, load_templates};
use crate::interactions::{Interaction, MenuInitializer, ScriptedMenu, install_interactions};
use crate::page::Page;
use crate::render::{assign, render_shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Index,
    Updates,
    Contact,
}

impl PageKind {
    /// Recognizes a page from its URL path. `None` if the path is not a known page.
    pub fn from_path(path: &str) -> Option<PageKind> {
        if path.contains("index.html") || path == "/" || path.is_empty() {
            Some(PageKind::Index)
        } else if path.contains("safari-updates.html") {
            Some(PageKind::Updates)
        } else if path.contains("contact-safari.html") {
            Some(PageKind::Contact)
        } else {
            None
        }
    }

    /// Like [`PageKind::from_path`], but treats unknown paths as the home page, noting it in
    /// `diagnostics`.
    pub fn resolve(path: &str, diagnostics: &mut Diagnostics) -> PageKind {
        PageKind::from_path(path).unwrap_or_else(|| {
            diagnostics.push(DiagnosticKind::UnknownPage {
                path: path.to_string(),
            });
            PageKind::Index
        })
    }

    /// The content files this page loads, and which of their sections go where.
    pub fn plan(self) -> &'static [ContentFile] {
        match self {
            PageKind::Index => &[HOME_CONTENT],
            PageKind::Updates => &[UPDATES_CONTENT],
            PageKind::Contact => &[CONTACT_CONTENT],
        }
    }
}

/// One section of a content file rendered into one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: &'static str,
    pub shape: Shape,
}

impl Binding {
    pub const fn new(target: &'static str, shape: Shape) -> Self {
        Self { target, shape }
    }
}

/// A content file, fetched once, and the placeholders filled from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentFile {
    pub file: &'static str,
    pub bindings: &'static [Binding],
}

pub const HOME_CONTENT: ContentFile = ContentFile {
    file: "home-content.json",
    bindings: &[
        Binding::new("features-content", Shape::Features),
        Binding::new("instructions-content", Shape::Instructions),
        Binding::new("adventurer-testimonials-content", Shape::Testimonials),
        Binding::new("adventurer-text-content", Shape::AdventurerText),
        Binding::new("animals-boosters-content", Shape::Animals),
        Binding::new("safari-journey-content", Shape::SafariJourney),
        Binding::new("progress-content", Shape::Levels),
    ],
};

pub const UPDATES_CONTENT: ContentFile = ContentFile {
    file: "updates-content.json",
    bindings: &[
        Binding::new("enhancements-content", Shape::Enhancements),
        Binding::new("diaries-content", Shape::Diaries),
    ],
};

pub const CONTACT_CONTENT: ContentFile = ContentFile {
    file: "contact-content.json",
    bindings: &[Binding::new("contact-details-content", Shape::Contact)],
};

/// Everything needed to fill in pages, shared by all pages of a build.
pub struct SiteContext<S> {
    pub fetcher: ContentFetcher<S>,
    pub fragments: FragmentOptions,
    pub fallback: FallbackMode,
    pub menu: Arc<dyn MenuInitializer>,
    pub interactions: Vec<Interaction>,
}

impl<S: ContentSource> SiteContext<S> {
    pub fn new(fetcher: ContentFetcher<S>) -> Self {
        Self {
            fetcher,
            fragments: FragmentOptions::default(),
            fallback: FallbackMode::default(),
            menu: Arc::new(ScriptedMenu),
            interactions: Interaction::ALL.to_vec(),
        }
    }
}

/// Fills in a page: fragments first, then every placeholder of the page's plan, then the
/// interaction scripts.
///
/// Each content file is fetched once and all files are fetched concurrently. Each placeholder is
/// written exactly once, with its rendered section or its fallback. Placeholders the page does not
/// have are skipped.
pub async fn load_page_content<S: ContentSource>(
    context: &SiteContext<S>,
    page: &mut Page,
) -> (PageKind, Diagnostics) {
    let mut diagnostics = Diagnostics::new(page.url());
    let kind = PageKind::resolve(page.url(), &mut diagnostics);

    load_templates(
        context.fetcher.source(),
        page,
        &context.fragments,
        context.menu.as_ref(),
        &mut diagnostics,
    )
    .await;

    let plan = kind.plan();
    let documents = join_all(
        plan.iter()
            .map(|content| context.fetcher.fetch_document(content.file)),
    )
    .await;

    for (content, document) in plan.iter().zip(documents) {
        for binding in content.bindings {
            if !page.has_target(binding.target) {
                debug!(target: "content", "{} has no #{}, skipping", page.url(), binding.target);
                continue;
            }

            match &document {
                Ok(document) if provides(document, binding.shape) => {
                    let result = render_shape(document, binding.shape)
                        .and_then(|markup| assign(page, binding.target, markup));
                    if let Err(err) = result {
                        fall_back(context, page, &mut diagnostics, content.file, binding.target, error_chain(&err));
                    }
                }
                Ok(document) => {
                    diagnostics.push(DiagnosticKind::UnknownShape {
                        file: document.file().to_string(),
                        target: binding.target.to_string(),
                    });
                    show_error_content(page, binding.target, context.fallback);
                }
                Err(err) => {
                    fall_back(context, page, &mut diagnostics, content.file, binding.target, error_chain(err));
                }
            }
        }

        if document.is_ok() {
            info!(target: "content", "{} loaded for {}", content.file, page.url());
        }
    }

    if let Err(err) = install_interactions(page, &context.interactions) {
        error!(target: "pages", "Could not add scripts to {}: {}", page.url(), err);
    }

    (kind, diagnostics)
}

/// Whether the document has what a binding renders. Animals and boosters are rendered together, so
/// either list is enough for both.
fn provides(document: &ContentDocument, shape: Shape) -> bool {
    match shape {
        Shape::Animals | Shape::Boosters => {
            document.has(Shape::Animals) || document.has(Shape::Boosters)
        }
        _ => document.has(shape),
    }
}

fn fall_back<S>(
    context: &SiteContext<S>,
    page: &mut Page,
    diagnostics: &mut Diagnostics,
    file: &str,
    target: &str,
    reason: String,
) {
    diagnostics.push(DiagnosticKind::ContentFailed {
        file: file.to_string(),
        target: target.to_string(),
        reason,
    });
    show_error_content(page, target, context.fallback);
}
