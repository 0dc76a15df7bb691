//! Shared header and footer fragments.
use log::info;

use crate::content::ContentSource;
use crate::diagnostics::{DiagnosticKind, Diagnostics, error_chain};
use crate::errors::FragmentError;
use crate::interactions::MenuInitializer;
use crate::page::Page;

pub const HEADER_PLACEHOLDER: &str = "safari-header-placeholder";
pub const FOOTER_PLACEHOLDER: &str = "savanna-footer-placeholder";

/// Where the fragments are fetched from, relative to the site root.
#[derive(Debug, Clone)]
pub struct FragmentOptions {
    pub header: String,
    pub footer: String,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            header: "safari-header.html".into(),
            footer: "savanna-footer.html".into(),
        }
    }
}

impl FragmentOptions {
    /// Whether a site file is one of the fragments rather than a page.
    pub fn is_fragment(&self, file_name: &str) -> bool {
        file_name == self.header || file_name == self.footer
    }
}

/// Places the header and footer fragments into their placeholders, then initializes the menu.
///
/// Both fragments are fetched concurrently and written only once both are available, so a failure
/// leaves both placeholders as they were. Failures are recorded in `diagnostics`, never returned.
/// Returns whether the fragments were placed.
pub async fn load_templates<S: ContentSource>(
    source: &S,
    page: &mut Page,
    options: &FragmentOptions,
    menu: &dyn MenuInitializer,
    diagnostics: &mut Diagnostics,
) -> bool {
    if let Err(err) = place_fragments(source, page, options).await {
        let fragment = match &err {
            FragmentError::Fetch { fragment, .. } => fragment.clone(),
            FragmentError::Page(_) => format!("{} / {}", options.header, options.footer),
        };
        diagnostics.push(DiagnosticKind::FragmentFailed {
            fragment,
            reason: error_chain(&err),
        });
        return false;
    }

    info!(target: "fragments", "Templates loaded into {}", page.url());

    if let Err(err) = menu.initialize(page) {
        diagnostics.push(DiagnosticKind::FragmentFailed {
            fragment: options.header.clone(),
            reason: format!("menu initialization failed: {}", err),
        });
    }

    true
}

async fn place_fragments<S: ContentSource>(
    source: &S,
    page: &mut Page,
    options: &FragmentOptions,
) -> Result<(), FragmentError> {
    let (header, footer) = tokio::join!(source.fetch(&options.header), source.fetch(&options.footer));

    let header = header.map_err(|source| FragmentError::Fetch {
        fragment: options.header.clone(),
        source,
    })?;
    let footer = footer.map_err(|source| FragmentError::Fetch {
        fragment: options.footer.clone(),
        source,
    })?;

    for target in [HEADER_PLACEHOLDER, FOOTER_PLACEHOLDER] {
        if !page.has_target(target) {
            return Err(crate::errors::PageError::MissingTarget {
                target: target.to_string(),
            }
            .into());
        }
    }

    page.set_inner_html(HEADER_PLACEHOLDER, &header)?;
    page.set_inner_html(FOOTER_PLACEHOLDER, &footer)?;

    Ok(())
}
