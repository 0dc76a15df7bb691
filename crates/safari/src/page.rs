//! An HTML page being filled in, addressed through the ids of its placeholder elements.
use std::cell::Cell;

use lol_html::{RewriteStrSettings, element, html_content::ContentType, rewrite_str};
use log::debug;
use rustc_hash::FxHashMap;

use crate::errors::PageError;

/// A page of the site, holding its current markup.
///
/// Every edit rewrites the whole document, so a `Page` always holds complete, serializable HTML.
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    html: String,
    writes: FxHashMap<String, usize>,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            writes: FxHashMap::default(),
        }
    }

    /// The URL path this page is served at, e.g. `/safari-updates.html`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether an element with the given id exists in the page.
    pub fn has_target(&self, id: &str) -> bool {
        let found = Cell::new(false);
        let selector = target_selector(id);

        let result = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(selector, |_el| {
                    found.set(true);
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        );

        if let Err(err) = result {
            debug!(target: "pages", "Could not scan {} for #{}: {}", self.url, id, err);
        }

        found.get()
    }

    /// Replaces the children of the element with the given id by `html`.
    ///
    /// The page is left untouched if no such element exists.
    pub fn set_inner_html(&mut self, id: &str, html: &str) -> Result<(), PageError> {
        let matched = Cell::new(false);
        let selector = target_selector(id);

        let output = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(selector, |el| {
                    el.set_inner_content(html, ContentType::Html);
                    matched.set(true);
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )?;

        if !matched.get() {
            return Err(PageError::MissingTarget {
                target: id.to_string(),
            });
        }

        self.html = output;
        *self.writes.entry(id.to_string()).or_default() += 1;

        Ok(())
    }

    /// Appends markup at the end of `<body>`, or at the end of the document if there is none.
    pub fn append_to_body(&mut self, html: &str) -> Result<(), PageError> {
        let has_body = Cell::new(false);

        let output = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("body", |el| {
                    if !has_body.get() {
                        el.append(html, ContentType::Html);
                        has_body.set(true);
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )?;

        self.html = if has_body.get() {
            output
        } else {
            format!("{}{}", output, html)
        };

        Ok(())
    }

    /// How many times the element with the given id has been assigned content.
    pub fn writes(&self, id: &str) -> usize {
        self.writes.get(id).copied().unwrap_or(0)
    }
}

fn target_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{}\"]", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><div id="features-content"><p>old</p></div><footer id="savanna-footer-placeholder"></footer></body></html>"#;

    #[test]
    fn test_has_target() {
        let page = Page::new("/", PAGE);
        assert!(page.has_target("features-content"));
        assert!(!page.has_target("diaries-content"));
    }

    #[test]
    fn test_has_target_escapes_id() {
        let page = Page::new("/", r#"<div id='say "hi"'></div>"#);
        assert!(page.has_target(r#"say "hi""#));
        assert!(!page.has_target(r#"say \"#));
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let mut page = Page::new("/", PAGE);
        page.set_inner_html("features-content", "<span>new</span>")
            .unwrap();

        assert!(page.html().contains(r#"<div id="features-content"><span>new</span></div>"#));
        assert!(!page.html().contains("<p>old</p>"));
        assert_eq!(page.writes("features-content"), 1);
    }

    #[test]
    fn test_set_inner_html_is_idempotent() {
        let mut page = Page::new("/", PAGE);
        page.set_inner_html("features-content", "<b>x</b>").unwrap();
        let first = page.html().to_string();
        page.set_inner_html("features-content", "<b>x</b>").unwrap();

        assert_eq!(page.html(), first);
        assert_eq!(page.writes("features-content"), 2);
    }

    #[test]
    fn test_set_inner_html_missing_target() {
        let mut page = Page::new("/", PAGE);
        let result = page.set_inner_html("diaries-content", "<b>x</b>");

        assert!(matches!(result, Err(PageError::MissingTarget { .. })));
        assert_eq!(page.html(), PAGE);
        assert_eq!(page.writes("diaries-content"), 0);
    }

    #[test]
    fn test_append_to_body() {
        let mut page = Page::new("/", PAGE);
        page.append_to_body("<script>1</script>").unwrap();
        assert!(page.html().ends_with("<script>1</script></body></html>"));
    }

    #[test]
    fn test_append_without_body() {
        let mut page = Page::new("/", "<div></div>");
        page.append_to_body("<script>1</script>").unwrap();
        assert_eq!(page.html(), "<div></div><script>1</script>");
    }
}
