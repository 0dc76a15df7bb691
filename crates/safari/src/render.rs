//! Turns content documents into markup for the page's placeholders.
//!
//! Each section of a content file has a dedicated renderer producing one [`Markup`] from its
//! records, in order. A target is always assigned from a fully rendered string, so a failure while
//! rendering never leaves a placeholder half-filled.
use log::debug;
use maud::Markup;
use serde_json::Value;

use crate::content::{
    Contact, ContentDocument, Diary, Enhancement, Feature, Instruction, Level, RosterEntry,
    SafariJourney, Shape, Testimonial, Text, TextBlock,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::errors::ContentError;
use crate::page::Page;

mod contact;
mod home;
mod updates;

pub use contact::{render_contact, render_text_block};
pub use home::{
    feature_theme, render_adventurer_text, render_features, render_instructions, render_levels,
    render_roster, render_safari_journey, render_testimonials,
};
pub use updates::{render_diaries, render_enhancements};

/// Renders the first known section of the document, or `None` if it has none.
pub fn render_document(document: &ContentDocument) -> Result<Option<Markup>, ContentError> {
    document
        .shape()
        .map(|shape| render_shape(document, shape))
        .transpose()
}

/// Renders one specific section of the document.
///
/// Animals and boosters are rendered together: asking for either one renders both lists of the
/// document as a single roster.
pub fn render_shape(document: &ContentDocument, shape: Shape) -> Result<Markup, ContentError> {
    let markup = match shape {
        Shape::Features => render_features(&document.section::<Vec<Feature>>(shape)?),
        Shape::Instructions => render_instructions(&document.section::<Vec<Instruction>>(shape)?),
        Shape::Testimonials => render_testimonials(&document.section::<Vec<Testimonial>>(shape)?),
        Shape::AdventurerText => render_adventurer_text(&document.section::<Vec<Text>>(shape)?),
        Shape::Animals | Shape::Boosters => render_roster(&roster(document, None)?),
        Shape::Levels => render_levels(&document.section::<Vec<Level>>(shape)?),
        Shape::SafariJourney => render_safari_journey(&document.section::<SafariJourney>(shape)?),
        Shape::Enhancements => render_enhancements(&document.section::<Vec<Enhancement>>(shape)?),
        Shape::Diaries => render_diaries(&document.section::<Vec<Diary>>(shape)?),
        Shape::Contact => render_contact(&document.section::<Contact>(shape)?),
        Shape::Disclaimer | Shape::CookiePolicy | Shape::PrivacyPolicy => {
            render_text_block(&document.section::<TextBlock>(shape)?)
        }
    };

    Ok(markup)
}

/// Builds the combined animals and boosters list: the document's animals, followed by the boosters
/// of `boosters` if given, or else the document's own boosters.
///
/// Each entry's kind is decided by [`RecordKind::of`](crate::content::RecordKind::of), whichever
/// list it came from.
pub fn roster(
    document: &ContentDocument,
    boosters: Option<&ContentDocument>,
) -> Result<Vec<RosterEntry>, ContentError> {
    let boosters = boosters.unwrap_or(document);

    let animals = list(document, Shape::Animals)?;
    let boosters = list(boosters, Shape::Boosters)?;

    animals
        .into_iter()
        .chain(boosters)
        .map(|record| {
            RosterEntry::from_value(record).map_err(|source| ContentError::ShapeMismatch {
                shape: Shape::Animals,
                source,
            })
        })
        .collect()
}

fn list(document: &ContentDocument, shape: Shape) -> Result<Vec<Value>, ContentError> {
    if document.has(shape) {
        document.section(shape)
    } else {
        Ok(Vec::new())
    }
}

/// Renders the document into the page element with id `target`, replacing its content.
///
/// Nothing is written when the page has no such element or when the document has no known
/// section. Both cases are recorded in `diagnostics`.
pub fn render_content(
    document: &ContentDocument,
    page: &mut Page,
    target: &str,
    diagnostics: &mut Diagnostics,
) -> Result<(), ContentError> {
    if !page.has_target(target) {
        diagnostics.push(DiagnosticKind::MissingTarget {
            target: target.to_string(),
        });
        return Ok(());
    }

    match render_document(document)? {
        Some(markup) => assign(page, target, markup),
        None => {
            debug!(target: "content", "{}", document.unknown_shape_error());
            diagnostics.push(DiagnosticKind::UnknownShape {
                file: document.file().to_string(),
                target: target.to_string(),
            });
            Ok(())
        }
    }
}

pub(crate) fn assign(page: &mut Page, target: &str, markup: Markup) -> Result<(), ContentError> {
    page.set_inner_html(target, &markup.into_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RecordKind;

    const TARGET_PAGE: &str = r#"<main><section id="features-content"></section></main>"#;

    fn document(raw: &str) -> ContentDocument {
        ContentDocument::parse("test.json", raw).unwrap()
    }

    #[test]
    fn test_render_feature_scenario() {
        let doc = document(
            r#"{"features":[{"icon":"🎯","title":"500+ Exciting Levels","description":"..."}]}"#,
        );
        let mut page = Page::new("/", TARGET_PAGE);
        let mut diagnostics = Diagnostics::new("/");

        render_content(&doc, &mut page, "features-content", &mut diagnostics).unwrap();

        let html = page.html();
        assert_eq!(html.matches("feature-card").count(), 1);
        let icon = html.find("🎯").unwrap();
        let title = html.find("500+ Exciting Levels").unwrap();
        let description = html.find("...").unwrap();
        assert!(icon < title && title < description);
        assert_eq!(page.writes("features-content"), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_render_document_with_loose_values() {
        let doc = document(
            r#"{"features":"","levels":[{"number":1,"name":"Plains","completed":1}]}"#,
        );

        let markup = render_document(&doc).unwrap().unwrap().into_string();

        assert!(markup.contains("level-table"));
        assert!(markup.contains("✅ Completed"));
    }

    #[test]
    fn test_every_shape_has_a_renderer() {
        let samples = [
            (Shape::Features, r#"{"features":[{"title":"t"}]}"#, "feature-card"),
            (Shape::Instructions, r#"{"instructions":[{"title":"t"}]}"#, "instruction-step"),
            (Shape::Testimonials, r#"{"testimonials":[{"name":"n"}]}"#, "adventurer-testimonial-card"),
            (Shape::AdventurerText, r#"{"adventurer-text":["p"]}"#, "adventurer-text-paragraph"),
            (Shape::Animals, r#"{"animals":[{"special_ability":"s"}]}"#, "animal-card"),
            (Shape::Boosters, r#"{"boosters":[{"effect":"e"}]}"#, "booster-card"),
            (Shape::Levels, r#"{"levels":[]}"#, "level-table"),
            (Shape::SafariJourney, r#"{"safari-journey":{}}"#, "safari-journey-container"),
            (Shape::Enhancements, r#"{"enhancements":[{}]}"#, "enhancement-card"),
            (Shape::Diaries, r#"{"diaries":[{}]}"#, "diary-card"),
            (Shape::Contact, r#"{"contact":{}}"#, "contact-item"),
            (Shape::Disclaimer, r#"{"disclaimer":{"text":"<p class=\"disclaimer\">x</p>"}}"#, "disclaimer"),
            (Shape::CookiePolicy, r#"{"cookiePolicy":{"text":"<p class=\"cookies\">x</p>"}}"#, "cookies"),
            (Shape::PrivacyPolicy, r#"{"privacyPolicy":{"text":"<p class=\"privacy\">x</p>"}}"#, "privacy"),
        ];

        for (shape, raw, marker) in samples {
            let doc = document(raw);
            assert_eq!(doc.shape(), Some(shape));

            let markup = render_document(&doc).unwrap().unwrap().into_string();
            assert!(markup.contains(marker), "{:?} rendered {}", shape, markup);
        }
    }

    #[test]
    fn test_render_is_order_preserving() {
        let doc = document(
            r#"{"features":[{"title":"Zebra"},{"title":"Aardvark"},{"title":"Zebra"}]}"#,
        );
        let markup = render_document(&doc).unwrap().unwrap().into_string();

        let titles: Vec<_> = markup
            .match_indices(r#"<h3 class="feature-title">"#)
            .map(|(index, tag)| &markup[index + tag.len()..index + tag.len() + 5])
            .collect();
        assert_eq!(titles, ["Zebra", "Aardv", "Zebra"]);
    }

    #[test]
    fn test_render_content_overwrites_without_accumulating() {
        let doc = document(r#"{"diaries":[{"title":"Day one"}]}"#);
        let mut page = Page::new("/", r#"<div id="diaries-content"></div>"#);
        let mut diagnostics = Diagnostics::new("/");

        render_content(&doc, &mut page, "diaries-content", &mut diagnostics).unwrap();
        let first = page.html().to_string();
        render_content(&doc, &mut page, "diaries-content", &mut diagnostics).unwrap();

        assert_eq!(page.html(), first);
        assert_eq!(page.html().matches("diary-card").count(), 1);
    }

    #[test]
    fn test_render_content_unknown_shape_is_reported() {
        let doc = document(r#"{"hero":{"title":"Safari"}}"#);
        let mut page = Page::new("/", TARGET_PAGE);
        let mut diagnostics = Diagnostics::new("/");

        render_content(&doc, &mut page, "features-content", &mut diagnostics).unwrap();

        assert_eq!(page.html(), TARGET_PAGE);
        assert_eq!(page.writes("features-content"), 0);
        assert!(matches!(
            diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::UnknownShape { .. })
        ));
    }

    #[test]
    fn test_render_content_missing_target_is_reported() {
        let doc = document(r#"{"features":[]}"#);
        let mut page = Page::new("/", TARGET_PAGE);
        let mut diagnostics = Diagnostics::new("/");

        render_content(&doc, &mut page, "diaries-content", &mut diagnostics).unwrap();

        assert_eq!(page.html(), TARGET_PAGE);
        assert!(matches!(
            diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::MissingTarget { target }) if target == "diaries-content"
        ));
    }

    #[test]
    fn test_render_content_mismatch_writes_nothing() {
        let doc = document(r#"{"features":{"not":"a list"}}"#);
        let mut page = Page::new("/", TARGET_PAGE);
        let mut diagnostics = Diagnostics::new("/");

        let result = render_content(&doc, &mut page, "features-content", &mut diagnostics);

        assert!(matches!(result, Err(ContentError::ShapeMismatch { .. })));
        assert_eq!(page.writes("features-content"), 0);
    }

    #[test]
    fn test_roster_classifies_regardless_of_order() {
        let animal = r#"{"name":"Lion","special_ability":"Roar Blast"}"#;
        let booster = r#"{"name":"Thunder","effect":"Clears a row"}"#;

        // Both records listed under `animals`, in either order.
        for raw in [
            format!(r#"{{"animals":[{},{}]}}"#, animal, booster),
            format!(r#"{{"animals":[{},{}]}}"#, booster, animal),
        ] {
            let entries = roster(&document(&raw), None).unwrap();
            let kinds: Vec<_> = entries.iter().map(RosterEntry::kind).collect();
            let names: Vec<_> = entries
                .iter()
                .map(|entry| match entry {
                    RosterEntry::Animal(animal) => animal.name.to_string(),
                    RosterEntry::Booster(booster) => booster.name.to_string(),
                })
                .collect();

            for (kind, name) in kinds.iter().zip(&names) {
                let expected = if name == "Lion" {
                    RecordKind::Animal
                } else {
                    RecordKind::Booster
                };
                assert_eq!(*kind, expected);
            }
        }
    }

    #[test]
    fn test_roster_merges_animals_then_boosters() {
        let doc = document(
            r#"{"animals":[{"name":"Lion","special_ability":"Roar"}],"boosters":[{"name":"Thunder"}]}"#,
        );
        let markup = render_shape(&doc, Shape::Animals).unwrap().into_string();

        let lion = markup.find(r#"<div class="animal-card"><h3 class="animal-name">Lion</h3>"#);
        let thunder = markup.find(r#"<div class="booster-card"><h3 class="booster-name">Thunder</h3>"#);
        assert!(lion.unwrap() < thunder.unwrap());
    }

    #[test]
    fn test_roster_takes_boosters_from_shared_document() {
        let animals = document(r#"{"animals":[{"name":"Lion","special_ability":"Roar"}]}"#);
        let shared = ContentDocument::parse(
            "home-content.json",
            r#"{"boosters":[{"name":"Thunder"},{"name":"Sandstorm"}]}"#,
        )
        .unwrap();

        let entries = roster(&animals, Some(&shared)).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind(), RecordKind::Animal);
        assert_eq!(entries[2].kind(), RecordKind::Booster);
    }
}
