//! What a placeholder shows when its content could not be loaded.
use log::error;
use maud::{Markup, PreEscaped, html};

use crate::page::Page;

pub const ERROR_MESSAGE: &str =
    r#"<p class="error-message">❌ Content loading failed. Please refresh the page.</p>"#;

pub const FALLBACK_EMAIL: &str = "hello@safarimatch.com";
pub const FALLBACK_PHONE: &str = "+1 (555) 723-7274";
pub const FALLBACK_ADDRESS: &str = "27 Acacia Avenue, Savanna Heights";

/// How failed placeholders are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Always show [`ERROR_MESSAGE`].
    ErrorMessage,
    /// Show the static block from [`fallback_for`], or a loading notice for targets without one.
    #[default]
    FallbackTable,
}

/// The static content shown in place of a known section.
pub fn fallback_for(target: &str) -> Option<Markup> {
    let markup = match target {
        "features-content" => html! {
            div.feature-card.safari-levels {
                div.feature-icon { "🎯" }
                h3.feature-title { "500+ Exciting Levels" }
                p.feature-description { "Puzzle your way across the savanna, one match at a time." }
            }
            div.feature-card.safari-animals {
                div.feature-icon { "🦁" }
                h3.feature-title { "Wild Animals" }
                p.feature-description { "Lions, elephants and giraffes join every adventure." }
            }
        },
        "instructions-content" => html! {
            div.instruction-step {
                div.step-number { "1" }
                h3 { "Match Animals" }
                p { "Line up three or more identical animals to clear them." }
            }
            div.instruction-step {
                div.step-number { "2" }
                h3 { "Use Boosters" }
                p { "Big matches charge boosters that clear whole rows." }
            }
        },
        "adventurer-testimonials-content" => html! {
            div.adventurer-testimonial-card {
                p.adventurer-testimonial-text { "The best puzzle safari I have ever played!" }
                div.adventurer-name { "- A happy adventurer" }
            }
        },
        "animals-boosters-content" => html! {
            div.animal-card {
                h3.animal-name { "Lion" }
                p.animal-description { "King of the savanna and of every puzzle board." }
            }
        },
        "enhancements-content" => html! {
            div.enhancement-card {
                div.enhancement-icon { "🌿" }
                h3.enhancement-title { "Fresh Updates Coming Soon" }
                p.enhancement-description { "New levels and animals are on their way." }
            }
        },
        "diaries-content" => html! {
            div.diary-card {
                div.diary-icon { "📔" }
                h3.diary-title { "Adventure Diaries" }
                p.diary-story { "Stories from fellow adventurers will appear here." }
            }
        },
        "contact-details-content" => html! {
            div.contact-item {
                div.contact-icon { "📧" }
                div {
                    strong { "Email:" } " "
                    a.safari-link href={ "mailto:" (FALLBACK_EMAIL) } { (FALLBACK_EMAIL) }
                }
            }
            div.contact-item {
                div.contact-icon { "📞" }
                div {
                    strong { "Phone:" } " "
                    a.safari-link href={ "tel:" (FALLBACK_PHONE) } { (FALLBACK_PHONE) }
                }
            }
            div.contact-item {
                div.contact-icon { "📍" }
                div {
                    strong { "Address:" } " " (FALLBACK_ADDRESS)
                }
            }
        },
        _ => return None,
    };

    Some(markup)
}

pub fn loading_placeholder() -> Markup {
    html! { p.loading-message { "Loading…" } }
}

/// The markup a failed target receives under the given mode.
pub fn fallback_markup(mode: FallbackMode, target: &str) -> Markup {
    match mode {
        FallbackMode::ErrorMessage => PreEscaped(ERROR_MESSAGE.to_string()),
        FallbackMode::FallbackTable => fallback_for(target).unwrap_or_else(loading_placeholder),
    }
}

/// Puts the target into its failure state. Does nothing if the page has no such element.
pub fn show_error_content(page: &mut Page, target: &str, mode: FallbackMode) {
    if !page.has_target(target) {
        return;
    }

    let markup = fallback_markup(mode, target).into_string();
    if let Err(err) = page.set_inner_html(target, &markup) {
        error!(target: "content", "Could not show fallback for #{}: {}", target, err);
    }
}
