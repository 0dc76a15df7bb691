//! Browser-side behaviour shipped with every page: mobile menu, cookie banner, contact form and
//! smooth scrolling.
//!
//! The scripts are embedded in the crate and inlined at the end of `<body>`. Each one publishes its
//! entry points on `window.SafariMatch` so page-specific code can call them.
use std::borrow::Cow;

use maud::{PreEscaped, html};

use crate::errors::PageError;
use crate::page::Page;

const MOBILE_MENU_SCRIPT: &str = include_str!("../js/mobile-menu.js");
const COOKIE_BANNER_SCRIPT: &str = include_str!("../js/cookie-banner.js");
const CONTACT_FORM_SCRIPT: &str = include_str!("../js/contact-form.js");
const SMOOTH_SCROLL_SCRIPT: &str = include_str!("../js/smooth-scroll.js");

/// Browser storage key holding `"true"` once the visitor accepted cookies.
pub const COOKIE_CONSENT_KEY: &str = "safari-cookies-accepted";

/// Wires up the navigation menu once the header fragment is in place.
///
/// Passed in through [`SiteOptions::menu`](crate::SiteOptions::menu), so sites can swap in their own
/// menu behaviour or disable it.
pub trait MenuInitializer: Send + Sync {
    fn initialize(&self, page: &mut Page) -> Result<(), PageError>;
}

/// The default menu: burger toggle, closing on Escape, outside clicks, overlay clicks and link
/// clicks, with page scrolling locked while open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedMenu;

impl MenuInitializer for ScriptedMenu {
    fn initialize(&self, page: &mut Page) -> Result<(), PageError> {
        page.append_to_body(&script_tag(MOBILE_MENU_SCRIPT))
    }
}

/// Leaves the menu alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMenu;

impl MenuInitializer for NoMenu {
    fn initialize(&self, _page: &mut Page) -> Result<(), PageError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    CookieBanner,
    ContactForm,
    SmoothScroll,
}

impl Interaction {
    pub const ALL: [Interaction; 3] = [
        Interaction::CookieBanner,
        Interaction::ContactForm,
        Interaction::SmoothScroll,
    ];

    pub fn script(self) -> Cow<'static, str> {
        match self {
            Interaction::CookieBanner => Cow::Owned(
                COOKIE_BANNER_SCRIPT.replace("__COOKIE_CONSENT_KEY__", COOKIE_CONSENT_KEY),
            ),
            Interaction::ContactForm => Cow::Borrowed(CONTACT_FORM_SCRIPT),
            Interaction::SmoothScroll => Cow::Borrowed(SMOOTH_SCROLL_SCRIPT),
        }
    }
}

/// Appends the scripts of the given interactions to the page, in order, as a single `<script>`.
pub fn install_interactions(page: &mut Page, interactions: &[Interaction]) -> Result<(), PageError> {
    if interactions.is_empty() {
        return Ok(());
    }

    let mut interactions = interactions.to_vec();
    interactions.dedup();

    let source = interactions
        .iter()
        .map(|interaction| interaction.script())
        .collect::<Vec<_>>()
        .join("\n");

    page.append_to_body(&script_tag(&source))
}

fn script_tag(source: &str) -> String {
    html! { script { (PreEscaped(source)) } }.into_string()
}
