use maud::{Markup, html};

use crate::content::{Contact, TextBlock};

pub fn render_contact(contact: &Contact) -> Markup {
    html! {
        div.contact-item {
            div.contact-icon { "📧" }
            div {
                strong { "Email:" } " "
                a.safari-link href={ "mailto:" (contact.email) } { (contact.email) }
            }
        }
        div.contact-item {
            div.contact-icon { "📞" }
            div {
                strong { "Phone:" } " "
                a.safari-link href={ "tel:" (contact.phone) } { (contact.phone) }
            }
        }
        div.contact-item {
            div.contact-icon { "📍" }
            div {
                strong { "Address:" } " " (contact.address)
            }
        }
        div.contact-item {
            div.contact-icon { "🕒" }
            div {
                strong { "Business Hours:" } " " (contact.hours)
            }
        }
        div.contact-item {
            div.contact-icon { "🆘" }
            div {
                strong { "Support:" } " "
                a.safari-link href={ "mailto:" (contact.support) } { (contact.support) }
            }
        }
    }
}

/// Disclaimers and policies are stored pre-formatted and placed as-is.
pub fn render_text_block(block: &TextBlock) -> Markup {
    html! { (block.text) }
}
