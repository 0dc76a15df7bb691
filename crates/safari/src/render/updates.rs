use maud::{Markup, html};

use crate::content::{Diary, Enhancement};

pub fn render_enhancements(enhancements: &[Enhancement]) -> Markup {
    html! {
        @for enhancement in enhancements {
            div.enhancement-card {
                div.enhancement-icon { (enhancement.icon) }
                h3.enhancement-title { (enhancement.title) }
                p.enhancement-description { (enhancement.description) }
                div.enhancement-version { "Version: " (enhancement.version) }
            }
        }
    }
}

pub fn render_diaries(diaries: &[Diary]) -> Markup {
    html! {
        @for diary in diaries {
            div.diary-card {
                div.diary-icon { (diary.icon) }
                h3.diary-title { (diary.title) }
                p.diary-story { (diary.story) }
                div.diary-player { "Player: " (diary.player) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_enhancements() {
        let enhancements: Vec<Enhancement> = serde_json::from_value(json!([
            {"icon": "🌙", "title": "Night Safari", "description": "New night levels", "version": "2.1"}
        ]))
        .unwrap();

        assert_eq!(
            render_enhancements(&enhancements).into_string(),
            r#"<div class="enhancement-card"><div class="enhancement-icon">🌙</div><h3 class="enhancement-title">Night Safari</h3><p class="enhancement-description">New night levels</p><div class="enhancement-version">Version: 2.1</div></div>"#
        );
    }

    #[test]
    fn test_render_diaries_keeps_order() {
        let diaries: Vec<Diary> = serde_json::from_value(json!([
            {"title": "Day one", "player": "Kofi"},
            {"title": "Day two", "player": "Lena"},
            {"title": "Day three", "player": "Kofi"}
        ]))
        .unwrap();
        let markup = render_diaries(&diaries).into_string();

        let one = markup.find("Day one").unwrap();
        let two = markup.find("Day two").unwrap();
        let three = markup.find("Day three").unwrap();
        assert!(one < two && two < three);
        assert_eq!(markup.matches("diary-card").count(), 3);
    }
}
