use maud::{Markup, html};

use crate::content::{
    Feature, Instruction, Level, RosterEntry, SafariJourney, Testimonial, Text,
};

/// Picks the themed card variant from keywords in the feature title.
pub fn feature_theme(title: &Text) -> Option<&'static str> {
    const THEMES: [(&[&str], &str); 6] = [
        (&["Level", "500+"], "safari-levels"),
        (&["Animal", "Wild"], "safari-animals"),
        (&["Booster", "Power"], "safari-boosters"),
        (&["Graphics", "Safari"], "safari-graphics"),
        (&["Achievement", "Progress"], "safari-achievements"),
        (&["Game Mode", "Mode"], "safari-modes"),
    ];

    THEMES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, theme)| *theme)
}

pub fn render_features(features: &[Feature]) -> Markup {
    html! {
        @for feature in features {
            @let class = match feature_theme(&feature.title) {
                Some(theme) => format!("feature-card {}", theme),
                None => "feature-card".to_string(),
            };
            div class=(class) {
                div.feature-icon { (feature.icon) }
                h3.feature-title { (feature.title) }
                p.feature-description { (feature.description) }
            }
        }
    }
}

pub fn render_instructions(instructions: &[Instruction]) -> Markup {
    html! {
        @for (index, instruction) in instructions.iter().enumerate() {
            div.instruction-step {
                div.step-number { (index + 1) }
                h3 { (instruction.title) }
                p { (instruction.description) }
            }
        }
    }
}

pub fn render_testimonials(testimonials: &[Testimonial]) -> Markup {
    html! {
        @for testimonial in testimonials {
            div.adventurer-testimonial-card {
                p.adventurer-testimonial-text { (testimonial.comment) }
                div.adventurer-name { "- " (testimonial.name) }
            }
        }
    }
}

pub fn render_adventurer_text(paragraphs: &[Text]) -> Markup {
    html! {
        @for paragraph in paragraphs {
            p.adventurer-text-paragraph { (paragraph) }
        }
    }
}

/// Renders animals and boosters as one list, each entry with the card matching its kind.
pub fn render_roster(entries: &[RosterEntry]) -> Markup {
    html! {
        @for entry in entries {
            @match entry {
                RosterEntry::Animal(animal) => {
                    div.animal-card {
                        h3.animal-name { (animal.name) }
                        p.animal-description { (animal.description) }
                        div.animal-details {
                            div.animal-power { "Power Level: " (animal.power) }
                            div.animal-ability { (animal.special_ability) }
                            div.animal-habitat { "Habitat: " (animal.habitat) }
                            div.animal-strategy { "Strategy: " (animal.strategy) }
                        }
                    }
                }
                RosterEntry::Booster(booster) => {
                    div.booster-card {
                        h3.booster-name { (booster.name) }
                        p.booster-description { (booster.description) }
                        div.booster-details {
                            div.booster-effect { "Effect: " (booster.effect) }
                            div.booster-power { "Power Level: " (booster.power_level) }
                            div.booster-best-use { "Best Use: " (booster.best_use) }
                            div.booster-strategy { "Strategy: " (booster.strategy) }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_levels(levels: &[Level]) -> Markup {
    html! {
        div.level-table {
            @for level in levels {
                div.level-row {
                    div.level-number { (level.number) }
                    div.level-name { (level.name) }
                    @if level.completed {
                        div class="level-status status-completed" { "✅ Completed" }
                    } @else {
                        div class="level-status status-locked" { "🔒 Locked" }
                    }
                }
            }
        }
    }
}

pub fn render_safari_journey(journey: &SafariJourney) -> Markup {
    let milestone = &journey.next_milestone;

    html! {
        div.safari-journey-container {
            div.safari-journey-header {
                h3.journey-title { (journey.title) }
                p.journey-subtitle { (journey.subtitle) }
            }
            div.journey-stats-grid {
                @for stat in &journey.stats {
                    div.journey-stat-card {
                        div.stat-icon { (stat.icon) }
                        div.stat-content {
                            div.stat-value { (stat.value) }
                            div.stat-label { (stat.label) }
                            div.stat-description { (stat.description) }
                        }
                    }
                }
            }
            div.journey-achievements {
                h4.achievements-title { "Achievements Unlocked" }
                div.achievements-grid {
                    @for achievement in &journey.achievements {
                        div class={ "achievement-item " (if achievement.unlocked { "unlocked" } else { "locked" }) } {
                            div.achievement-status {
                                @if achievement.unlocked { "🏆" } @else { "🔒" }
                            }
                            div.achievement-content {
                                div.achievement-name { (achievement.name) }
                                div.achievement-description { (achievement.description) }
                                div.achievement-progress { (achievement.progress) }
                            }
                        }
                    }
                }
            }
            div.next-milestone {
                h4.milestone-title { (milestone.title) }
                p.milestone-description { (milestone.description) }
                div.milestone-progress {
                    div.progress-bar {
                        div.progress-fill style={ "width: " (milestone.progress) } {}
                    }
                    div.progress-text {
                        (milestone.progress) " Complete • " (milestone.levels_remaining) " levels remaining"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(title: &str) -> Feature {
        serde_json::from_value(json!({"icon": "🎯", "title": title, "description": "d"})).unwrap()
    }

    #[test]
    fn test_feature_theme_keywords() {
        assert_eq!(feature_theme(&"500+ Exciting Levels".into()), Some("safari-levels"));
        assert_eq!(feature_theme(&"Wild Animals".into()), Some("safari-animals"));
        assert_eq!(feature_theme(&"Power Boosters".into()), Some("safari-boosters"));
        assert_eq!(feature_theme(&"Stunning Graphics".into()), Some("safari-graphics"));
        assert_eq!(feature_theme(&"Track Progress".into()), Some("safari-achievements"));
        assert_eq!(feature_theme(&"Relaxed Mode".into()), Some("safari-modes"));
        assert_eq!(feature_theme(&"Offline Play".into()), None);
    }

    #[test]
    fn test_feature_theme_first_keyword_group_wins() {
        // "Safari" would match graphics, but "Level" comes first.
        assert_eq!(feature_theme(&"Safari Level Pack".into()), Some("safari-levels"));
    }

    #[test]
    fn test_render_features_unthemed_card() {
        let markup = render_features(&[feature("Offline Play")]).into_string();
        assert!(markup.starts_with(r#"<div class="feature-card">"#));
    }

    #[test]
    fn test_render_instructions_numbers_from_one() {
        let instructions: Vec<Instruction> = serde_json::from_value(json!([
            {"title": "Match", "description": "Swap animals"},
            {"title": "Boost", "description": "Use boosters"}
        ]))
        .unwrap();
        let markup = render_instructions(&instructions).into_string();

        assert!(markup.contains(r#"<div class="step-number">1</div><h3>Match</h3>"#));
        assert!(markup.contains(r#"<div class="step-number">2</div><h3>Boost</h3>"#));
    }

    #[test]
    fn test_render_testimonials() {
        let testimonials: Vec<Testimonial> =
            serde_json::from_value(json!([{"name": "Amara", "comment": "So fun!"}])).unwrap();

        assert_eq!(
            render_testimonials(&testimonials).into_string(),
            r#"<div class="adventurer-testimonial-card"><p class="adventurer-testimonial-text">So fun!</p><div class="adventurer-name">- Amara</div></div>"#
        );
    }

    #[test]
    fn test_render_levels_status() {
        let levels: Vec<Level> = serde_json::from_value(json!([
            {"number": 1, "name": "Grassland", "completed": true},
            {"number": 2, "name": "Riverbank"}
        ]))
        .unwrap();
        let markup = render_levels(&levels).into_string();

        assert!(markup.starts_with(r#"<div class="level-table">"#));
        assert!(markup.contains(r#"<div class="level-status status-completed">✅ Completed</div>"#));
        assert!(markup.contains(r#"<div class="level-status status-locked">🔒 Locked</div>"#));
    }

    #[test]
    fn test_render_safari_journey() {
        let journey: SafariJourney = serde_json::from_value(json!({
            "title": "Your Safari Journey",
            "subtitle": "Keep exploring",
            "stats": [{"icon": "⭐", "value": "1,250", "label": "Stars", "description": "Collected"}],
            "achievements": [
                {"name": "First Match", "description": "Make a match", "progress": "1/1", "unlocked": true},
                {"name": "Lion Tamer", "description": "Use 50 lions", "progress": "12/50", "unlocked": false}
            ],
            "next_milestone": {"title": "Savanna Master", "description": "Finish world 3", "progress": "65%", "levels_remaining": 7}
        }))
        .unwrap();
        let markup = render_safari_journey(&journey).into_string();

        assert!(markup.contains(r#"<div class="achievement-item unlocked"><div class="achievement-status">🏆</div>"#));
        assert!(markup.contains(r#"<div class="achievement-item locked"><div class="achievement-status">🔒</div>"#));
        assert!(markup.contains(r#"<div class="progress-fill" style="width: 65%"></div>"#));
        assert!(markup.contains("65% Complete • 7 levels remaining"));
    }
}
