//! The records found in the sections of a [`ContentDocument`](super::ContentDocument).
//!
//! Records are read-only view models. Every field is optional in the data files; a missing field is
//! rendered as empty text.
use std::fmt::{self, Display, Formatter};

use maud::Render;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A scalar field from a content file, kept as the text that will be placed in the page.
///
/// Strings, numbers and booleans are all accepted, since the data files are not consistent about
/// e.g. `"power": 5` versus `"power": "5"`.
///
/// Content files are trusted: [`Render`] emits the text as-is, without escaping, so sections may
/// carry inline markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Render for Text {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            Value::String(value) => value,
            Value::Null => String::new(),
            Value::Bool(value) => value.to_string(),
            Value::Number(value) => value.to_string(),
            other => other.to_string(),
        };
        Ok(Text(text))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub icon: Text,
    pub title: Text,
    pub description: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Instruction {
    pub title: Text,
    pub description: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: Text,
    pub comment: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Animal {
    pub name: Text,
    pub description: Text,
    pub power: Text,
    pub special_ability: Text,
    pub habitat: Text,
    pub strategy: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Booster {
    pub name: Text,
    pub description: Text,
    pub effect: Text,
    pub power_level: Text,
    pub best_use: Text,
    pub strategy: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Level {
    pub number: Text,
    pub name: Text,
    #[serde(deserialize_with = "truthy")]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JourneyStat {
    pub icon: Text,
    pub value: Text,
    pub label: Text,
    pub description: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub name: Text,
    pub description: Text,
    pub progress: Text,
    #[serde(deserialize_with = "truthy")]
    pub unlocked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub title: Text,
    pub description: Text,
    /// A CSS width, e.g. `"65%"`.
    pub progress: Text,
    pub levels_remaining: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SafariJourney {
    pub title: Text,
    pub subtitle: Text,
    pub stats: Vec<JourneyStat>,
    pub achievements: Vec<Achievement>,
    pub next_milestone: Milestone,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Enhancement {
    pub icon: Text,
    pub title: Text,
    pub description: Text,
    pub version: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Diary {
    pub icon: Text,
    pub title: Text,
    pub story: Text,
    pub player: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Text,
    pub phone: Text,
    pub address: Text,
    pub hours: Text,
    pub support: Text,
}

/// A section made of a single pre-formatted block, such as a disclaimer or a policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    pub text: Text,
}

/// What an entry of the combined animals and boosters list is.
///
/// The data files carry no discriminator, so the kind is inferred from the fields: an entry with a
/// non-empty `special_ability` is an animal, anything else is a booster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Animal,
    Booster,
}

impl RecordKind {
    pub fn of(record: &Value) -> Self {
        match record.get("special_ability") {
            Some(ability) if is_truthy(ability) => RecordKind::Animal,
            _ => RecordKind::Booster,
        }
    }
}

/// An entry of the combined animals and boosters list.
#[derive(Debug, Clone)]
pub enum RosterEntry {
    Animal(Animal),
    Booster(Booster),
}

impl RosterEntry {
    pub fn from_value(record: Value) -> Result<Self, serde_json::Error> {
        Ok(match RecordKind::of(&record) {
            RecordKind::Animal => RosterEntry::Animal(serde_json::from_value(record)?),
            RecordKind::Booster => RosterEntry::Booster(serde_json::from_value(record)?),
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RosterEntry::Animal(_) => RecordKind::Animal,
            RosterEntry::Booster(_) => RecordKind::Booster,
        }
    }
}

/// Reads a flag the way the page scripts test it, so `1` or `"yes"` is set and `0` or `""` is not.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
