use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::content::records::is_truthy;
use crate::errors::ContentError;

/// A top-level section key of a content file. Determines which renderer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Features,
    Instructions,
    Testimonials,
    AdventurerText,
    Animals,
    Boosters,
    Levels,
    SafariJourney,
    Enhancements,
    Diaries,
    Contact,
    Disclaimer,
    CookiePolicy,
    PrivacyPolicy,
}

impl Shape {
    /// Every shape, in the order they are tested when a document is dispatched on its first match.
    pub const PRIORITY: [Shape; 14] = [
        Shape::Features,
        Shape::Instructions,
        Shape::Testimonials,
        Shape::AdventurerText,
        Shape::Animals,
        Shape::Boosters,
        Shape::Levels,
        Shape::SafariJourney,
        Shape::Enhancements,
        Shape::Diaries,
        Shape::Contact,
        Shape::Disclaimer,
        Shape::CookiePolicy,
        Shape::PrivacyPolicy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Shape::Features => "features",
            Shape::Instructions => "instructions",
            Shape::Testimonials => "testimonials",
            Shape::AdventurerText => "adventurer-text",
            Shape::Animals => "animals",
            Shape::Boosters => "boosters",
            Shape::Levels => "levels",
            Shape::SafariJourney => "safari-journey",
            Shape::Enhancements => "enhancements",
            Shape::Diaries => "diaries",
            Shape::Contact => "contact",
            Shape::Disclaimer => "disclaimer",
            Shape::CookiePolicy => "cookiePolicy",
            Shape::PrivacyPolicy => "privacyPolicy",
        }
    }

    pub fn from_key(key: &str) -> Option<Shape> {
        Shape::PRIORITY.into_iter().find(|shape| shape.key() == key)
    }
}

/// A parsed content file.
///
/// The file name is kept alongside the data for error reporting.
#[derive(Debug, Clone)]
pub struct ContentDocument {
    file: String,
    data: Map<String, Value>,
}

impl ContentDocument {
    pub fn new(file: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            file: file.into(),
            data,
        }
    }

    pub fn parse(file: &str, raw: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| ContentError::Parse {
            file: file.to_string(),
            source,
        })?;

        match value {
            Value::Object(data) => Ok(Self::new(file, data)),
            _ => Err(ContentError::NotAnObject {
                file: file.to_string(),
            }),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Whether the section is present with a truthy value. `null`, `false`, `0` and `""` count
    /// as absent.
    pub fn has(&self, shape: Shape) -> bool {
        self.data.get(shape.key()).is_some_and(is_truthy)
    }

    /// The first section present in the document, in [`Shape::PRIORITY`] order.
    pub fn shape(&self) -> Option<Shape> {
        Shape::PRIORITY.into_iter().find(|shape| self.has(*shape))
    }

    /// Deserializes one section of the document.
    ///
    /// An absent section is read as `null` and reported as a [`ContentError::ShapeMismatch`].
    pub fn section<T: DeserializeOwned>(&self, shape: Shape) -> Result<T, ContentError> {
        let value = self.data.get(shape.key()).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|source| ContentError::ShapeMismatch { shape, source })
    }

    pub(crate) fn unknown_shape_error(&self) -> ContentError {
        ContentError::UnknownShape {
            file: self.file.clone(),
            keys: self.keys().collect::<Vec<_>>().join(", "),
        }
    }
}
