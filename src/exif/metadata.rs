//! Raw camera metadata as a tag → value mapping
//!
//! Every tag is stored under both its numeric id and its name so callers can
//! look up by either. Typed accessors return `None` on any mismatch instead of
//! failing; the camera estimator treats `None` as "use the heuristic".

use std::collections::HashMap;
use std::fmt;

/// Key of a metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKey {
    Id(u16),
    Name(String),
}

/// A tag known by both id and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRef {
    pub id: u16,
    pub name: &'static str,
}

/// Tags read by the camera estimator
pub mod tags {
    use super::TagRef;

    pub const FOCAL_LENGTH: TagRef = TagRef { id: 37386, name: "FocalLength" };
    pub const FOCAL_LENGTH_35MM: TagRef = TagRef { id: 41989, name: "FocalLengthIn35mmFilm" };
    pub const F_NUMBER: TagRef = TagRef { id: 33437, name: "FNumber" };
    pub const ISO: TagRef = TagRef { id: 34855, name: "PhotographicSensitivity" };
    pub const EXPOSURE_TIME: TagRef = TagRef { id: 33434, name: "ExposureTime" };
    pub const MAKE: TagRef = TagRef { id: 271, name: "Make" };
    pub const MODEL: TagRef = TagRef { id: 272, name: "Model" };
    pub const LENS_MODEL: TagRef = TagRef { id: 42036, name: "LensModel" };
}

/// Raw tag value
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Integer(i64),
    Float(f64),
    Rational { numerator: i64, denominator: i64 },
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<TagValue>),
}

impl TagValue {
    /// Numeric value; lists and opaque bytes have none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Integer(v) => Some(*v as f64),
            TagValue::Float(v) if v.is_finite() => Some(*v),
            TagValue::Rational {
                numerator,
                denominator,
            } if *denominator != 0 => Some(*numerator as f64 / *denominator as f64),
            TagValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integer value, truncating; a list yields its first element
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Integer(v) => Some(*v),
            TagValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            TagValue::Rational {
                numerator,
                denominator,
            } if *denominator != 0 => Some(numerator / denominator),
            TagValue::Text(s) => s.trim().parse::<i64>().ok(),
            TagValue::List(items) => items.first().and_then(TagValue::as_i64),
            _ => None,
        }
    }

    /// Trimmed textual rendering; empty text and opaque bytes have none
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            TagValue::Text(s) => s.trim().to_string(),
            TagValue::Bytes(_) | TagValue::List(_) => return None,
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Whether the value carries anything (non-zero, non-empty)
    pub fn is_present(&self) -> bool {
        match self {
            TagValue::Integer(v) => *v != 0,
            TagValue::Float(v) => *v != 0.0,
            TagValue::Rational { numerator, .. } => *numerator != 0,
            TagValue::Text(s) => !s.is_empty(),
            TagValue::Bytes(b) => !b.is_empty(),
            TagValue::List(items) => !items.is_empty(),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Integer(v) => write!(f, "{}", v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Rational {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
            TagValue::Text(s) => write!(f, "{}", s),
            TagValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            TagValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Camera metadata keyed by tag id and tag name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: HashMap<TagKey, TagValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under its id and, when known, its name
    pub fn insert(&mut self, id: u16, name: Option<&str>, value: TagValue) {
        if let Some(name) = name {
            self.entries.insert(TagKey::Name(name.to_string()), value.clone());
        }
        self.entries.insert(TagKey::Id(id), value);
    }

    pub fn get(&self, key: &TagKey) -> Option<&TagValue> {
        self.entries.get(key)
    }

    /// Look a tag up by id, then by name, skipping blank values
    pub fn lookup(&self, tag: TagRef) -> Option<&TagValue> {
        self.get(&TagKey::Id(tag.id))
            .filter(|v| v.is_present())
            .or_else(|| {
                self.get(&TagKey::Name(tag.name.to_string()))
                    .filter(|v| v.is_present())
            })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys (each tag counts once per key it is stored under)
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(TagRef, TagValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (TagRef, TagValue)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (tag, value) in iter {
            metadata.insert(tag.id, Some(tag.name), value);
        }
        metadata
    }
}
