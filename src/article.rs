//! Article type definitions
//!
//! This module contains the stored [`Article`], the [`NewArticle`] shape
//! accepted by the create endpoint, and the [`IdGenerator`] that assigns
//! identifiers on creation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Id of the article present in a freshly seeded store
pub const SAMPLE_ID: &str = "id1";

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch
const UNSET_CREATION_SECS: i64 = -62_135_596_800;

/// Creation time of an article whose creator did not supply one
///
/// `0001-01-01T00:00:00+00:00`, the zero timestamp.
#[must_use]
pub fn unset_creation() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(UNSET_CREATION_SECS, 0)
        .unwrap_or_default()
        .fixed_offset()
}

/// A stored article
///
/// Articles are never mutated once stored. Readers always get clones.
///
/// # Wire format
///
/// ```json
/// {
///   "id": "1718000000000000000",
///   "title": "Hola!!",
///   "subtitle": "Hello!!",
///   "content": "Hola Amigos!!",
///   "creation": "2024-06-10T08:13:20+02:00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Server-assigned identifier, unique within a store
    pub id: String,
    /// Article title
    pub title: String,
    /// Article subtitle
    pub subtitle: String,
    /// Article body text
    pub content: String,
    /// When the article was created, with the offset it was given in
    pub creation: DateTime<FixedOffset>,
}

impl Article {
    /// Text fields examined by search, in match order
    #[must_use]
    pub fn searchable_fields(&self) -> [&str; 3] {
        [
            self.title.as_str(),
            self.subtitle.as_str(),
            self.content.as_str(),
        ]
    }
}

/// Body of a create request
///
/// Missing or `null` text fields become empty strings, and a missing or
/// `null` `creation` becomes [`unset_creation`]. Unknown fields, including
/// any client-supplied `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewArticle {
    /// Article title
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    /// Article subtitle
    #[serde(deserialize_with = "null_as_empty")]
    pub subtitle: String,
    /// Article body text
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    /// Creation time supplied by the client, kept verbatim
    #[serde(deserialize_with = "null_as_unset")]
    pub creation: DateTime<FixedOffset>,
}

impl Default for NewArticle {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            content: String::new(),
            creation: unset_creation(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unset<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<FixedOffset>, D::Error> {
    Ok(Option::<DateTime<FixedOffset>>::deserialize(deserializer)?.unwrap_or_else(unset_creation))
}

impl NewArticle {
    /// Turn the request into a storable article under `id`
    #[must_use]
    pub fn into_article(self, id: String) -> Article {
        Article {
            id,
            title: self.title,
            subtitle: self.subtitle,
            content: self.content,
            creation: self.creation,
        }
    }
}

/// Timestamp-based article id source
///
/// Ids are the decimal nanoseconds since the Unix epoch. Two calls landing on
/// the same clock reading (or a clock stepping backwards) still get distinct
/// ids: each id is strictly greater than the previous one handed out.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator with no ids issued yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id
    pub fn next_id(&self) -> String {
        self.next_from(Utc::now()).to_string()
    }

    fn next_from(&self, now: DateTime<Utc>) -> i64 {
        let nanos = now.timestamp_nanos_opt().unwrap_or(i64::MAX);
        let bump = |last: i64| nanos.max(last.saturating_add(1));
        // fetch_update only fails when the closure returns None
        match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => bump(previous),
        }
    }
}

/// The article a seeded store starts with
#[must_use]
pub fn sample() -> Article {
    Article {
        id: SAMPLE_ID.to_string(),
        title: "Hola!!".to_string(),
        subtitle: "Hello!!".to_string(),
        content: "Hola Amigos!!".to_string(),
        creation: Utc::now().fixed_offset(),
    }
}
