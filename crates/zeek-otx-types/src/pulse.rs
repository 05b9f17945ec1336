//! Pulse and indicator representation.

use serde::{Deserialize, Deserializer};

/// A threat-intelligence bundle as published by the OTXv2 feed.
///
/// Pulses are materialized one page at a time from the API response and
/// discarded after processing; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pulse {
    /// Pulse title.
    #[serde(default)]
    pub name: String,
    /// Pulse identifier.
    #[serde(default, deserialize_with = "id_from_json")]
    pub id: String,
    /// Name of the pulse author.
    #[serde(default)]
    pub author_name: String,
    /// Reference URLs, possibly empty.
    #[serde(default)]
    pub references: Vec<String>,
    /// Indicators carried by this pulse.
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

impl Pulse {
    /// Creates a new pulse.
    #[must_use]
    pub const fn new(
        name: String,
        id: String,
        author_name: String,
        references: Vec<String>,
        indicators: Vec<Indicator>,
    ) -> Self {
        Self {
            name,
            id,
            author_name,
            references,
            indicators,
        }
    }

    /// Returns the first reference URL, if the pulse carries any.
    #[must_use]
    pub fn first_reference(&self) -> Option<&str> {
        self.references.first().map(String::as_str)
    }
}

/// A single atomic threat artifact (IP, domain, hash, URL, ...) with its
/// OTXv2 type code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Indicator {
    /// Raw indicator value.
    pub indicator: String,
    /// OTXv2 indicator type code (e.g. `IPv4`, `FileHash-SHA256`).
    #[serde(rename = "type")]
    pub kind: String,
}

impl Indicator {
    /// Creates a new indicator.
    #[must_use]
    pub const fn new(indicator: String, kind: String) -> Self {
        Self { indicator, kind }
    }
}

/// One page of the paginated subscribed-pulses endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PulsePage {
    /// Pulses in this page.
    #[serde(default)]
    pub results: Vec<Pulse>,
    /// Continuation URL for the next page; absent or empty on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

impl PulsePage {
    /// Returns the continuation URL, if the server reported another page.
    ///
    /// The API signals the last page with either an absent `next` field or
    /// an empty string; both mean the retrieval is complete.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// Pulse ids arrive as JSON strings from some API revisions and as bare
/// numbers from others; accept both.
fn id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
