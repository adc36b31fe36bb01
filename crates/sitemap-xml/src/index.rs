//! Sitemap index aggregate: a document listing other sitemap files.

use chrono::{DateTime, Utc};

use crate::error::{ParseError, SerializeError};
use crate::parser;
use crate::serializer;

/// One `<sitemap>` reference inside a sitemap index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SitemapEntry {
    /// Absolute URL of the child sitemap file.
    pub loc: String,
    /// Last modification time of the child sitemap.
    pub last_mod: Option<DateTime<Utc>>,
}

/// A sitemap index document, used when a site outgrows a single sitemap.
///
/// Entry order is insertion order and is preserved through generation and
/// parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SitemapIndex {
    /// Child sitemap references in document order.
    pub sitemaps: Vec<SitemapEntry>,
}

impl SitemapIndex {
    /// Create an index wrapping the given entries verbatim.
    #[must_use]
    pub fn new(sitemaps: Vec<SitemapEntry>) -> Self {
        Self { sitemaps }
    }

    /// Append an entry with a last-modified timestamp.
    pub fn add(&mut self, loc: impl Into<String>, last_mod: DateTime<Utc>) {
        self.sitemaps.push(SitemapEntry {
            loc: loc.into(),
            last_mod: Some(last_mod),
        });
    }

    /// Append a pre-built entry, e.g. one without a timestamp.
    pub fn push(&mut self, entry: SitemapEntry) {
        self.sitemaps.push(entry);
    }

    /// Render the index as indented XML text with a declaration header.
    ///
    /// The `xmlns` attribute is always emitted on `<sitemapindex>`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if the structure cannot be rendered.
    pub fn to_xml(&self) -> Result<String, SerializeError> {
        serializer::index_to_xml(self)
    }

    /// Parse XML text into an index, inverse of [`to_xml`](Self::to_xml).
    ///
    /// Unknown elements are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not well-formed XML or the
    /// root element is not `<sitemapindex>`.
    pub fn from_xml(content: &str) -> Result<Self, ParseError> {
        parser::parse_index(content)
    }
}
