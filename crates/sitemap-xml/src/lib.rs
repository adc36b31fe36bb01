//! Sitemap modeling and XML codec per the sitemaps.org protocol.
//!
//! This crate provides:
//! - [`UrlSet`]: a sitemap document of page entries, with image, video,
//!   and alternate-language extensions
//! - [`SitemapIndex`]: an index document listing other sitemap files
//! - [`Url::builder`]: entry construction with protocol defaults
//!
//! Both document types serialize to indented XML with a declaration header
//! and parse back from XML text; parsing the generated output yields an
//! equal structure. Parsing is tolerant of unknown elements.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use sitemap_xml::{ChangeFreq, Url, UrlSet};
//!
//! let mut set = UrlSet::new();
//! set.add(
//!     Url::builder("https://example.com/")
//!         .last_mod(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
//!         .change_freq(ChangeFreq::Weekly)
//!         .priority(0.8)
//!         .build(),
//! );
//!
//! let xml = set.to_xml()?;
//! let parsed = UrlSet::from_xml(&xml)?;
//! assert_eq!(parsed.urls, set.urls);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This is a pure in-memory codec: no network access, no file I/O, and no
//! size-limit enforcement. Aggregates are not synchronized; callers needing
//! concurrent construction serialize access externally.

mod changefreq;
mod error;
mod index;
mod parser;
mod serializer;
mod url;
mod urlset;

pub use changefreq::ChangeFreq;
pub use error::{ParseError, SerializeError};
pub use index::{SitemapEntry, SitemapIndex};
pub use url::{Alternate, DEFAULT_PRIORITY, Image, Url, UrlBuilder, Video};
pub use urlset::{IMAGE_NS, SITEMAP_NS, UrlSet, VIDEO_NS, XHTML_NS};
