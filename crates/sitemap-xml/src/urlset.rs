//! URL set aggregate and the sitemap namespace constants.

use crate::error::{ParseError, SerializeError};
use crate::parser;
use crate::serializer;
use crate::url::Url;

/// Sitemap protocol namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// XHTML namespace used by alternate-language links.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Image sitemap extension namespace.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Video sitemap extension namespace.
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// A sitemap document: an ordered set of page [`Url`] entries.
///
/// Entry order is document order; it is preserved through generation and
/// parsing. A namespace attribute that is unset (or an empty `xmlns`) is
/// omitted from output entirely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrlSet {
    /// Default namespace on `<urlset>`.
    pub xmlns: String,
    /// `xmlns:xhtml` declaration.
    pub xmlns_xhtml: Option<String>,
    /// `xmlns:image` declaration.
    pub xmlns_image: Option<String>,
    /// `xmlns:video` declaration.
    pub xmlns_video: Option<String>,
    /// Page entries in document order.
    pub urls: Vec<Url>,
}

impl UrlSet {
    /// Create an empty set with the sitemap and xhtml namespaces
    /// pre-populated and the extension namespaces unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            xmlns: SITEMAP_NS.to_owned(),
            xmlns_xhtml: Some(XHTML_NS.to_owned()),
            xmlns_image: None,
            xmlns_video: None,
            urls: Vec::new(),
        }
    }

    /// Append a page entry. The set takes ownership.
    pub fn add(&mut self, url: Url) {
        self.urls.push(url);
    }

    /// Render the set as indented XML text with a declaration header.
    ///
    /// When an entry carries images or videos and the corresponding
    /// extension namespace is unset, the declaration is added to the root
    /// automatically; an explicitly set one is emitted verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if the structure cannot be rendered.
    pub fn to_xml(&self) -> Result<String, SerializeError> {
        serializer::urlset_to_xml(self)
    }

    /// Parse XML text into a set, inverse of [`to_xml`](Self::to_xml).
    ///
    /// Unknown elements and attributes are ignored. Namespace declarations
    /// on the root are captured into the namespace fields.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not well-formed XML or the
    /// root element is not `<urlset>`.
    pub fn from_xml(content: &str) -> Result<Self, ParseError> {
        parser::parse_urlset(content)
    }
}

impl Default for UrlSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_populates_default_namespaces() {
        let set = UrlSet::new();

        assert_eq!(set.xmlns, SITEMAP_NS);
        assert_eq!(set.xmlns_xhtml.as_deref(), Some(XHTML_NS));
        assert_eq!(set.xmlns_image, None);
        assert_eq!(set.xmlns_video, None);
        assert!(set.urls.is_empty());
    }

    #[test]
    fn test_add_preserves_order() {
        let mut set = UrlSet::new();
        set.add(Url::builder("https://x/a").build());
        set.add(Url::builder("https://x/b").build());
        set.add(Url::builder("https://x/c").build());

        let locs: Vec<&str> = set.urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(locs, ["https://x/a", "https://x/b", "https://x/c"]);
    }
}
