//! Error types for sitemap serialization and parsing.

/// Error produced when rendering a sitemap structure to XML text.
///
/// All model fields are plain strings, timestamps, and numbers, so this is
/// not expected in normal use; it surfaces content that XML 1.0 cannot
/// carry at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SerializeError {
    /// Text contains a control character that has no XML 1.0 representation.
    #[error("control character {ch:?} in <{element}> cannot be written as XML")]
    Control {
        /// The offending character.
        ch: char,
        /// Name of the element or attribute being written.
        element: &'static str,
    },
}

/// Error produced when parsing sitemap XML text.
///
/// No partial structure is returned alongside an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// XML syntax error.
    #[error("XML parse error")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The document root is not the expected element.
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        /// Root element this codec parses.
        expected: &'static str,
        /// Root element found in the document.
        found: String,
    },

    /// The document ended while elements were still open.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// A `<lastmod>` value is not a W3C datetime.
    #[error("invalid <lastmod> timestamp: {value}")]
    Timestamp {
        /// The rejected element text.
        value: String,
    },

    /// A `<priority>` value is not a number.
    #[error("invalid <priority> value: {value}")]
    Priority {
        /// The rejected element text.
        value: String,
    },

    /// A `<video:duration>` value is not a whole number of seconds.
    #[error("invalid <video:duration> value: {value}")]
    Duration {
        /// The rejected element text.
        value: String,
    },

    /// A `<changefreq>` value is not one of the seven protocol tokens.
    #[error("invalid <changefreq> value: {value}")]
    ChangeFreq {
        /// The rejected element text.
        value: String,
    },
}
