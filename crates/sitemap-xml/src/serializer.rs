//! XML generation for sitemap documents.
//!
//! Output is built as a string: a declaration header followed by the
//! 2-space-indented document. Optional fields that are unset and sequences
//! that are empty produce no output at all.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::SerializeError;
use crate::index::SitemapIndex;
use crate::url::{Alternate, Image, Url, Video};
use crate::urlset::{IMAGE_NS, SITEMAP_NS, UrlSet, VIDEO_NS};

/// Declaration line at the top of every generated document.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Render a URL set as XML text.
pub(crate) fn urlset_to_xml(set: &UrlSet) -> Result<String, SerializeError> {
    let mut out = String::with_capacity(256 + set.urls.len() * 256);
    out.push_str(XML_DECLARATION);
    out.push_str("<urlset");

    if !set.xmlns.is_empty() {
        push_attr(&mut out, "xmlns", &set.xmlns)?;
    }
    if let Some(ns) = &set.xmlns_xhtml {
        push_attr(&mut out, "xmlns:xhtml", ns)?;
    }
    match (&set.xmlns_image, set.urls.iter().any(|u| !u.images.is_empty())) {
        (Some(ns), _) => push_attr(&mut out, "xmlns:image", ns)?,
        (None, true) => push_attr(&mut out, "xmlns:image", IMAGE_NS)?,
        (None, false) => {}
    }
    match (&set.xmlns_video, set.urls.iter().any(|u| !u.videos.is_empty())) {
        (Some(ns), _) => push_attr(&mut out, "xmlns:video", ns)?,
        (None, true) => push_attr(&mut out, "xmlns:video", VIDEO_NS)?,
        (None, false) => {}
    }

    if set.urls.is_empty() {
        out.push_str("></urlset>");
        return Ok(out);
    }

    out.push('>');
    for url in &set.urls {
        write_url(&mut out, url)?;
    }
    out.push_str("\n</urlset>");
    Ok(out)
}

/// Render a sitemap index as XML text.
///
/// The protocol namespace is always declared on the root.
pub(crate) fn index_to_xml(index: &SitemapIndex) -> Result<String, SerializeError> {
    let mut out = String::with_capacity(256 + index.sitemaps.len() * 128);
    out.push_str(XML_DECLARATION);
    out.push_str("<sitemapindex");
    push_attr(&mut out, "xmlns", SITEMAP_NS)?;

    if index.sitemaps.is_empty() {
        out.push_str("></sitemapindex>");
        return Ok(out);
    }

    out.push('>');
    for entry in &index.sitemaps {
        out.push_str("\n  <sitemap>");
        text_element(&mut out, "    ", "loc", &entry.loc)?;
        if let Some(last_mod) = entry.last_mod {
            text_element(&mut out, "    ", "lastmod", &format_timestamp(last_mod))?;
        }
        out.push_str("\n  </sitemap>");
    }
    out.push_str("\n</sitemapindex>");
    Ok(out)
}

/// Serialize one `<url>` entry with its fixed child order.
fn write_url(out: &mut String, url: &Url) -> Result<(), SerializeError> {
    out.push_str("\n  <url>");
    text_element(out, "    ", "loc", &url.loc)?;
    if let Some(last_mod) = url.last_mod {
        text_element(out, "    ", "lastmod", &format_timestamp(last_mod))?;
    }
    if let Some(change_freq) = url.change_freq {
        text_element(out, "    ", "changefreq", change_freq.as_str())?;
    }
    if let Some(priority) = url.priority {
        text_element(out, "    ", "priority", &priority.to_string())?;
    }
    for image in &url.images {
        write_image(out, image)?;
    }
    for video in &url.videos {
        write_video(out, video)?;
    }
    for alternate in &url.alternates {
        write_alternate(out, alternate)?;
    }
    out.push_str("\n  </url>");
    Ok(())
}

fn write_image(out: &mut String, image: &Image) -> Result<(), SerializeError> {
    out.push_str("\n    <image:image>");
    text_element(out, "      ", "image:loc", &image.loc)?;
    if let Some(caption) = &image.caption {
        text_element(out, "      ", "image:caption", caption)?;
    }
    if let Some(title) = &image.title {
        text_element(out, "      ", "image:title", title)?;
    }
    out.push_str("\n    </image:image>");
    Ok(())
}

fn write_video(out: &mut String, video: &Video) -> Result<(), SerializeError> {
    out.push_str("\n    <video:video>");
    text_element(out, "      ", "video:loc", &video.loc)?;
    text_element(out, "      ", "video:thumbnail_loc", &video.thumbnail_loc)?;
    text_element(out, "      ", "video:title", &video.title)?;
    text_element(out, "      ", "video:description", &video.description)?;
    if let Some(content_loc) = &video.content_loc {
        text_element(out, "      ", "video:content_loc", content_loc)?;
    }
    if let Some(duration) = video.duration {
        text_element(out, "      ", "video:duration", &duration.to_string())?;
    }
    if let Some(category) = &video.category {
        text_element(out, "      ", "video:category", category)?;
    }
    for tag in &video.tags {
        text_element(out, "      ", "video:tag", tag)?;
    }
    out.push_str("\n    </video:video>");
    Ok(())
}

/// Alternates are attribute-only elements with no child text.
fn write_alternate(out: &mut String, alternate: &Alternate) -> Result<(), SerializeError> {
    out.push_str("\n    <xhtml:link");
    push_attr(out, "rel", &alternate.rel)?;
    push_attr(out, "hreflang", &alternate.hreflang)?;
    push_attr(out, "href", &alternate.href)?;
    out.push_str(" />");
    Ok(())
}

/// Append `<name>escaped text</name>` on its own indented line.
fn text_element(
    out: &mut String,
    indent: &str,
    name: &'static str,
    text: &str,
) -> Result<(), SerializeError> {
    out.push('\n');
    out.push_str(indent);
    out.push('<');
    out.push_str(name);
    out.push('>');
    escape_into(out, text, false, name)?;
    out.push_str("</");
    out.push_str(name);
    out.push('>');
    Ok(())
}

/// Append ` name="escaped value"`.
fn push_attr(out: &mut String, name: &'static str, value: &str) -> Result<(), SerializeError> {
    write!(out, " {name}=\"").unwrap();
    escape_into(out, value, true, name)?;
    out.push('"');
    Ok(())
}

/// Escape XML special characters into `out`.
///
/// Attribute values also escape quotes. Control characters below U+0020
/// other than tab, newline, and carriage return have no XML 1.0
/// representation and fail serialization.
fn escape_into(
    out: &mut String,
    text: &str,
    escape_quotes: bool,
    element: &'static str,
) -> Result<(), SerializeError> {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if escape_quotes => out.push_str("&quot;"),
            '\'' if escape_quotes => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < ' ' => return Err(SerializeError::Control { ch: c, element }),
            c => out.push(c),
        }
    }
    Ok(())
}

/// W3C datetime with the UTC designator, e.g. `2024-01-01T00:00:00Z`.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::changefreq::ChangeFreq;
    use crate::index::{SitemapEntry, SitemapIndex};
    use crate::urlset::XHTML_NS;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_urlset() {
        let xml = UrlSet::new().to_xml().unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
             xmlns:xhtml=\"http://www.w3.org/1999/xhtml\"></urlset>"
        );
    }

    #[test]
    fn test_url_child_order() {
        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://example.com/")
                .change_freq(ChangeFreq::Monthly)
                .priority(0.5)
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        let loc = xml.find("<loc>").unwrap();
        let lastmod = xml.find("<lastmod>").unwrap();
        let changefreq = xml.find("<changefreq>").unwrap();
        let priority = xml.find("<priority>").unwrap();
        assert!(loc < lastmod && lastmod < changefreq && changefreq < priority);

        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let mut set = UrlSet::new();
        set.add(Url {
            loc: "https://example.com/".to_owned(),
            last_mod: None,
            change_freq: None,
            priority: None,
            images: Vec::new(),
            videos: Vec::new(),
            alternates: Vec::new(),
        });
        let xml = set.to_xml().unwrap();

        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
        assert!(!xml.contains("<image:image>"));
        assert!(!xml.contains("<video:video>"));
        assert!(!xml.contains("<xhtml:link"));
    }

    #[test]
    fn test_extension_namespaces_declared_when_needed() {
        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://x/")
                .images(vec![Image::new("https://x/a.png")])
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        assert!(xml.contains(&format!(" xmlns:image=\"{IMAGE_NS}\"")));
        assert!(!xml.contains(" xmlns:video="));
    }

    #[test]
    fn test_explicit_extension_namespace_is_kept() {
        let mut set = UrlSet::new();
        set.xmlns_video = Some("urn:example:video".to_owned());
        let xml = set.to_xml().unwrap();

        assert!(xml.contains(" xmlns:video=\"urn:example:video\""));
    }

    #[test]
    fn test_empty_xmlns_is_omitted() {
        let mut set = UrlSet::new();
        set.xmlns = String::new();
        set.xmlns_xhtml = None;
        let xml = set.to_xml().unwrap();

        assert!(xml.contains("<urlset></urlset>"));
    }

    #[test]
    fn test_image_block() {
        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://x/")
                .images(vec![
                    Image::new("https://x/a.png")
                        .with_caption("the caption")
                        .with_title("the title"),
                ])
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        assert!(xml.contains("<image:image>"));
        assert!(xml.contains("<image:loc>https://x/a.png</image:loc>"));
        assert!(xml.contains("<image:caption>the caption</image:caption>"));
        assert!(xml.contains("<image:title>the title</image:title>"));
    }

    #[test]
    fn test_video_block_omits_unset_duration() {
        let with_duration = Video::new("https://x/v", "https://x/t.png", "clip", "a clip")
            .with_duration(120)
            .with_tags(vec!["one".to_owned(), "two".to_owned()]);
        let without_duration = Video::new("https://x/w", "https://x/u.png", "other", "no length");

        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://x/")
                .videos(vec![with_duration, without_duration])
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        assert_eq!(xml.matches("<video:video>").count(), 2);
        assert_eq!(xml.matches("<video:duration>").count(), 1);
        assert!(xml.contains("<video:duration>120</video:duration>"));
        assert_eq!(xml.matches("<video:tag>").count(), 2);
    }

    #[test]
    fn test_alternate_renders_attributes_only() {
        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://x/")
                .alternates(vec![Alternate::new("alternate", "de", "https://x/de/")])
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        assert!(xml.contains(
            "<xhtml:link rel=\"alternate\" hreflang=\"de\" href=\"https://x/de/\" />"
        ));
        assert!(xml.contains(&format!(" xmlns:xhtml=\"{XHTML_NS}\"")));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let mut set = UrlSet::new();
        set.add(
            Url::builder("https://x/?a=1&b=<2>")
                .images(vec![Image::new("https://x/a.png").with_caption("\"quoted\"")])
                .build_at(fixed_now()),
        );
        let xml = set.to_xml().unwrap();

        assert!(xml.contains("<loc>https://x/?a=1&amp;b=&lt;2&gt;</loc>"));
        // Quotes pass through unescaped in element text
        assert!(xml.contains("<image:caption>\"quoted\"</image:caption>"));
    }

    #[test]
    fn test_control_character_fails_serialization() {
        let mut set = UrlSet::new();
        set.add(Url::builder("https://x/\u{0}").build_at(fixed_now()));
        let err = set.to_xml().unwrap_err();

        assert!(matches!(
            err,
            SerializeError::Control {
                ch: '\u{0}',
                element: "loc"
            }
        ));
    }

    #[test]
    fn test_index_always_declares_namespace() {
        let xml = SitemapIndex::default().to_xml().unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\
             </sitemapindex>"
        );
    }

    #[test]
    fn test_index_entries() {
        let mut index = SitemapIndex::default();
        index.add("https://x/a.xml", fixed_now());
        index.push(SitemapEntry {
            loc: "https://x/b.xml".to_owned(),
            last_mod: None,
        });
        let xml = index.to_xml().unwrap();

        assert_eq!(xml.matches("<sitemap>").count(), 2);
        assert_eq!(xml.matches("<lastmod>").count(), 1);
        assert!(xml.contains("<loc>https://x/a.xml</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01T00:00:00Z</lastmod>"));
    }
}
