//! XML parsing for sitemap documents.
//!
//! Parsing is tolerant: unknown elements and attributes are skipped, not
//! errors. Malformed XML and schema-typed values that fail to parse
//! (timestamps, priorities, durations, change frequencies) surface as
//! [`ParseError`].

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;
use crate::index::{SitemapEntry, SitemapIndex};
use crate::url::{Alternate, Image, Url, Video};
use crate::urlset::UrlSet;

/// Parse XML text into a [`UrlSet`].
pub(crate) fn parse_urlset(content: &str) -> Result<UrlSet, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut set = UrlSet {
        xmlns: String::new(),
        xmlns_xhtml: None,
        xmlns_image: None,
        xmlns_video: None,
        urls: Vec::new(),
    };

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                expect_root(&reader, &e, "urlset")?;
                capture_namespaces(&reader, &e, &mut set);
                break;
            }
            Event::Empty(e) => {
                expect_root(&reader, &e, "urlset")?;
                capture_namespaces(&reader, &e, &mut set);
                return Ok(set);
            }
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::End(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
    buf.clear();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(&reader, e.name().as_ref());
                if tag == "url" {
                    set.urls.push(parse_url(&mut reader)?);
                } else {
                    tracing::debug!(element = %tag, "skipping unknown element in <urlset>");
                    skip_element(&mut reader)?;
                }
            }
            Event::Empty(e) => {
                let tag = decode_name(&reader, e.name().as_ref());
                if tag == "url" {
                    set.urls.push(empty_url());
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }

    tracing::debug!(url_count = set.urls.len(), "parsed urlset");
    Ok(set)
}

/// Parse XML text into a [`SitemapIndex`].
pub(crate) fn parse_index(content: &str) -> Result<SitemapIndex, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut index = SitemapIndex::default();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                expect_root(&reader, &e, "sitemapindex")?;
                break;
            }
            Event::Empty(e) => {
                expect_root(&reader, &e, "sitemapindex")?;
                return Ok(index);
            }
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::End(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
    buf.clear();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(&reader, e.name().as_ref());
                if tag == "sitemap" {
                    index.sitemaps.push(parse_entry(&mut reader)?);
                } else {
                    tracing::debug!(element = %tag, "skipping unknown element in <sitemapindex>");
                    skip_element(&mut reader)?;
                }
            }
            Event::Empty(e) => {
                let tag = decode_name(&reader, e.name().as_ref());
                if tag == "sitemap" {
                    index.sitemaps.push(SitemapEntry {
                        loc: String::new(),
                        last_mod: None,
                    });
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }

    tracing::debug!(entry_count = index.sitemaps.len(), "parsed sitemapindex");
    Ok(index)
}

/// Parse one `<url>` element; the reader is positioned just past its start
/// tag and is left just past its end tag.
fn parse_url(reader: &mut Reader<&[u8]>) -> Result<Url, ParseError> {
    let mut url = empty_url();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                match tag.as_str() {
                    "loc" => url.loc = read_text(reader)?,
                    "lastmod" => {
                        url.last_mod = Some(parse_timestamp(&read_text(reader)?)?);
                    }
                    "changefreq" => {
                        url.change_freq = Some(read_text(reader)?.parse()?);
                    }
                    "priority" => {
                        let value = read_text(reader)?;
                        let parsed = value
                            .parse()
                            .map_err(|_| ParseError::Priority { value })?;
                        url.priority = Some(parsed);
                    }
                    "image:image" => url.images.push(parse_image(reader)?),
                    "video:video" => url.videos.push(parse_video(reader)?),
                    "xhtml:link" => {
                        url.alternates.push(alternate_from_attrs(reader, &e));
                        skip_element(reader)?;
                    }
                    _ => {
                        tracing::debug!(element = %tag, "skipping unknown element in <url>");
                        skip_element(reader)?;
                    }
                }
            }
            Event::Empty(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                if tag == "xhtml:link" {
                    url.alternates.push(alternate_from_attrs(reader, &e));
                }
            }
            Event::End(_) => return Ok(url),
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Parse one `<sitemap>` entry of a sitemap index.
fn parse_entry(reader: &mut Reader<&[u8]>) -> Result<SitemapEntry, ParseError> {
    let mut entry = SitemapEntry {
        loc: String::new(),
        last_mod: None,
    };

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                match tag.as_str() {
                    "loc" => entry.loc = read_text(reader)?,
                    "lastmod" => {
                        entry.last_mod = Some(parse_timestamp(&read_text(reader)?)?);
                    }
                    _ => {
                        tracing::debug!(element = %tag, "skipping unknown element in <sitemap>");
                        skip_element(reader)?;
                    }
                }
            }
            Event::End(_) => return Ok(entry),
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Empty(_)
            | Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Parse one `<image:image>` block.
fn parse_image(reader: &mut Reader<&[u8]>) -> Result<Image, ParseError> {
    let mut image = Image::default();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                match tag.as_str() {
                    "image:loc" => image.loc = read_text(reader)?,
                    "image:caption" => image.caption = Some(read_text(reader)?),
                    "image:title" => image.title = Some(read_text(reader)?),
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(image),
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Empty(_)
            | Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Parse one `<video:video>` block.
fn parse_video(reader: &mut Reader<&[u8]>) -> Result<Video, ParseError> {
    let mut video = Video::new("", "", "", "");

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                match tag.as_str() {
                    "video:loc" => video.loc = read_text(reader)?,
                    "video:thumbnail_loc" => video.thumbnail_loc = read_text(reader)?,
                    "video:title" => video.title = read_text(reader)?,
                    "video:description" => video.description = read_text(reader)?,
                    "video:content_loc" => video.content_loc = Some(read_text(reader)?),
                    "video:duration" => {
                        let value = read_text(reader)?;
                        let parsed = value
                            .parse()
                            .map_err(|_| ParseError::Duration { value })?;
                        video.duration = Some(parsed);
                    }
                    "video:category" => video.category = Some(read_text(reader)?),
                    "video:tag" => video.tags.push(read_text(reader)?),
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(video),
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Empty(_)
            | Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Accumulate the text content of the current element up to its end tag.
///
/// Entity references and CDATA sections are decoded; nested elements are
/// skipped.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut text = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&reader.decoder().decode(&e)?),
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                text.push_str(&decode_entity(&entity));
            }
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref());
                tracing::debug!(element = %tag, "skipping nested element in text content");
                skip_element(reader)?;
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Empty(_) | Event::Comment(_) | Event::Decl(_) | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Consume events until the end tag matching the element whose start tag
/// was just read.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut depth = 0usize;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => return Err(ParseError::UnexpectedEof),
            Event::Empty(_)
            | Event::Text(_)
            | Event::GeneralRef(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Check the root element name against the one this codec parses.
fn expect_root(
    reader: &Reader<&[u8]>,
    e: &BytesStart,
    expected: &'static str,
) -> Result<(), ParseError> {
    let found = decode_name(reader, e.name().as_ref());
    if found == expected {
        Ok(())
    } else {
        Err(ParseError::UnexpectedRoot { expected, found })
    }
}

/// Capture root namespace declarations into the set's namespace fields.
fn capture_namespaces(reader: &Reader<&[u8]>, e: &BytesStart, set: &mut UrlSet) {
    for attr in e.attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        match key.as_str() {
            "xmlns" => set.xmlns = value,
            "xmlns:xhtml" => set.xmlns_xhtml = Some(value),
            "xmlns:image" => set.xmlns_image = Some(value),
            "xmlns:video" => set.xmlns_video = Some(value),
            _ => {}
        }
    }
}

/// Build an [`Alternate`] from `<xhtml:link>` attributes.
fn alternate_from_attrs(reader: &Reader<&[u8]>, e: &BytesStart) -> Alternate {
    let mut alternate = Alternate::default();
    for attr in e.attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        match key.as_str() {
            "rel" => alternate.rel = value,
            "hreflang" => alternate.hreflang = value,
            "href" => alternate.href = value,
            _ => {}
        }
    }
    alternate
}

/// A `<url>` with every field absent; parsing fills in what the document
/// provides.
fn empty_url() -> Url {
    Url {
        loc: String::new(),
        last_mod: None,
        change_freq: None,
        priority: None,
        images: Vec::new(),
        videos: Vec::new(),
        alternates: Vec::new(),
    }
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        Cow::into_owned,
    )
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}

/// `<lastmod>` accepts RFC 3339 and, leniently, a bare W3C date taken as
/// midnight UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ParseError::Timestamp {
        value: value.to_owned(),
    })
}
