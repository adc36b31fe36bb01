//! Page entry model: [`Url`] and its image, video, and alternate-link blocks.

use chrono::{DateTime, Utc};

use crate::changefreq::ChangeFreq;

/// Default priority stamped by [`UrlBuilder::build`] when none is given.
pub const DEFAULT_PRIORITY: f64 = 0.5;

/// One `<url>` entry in a sitemap.
///
/// Optional fields are omitted from output when `None`; sequences are
/// omitted when empty. `priority` is conventionally in `0.0..=1.0` but the
/// range is not enforced here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Url {
    /// Absolute URL of the page.
    pub loc: String,
    /// Last modification time.
    pub last_mod: Option<DateTime<Utc>>,
    /// Expected change frequency.
    pub change_freq: Option<ChangeFreq>,
    /// Relative importance within the site.
    pub priority: Option<f64>,
    /// `<image:image>` extension blocks.
    pub images: Vec<Image>,
    /// `<video:video>` extension blocks.
    pub videos: Vec<Video>,
    /// `<xhtml:link>` language/region alternates.
    pub alternates: Vec<Alternate>,
}

impl Url {
    /// Start building an entry for the given location.
    #[must_use]
    pub fn builder(loc: impl Into<String>) -> UrlBuilder {
        UrlBuilder::new(loc)
    }
}

/// Builds a [`Url`], stamping protocol defaults for fields left unset.
///
/// Overwrite-style fields (`last_mod`, `change_freq`, `priority`) take the
/// last value given; append-style fields (`images`, `videos`, `alternates`)
/// accumulate across calls.
#[derive(Clone, Debug)]
pub struct UrlBuilder {
    loc: String,
    last_mod: Option<DateTime<Utc>>,
    change_freq: Option<ChangeFreq>,
    priority: Option<f64>,
    images: Vec<Image>,
    videos: Vec<Video>,
    alternates: Vec<Alternate>,
}

impl UrlBuilder {
    fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            last_mod: None,
            change_freq: None,
            priority: None,
            images: Vec::new(),
            videos: Vec::new(),
            alternates: Vec::new(),
        }
    }

    /// Set the last modification time.
    #[must_use]
    pub fn last_mod(mut self, last_mod: DateTime<Utc>) -> Self {
        self.last_mod = Some(last_mod);
        self
    }

    /// Set the change frequency.
    #[must_use]
    pub fn change_freq(mut self, change_freq: ChangeFreq) -> Self {
        self.change_freq = Some(change_freq);
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Append image blocks.
    #[must_use]
    pub fn images(mut self, images: Vec<Image>) -> Self {
        self.images.extend(images);
        self
    }

    /// Append video blocks.
    #[must_use]
    pub fn videos(mut self, videos: Vec<Video>) -> Self {
        self.videos.extend(videos);
        self
    }

    /// Append alternate-language links.
    #[must_use]
    pub fn alternates(mut self, alternates: Vec<Alternate>) -> Self {
        self.alternates.extend(alternates);
        self
    }

    /// Finish the entry, reading the wall clock for the `last_mod` default.
    ///
    /// Defaults for fields never set: `last_mod` = now (UTC), `change_freq`
    /// = [`ChangeFreq::Monthly`], `priority` = `0.5`.
    #[must_use]
    pub fn build(self) -> Url {
        self.build_at(Utc::now())
    }

    /// Finish the entry with an explicit time standing in for "now".
    ///
    /// Deterministic variant of [`build`](Self::build) for tests and
    /// reproducible output; only the `last_mod` default is affected.
    #[must_use]
    pub fn build_at(self, now: DateTime<Utc>) -> Url {
        Url {
            loc: self.loc,
            last_mod: Some(self.last_mod.unwrap_or(now)),
            change_freq: Some(self.change_freq.unwrap_or(ChangeFreq::Monthly)),
            priority: Some(self.priority.unwrap_or(DEFAULT_PRIORITY)),
            images: self.images,
            videos: self.videos,
            alternates: self.alternates,
        }
    }
}

/// One `<image:image>` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    /// URL of the image.
    pub loc: String,
    /// Caption of the image.
    pub caption: Option<String>,
    /// Title of the image.
    pub title: Option<String>,
}

impl Image {
    /// Create an image block with the given location.
    #[must_use]
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One `<video:video>` block.
///
/// The schema requires `loc`, `thumbnail_loc`, `title`, and `description`;
/// this model does not validate their content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    /// URL of a page with the video player.
    pub loc: String,
    /// URL of the thumbnail image.
    pub thumbnail_loc: String,
    /// Title of the video.
    pub title: String,
    /// Description of the video.
    pub description: String,
    /// Direct URL of the media file.
    pub content_loc: Option<String>,
    /// Duration in seconds.
    pub duration: Option<u32>,
    /// Category label.
    pub category: Option<String>,
    /// Tag list; each renders as its own `<video:tag>`.
    pub tags: Vec<String>,
}

impl Video {
    /// Create a video block with the schema-required fields.
    #[must_use]
    pub fn new(
        loc: impl Into<String>,
        thumbnail_loc: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            loc: loc.into(),
            thumbnail_loc: thumbnail_loc.into(),
            title: title.into(),
            description: description.into(),
            content_loc: None,
            duration: None,
            category: None,
            tags: Vec::new(),
        }
    }

    /// Set the direct media URL.
    #[must_use]
    pub fn with_content_loc(mut self, content_loc: impl Into<String>) -> Self {
        self.content_loc = Some(content_loc.into());
        self
    }

    /// Set the duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// One `<xhtml:link>` language/region alternate.
///
/// Rendered as an attribute-only element with `rel`, `hreflang`, and
/// `href`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alternate {
    /// Link relation, e.g. `alternate`.
    pub rel: String,
    /// Language (and optional region) code.
    pub hreflang: String,
    /// URL of the alternate page.
    pub href: String,
}

impl Alternate {
    /// Create an alternate link.
    #[must_use]
    pub fn new(
        rel: impl Into<String>,
        hreflang: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            rel: rel.into(),
            hreflang: hreflang.into(),
            href: href.into(),
        }
    }
}
