//! URL parsing and rendering.
//!
//! `ParsedUrl::parse` is the only place raw URLs are taken apart; everything
//! else works on the structured `(language, segment, fragment)` triple.

use crate::i18n::Language;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:[A-Za-z][A-Za-z0-9+.-]*://[^/?#]*)?(?P<path>[^?#]*)(?:\?[^#]*)?(?:#(?P<fragment>.*))?$",
        )
        .expect("URL pattern is valid")
    })
}

/// Percent-decode a URL component. Sequences that do not decode to UTF-8 are
/// kept as written.
fn decode(component: &str) -> String {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}

/// A URL split into the parts routing cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Path as observed, percent-decoded, without scheme, host, query or
    /// fragment.
    pub raw_path: String,
    /// First path segment as written; not validated.
    pub language: String,
    /// Everything after the language segment, empty slashes collapsed.
    /// Empty for the landing section.
    pub segment: String,
    pub fragment: Option<String>,
}

impl ParsedUrl {
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        let (raw_path, fragment) = match url_regex().captures(url) {
            Some(caps) => (
                caps.name("path").map_or("", |m| m.as_str()),
                caps.name("fragment").map(|m| m.as_str()),
            ),
            None => (url, None),
        };

        let raw_path = decode(raw_path);
        let mut parts = raw_path.split('/').filter(|part| !part.is_empty());
        let language = parts.next().unwrap_or_default().to_string();
        let segment = parts.collect::<Vec<_>>().join("/");

        Self {
            language,
            segment,
            fragment: fragment.filter(|f| !f.is_empty()).map(decode),
            raw_path,
        }
    }

    pub fn is_landing(&self) -> bool {
        self.segment.is_empty()
    }
}

/// Where a navigation should end up: `/{language}[/{path}][#{fragment}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub language: Language,
    /// Translated path segment; `None` for the language root.
    pub path: Option<String>,
    /// Translated anchor id.
    pub fragment: Option<String>,
}

impl NavigationTarget {
    /// Build a target, dropping empty components.
    pub fn new(language: Language, path: &str, fragment: Option<&str>) -> Self {
        Self {
            language,
            path: Some(path).filter(|p| !p.is_empty()).map(str::to_string),
            fragment: fragment.filter(|f| !f.is_empty()).map(str::to_string),
        }
    }

    /// Router-style path segments, e.g. `["de", "ueber-mich"]`.
    pub fn segments(&self) -> Vec<String> {
        std::iter::once(self.language.code().to_string())
            .chain(self.path.clone())
            .collect()
    }

    /// The path portion, e.g. `/de/ueber-mich`.
    pub fn path_string(&self) -> String {
        match &self.path {
            Some(path) => format!("/{}/{}", self.language.code(), path),
            None => format!("/{}", self.language.code()),
        }
    }

    /// Full URL including the fragment.
    pub fn url(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.path_string(), fragment),
            None => self.path_string(),
        }
    }

    /// Whether `current` already shows this target's path.
    pub fn same_path(&self, current: &ParsedUrl) -> bool {
        current.language == self.language.code()
            && current.segment == self.path.as_deref().unwrap_or_default()
    }

    /// Whether `current` carries this target's fragment.
    pub fn same_fragment(&self, current: &ParsedUrl) -> bool {
        current.fragment == self.fragment
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
