use crate::url::decode_url;
use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the URL of a page the crawler is about to fetch
///
/// Only absolute HTTP(S) URLs with a host are accepted; the parsed value is
/// used as the base for resolving the relative links found on that page.
pub fn parse_page_url(url: &str) -> UrlResult<Url> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }

    if parsed.host_str().is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(parsed)
}

/// A page the crawler can visit
///
/// `url` keeps its percent-encoding and is what goes on the wire. `id` is
/// the decoded form that records and the visited set are keyed by; it is
/// never requested, since `%25` and `%3F` do not survive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: Url,
    pub id: String,
}

impl PageLink {
    pub fn new(url: Url) -> Self {
        let id = decode_url(url.as_str());
        Self { url, id }
    }

    /// Parses a user-supplied page URL, encoded or not
    ///
    /// The result is serialized the same way as links resolved from a
    /// page, so a root given with an uppercase host or an explicit default
    /// port gets the same id as a link back to it.
    pub fn parse(url: &str) -> UrlResult<Self> {
        parse_page_url(url).map(Self::new)
    }
}

/// Resolves a link href against the page it was found on
///
/// Site-relative paths such as `/wiki/Foo` are joined with the origin of
/// the fetching page. Returns None for empty hrefs and fragment-only links.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wikitree::url::resolve_link;
///
/// let page = Url::parse("https://es.wikipedia.org/wiki/Categor%C3%ADa:Voleibol").unwrap();
/// let link = resolve_link("/wiki/Gin%C3%A1sio", &page).unwrap();
/// assert_eq!(link.url.path(), "/wiki/Gin%C3%A1sio");
/// assert_eq!(link.id, "https://es.wikipedia.org/wiki/Ginásio");
/// ```
pub fn resolve_link(href: &str, page_url: &Url) -> Option<PageLink> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    page_url.join(href).ok().map(PageLink::new)
}
