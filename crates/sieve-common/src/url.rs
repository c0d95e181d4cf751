//! URL resolution utilities.
//!
//! [`UrlResolver`] turns the relative paths found in a document's links into
//! absolute URLs against the document's own (root) URL, and keeps the domain
//! breakdown of both the root and the most recently resolved URL.

/// Protocol prefixes recognized when splitting off the domain of a URL.
const DOMAIN_PROTOCOLS: [&str; 4] = ["http://", "https://", "ftp://", "ftps://"];

/// Non-hierarchical schemes that make a link absolute on their own.
const OPAQUE_SCHEMES: [&str; 5] = ["mailto:", "tel:", "javascript:", "data:", "file:"];

/// The full-domain / domain / subdomain breakdown of a URL.
///
/// For `http://www.sales.mycompany.com/index.html` this is
/// `http://www.sales.mycompany.com`, `mycompany.com` and `sales.mycompany.com`.
/// A URL without a subdomain reports its domain as the subdomain, and a
/// leading `www.` never counts as one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    /// Protocol and host, without a trailing slash.
    pub full_domain: String,
    /// The last two dot-separated labels of the host.
    pub domain: String,
    /// The last three labels of the host, or the domain if there are only two.
    pub subdomain: String,
}

impl DomainParts {
    /// Split `url` into its domain parts.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let start_index = DOMAIN_PROTOCOLS
            .iter()
            .find(|protocol| starts_with_ignore_case(url, protocol))
            .map_or(0, |protocol| protocol.len());

        let full_domain = url[start_index..]
            .find('/')
            .map_or(url, |slash| &url[..start_index + slash]);

        let mut parts = Self {
            full_domain: full_domain.to_string(),
            ..Self::default()
        };

        // go to the dot in front of the top-level label (".com")
        let Some(last_dot) = full_domain.rfind('.').filter(|&dot| dot > 0) else {
            return parts;
        };
        // then back one more label, past a "www." prefix or subdomain
        let domain_start = full_domain[..last_dot]
            .rfind('.')
            .map_or(start_index, |dot| dot + 1);
        parts.domain = full_domain[domain_start..].to_string();
        parts.subdomain.clone_from(&parts.domain);

        if domain_start != start_index
            && domain_start > 2
            && let Some(dot) = full_domain[..domain_start - 1].rfind('.')
        {
            parts.subdomain = full_domain[dot + 1..].to_string();
        }
        parts
    }
}

/// Resolves relative links against a root URL.
///
/// The resolver is meant to be owned by whatever walks the links of one
/// document: each call to [`UrlResolver::resolve`] overwrites the current URL
/// and its domain breakdown.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    root_url: String,
    current_url: String,
    root_domain: DomainParts,
    current_domain: DomainParts,
    image_name: String,
    last_slash: usize,
    query: Option<usize>,
}

impl UrlResolver {
    /// Create a resolver for links found in the document at `root_url`.
    ///
    /// A root without any path gets a trailing `/` so that relative links
    /// have a directory to attach to.
    #[must_use]
    pub fn new(root_url: &str) -> Self {
        let mut root_url = root_url.to_string();
        let (last_slash, query) = find_last_directory(&mut root_url);
        let root_domain = DomainParts::parse(&root_url);
        let image_name = if query.is_some() {
            image_name_from_url(&root_url)
        } else {
            String::new()
        };
        Self {
            current_url: root_url.clone(),
            current_domain: root_domain.clone(),
            root_url,
            root_domain,
            image_name,
            last_slash,
            query,
        }
    }

    /// Resolve `path` into an absolute URL.
    ///
    /// Handles absolute links, query-only links (`?page=2`), root-relative
    /// links (`/about.html`), `./` and `../` prefixes and plain relative links.
    /// A trailing `#bookmark` is removed and spaces are encoded as `%20`.
    ///
    /// When `is_image` is set and the link reduces to a bare directory, the
    /// `image=` query value of the root URL is appended (some PHP galleries
    /// only put the folder in the `src`).
    ///
    /// Returns `None` for an empty path.
    pub fn resolve(&mut self, path: &str, is_image: bool) -> Option<&str> {
        if path.is_empty() {
            return None;
        }

        if is_absolute_url(path) {
            self.current_url = path.to_string();
        } else if let Some(query) = self.query.filter(|_| path.starts_with('?')) {
            self.current_url = format!("{}{path}", &self.root_url[..query]);
        } else if let Some(rest) = path.strip_prefix('/') {
            self.current_url.clone_from(&self.root_domain.full_domain);
            if self.current_url.len() > 1 && !self.current_url.ends_with('/') {
                self.current_url.push('/');
            }
            self.current_url.push_str(rest);
        } else if starts_with_ignore_case(path, "./") {
            self.current_url = format!("{}{}", self.root_directory(), &path[2..]);
        } else if path.starts_with("../") {
            self.current_url = self.resolve_parent_relative(path);
        } else {
            self.current_url = format!("{}{path}", self.root_directory());
        }

        // bookmarks point inside the page, not to another one
        if let Some(bookmark) = self.current_url.rfind('#') {
            self.current_url.truncate(bookmark);
        }

        if is_image && self.current_url.len() > 1 && self.current_url.ends_with('/') {
            self.current_url.push_str(&self.image_name);
        }

        self.current_domain = DomainParts::parse(&self.current_url);

        if self.current_url.contains(' ') {
            self.current_url = self.current_url.replace(' ', "%20");
        }
        Some(self.current_url.as_str())
    }

    /// Walk back one directory of the root URL per leading `../`.
    ///
    /// The walk never goes back past the protocol separator; superfluous
    /// `../` segments are simply dropped.
    fn resolve_parent_relative(&self, path: &str) -> String {
        let mut levels = 0;
        let mut rest = path;
        while let Some(stripped) = rest.strip_prefix("../") {
            levels += 1;
            rest = stripped;
        }

        let root = &self.root_url;
        let mut last_slash = self.last_slash.saturating_sub(1);
        for _ in 0..levels {
            match root[..last_slash].rfind('/') {
                Some(slash) => last_slash = slash,
                None => break,
            }
        }

        // landed on the "//" of the protocol, so move up to the first real folder
        let bytes = root.as_bytes();
        if last_slash > 0
            && last_slash + 2 < root.len()
            && (bytes[last_slash - 1] == b'/' || bytes[last_slash + 1] == b'/')
        {
            // byte search: the host may start with a multi-byte character
            match bytes[last_slash + 2..].iter().position(|&b| b == b'/') {
                Some(slash) => last_slash += 2 + slash,
                None => return format!("{root}{rest}"),
            }
        }
        format!("{}{rest}", &root[..=last_slash])
    }

    /// The root URL up to and including its last directory separator.
    fn root_directory(&self) -> &str {
        &self.root_url[..=self.last_slash]
    }

    /// The root URL (with a `/` appended if it had no path).
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// The most recently resolved URL (the root URL before any resolution).
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Domain breakdown of the root URL.
    #[must_use]
    pub const fn root_domain(&self) -> &DomainParts {
        &self.root_domain
    }

    /// Domain breakdown of the most recently resolved URL.
    #[must_use]
    pub const fn current_domain(&self) -> &DomainParts {
        &self.current_domain
    }

    /// Whether the root URL carries a query (`?...`).
    #[must_use]
    pub const fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// The `image=` query value taken from the root URL, if any.
    #[must_use]
    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// The directory of the current URL without its protocol.
    ///
    /// `http://www.website.com/blah/blah.htm` yields `www.website.com/blah`.
    #[must_use]
    pub fn directory_path(&self) -> String {
        let mut url = self.current_url.clone();
        let (last_slash, _) = find_last_directory(&mut url);
        let start = DOMAIN_PROTOCOLS
            .iter()
            .find(|protocol| starts_with_ignore_case(&url, protocol))
            .map_or(0, |protocol| protocol.len());
        url.get(start..last_slash).unwrap_or_default().to_string()
    }
}

/// Locate the last directory separator of `url`, ignoring any inside a query.
///
/// A URL that has no path at all (e.g. `http://www.website.com`) gets a `/`
/// appended. Returns the separator's index and the query marker's index.
fn find_last_directory(url: &mut String) -> (usize, Option<usize>) {
    let query = url.rfind('?');
    let mut last_slash = url.rfind('/');

    if let (Some(query), Some(slash)) = (query, last_slash)
        && query > 0
        && slash > query
    {
        last_slash = url[..query].rfind('/');
    }

    match last_slash {
        Some(slash) if slash > 0 && url.as_bytes()[slash - 1] != b'/' => (slash, query),
        Some(0) => (0, query),
        _ => {
            url.push('/');
            (url.len() - 1, query)
        }
    }
}

/// Whether `path` is already an absolute URL (has a `scheme://` prefix or is
/// an opaque link such as `mailto:`).
#[must_use]
pub fn is_absolute_url(path: &str) -> bool {
    if OPAQUE_SCHEMES
        .iter()
        .any(|scheme| starts_with_ignore_case(path, scheme))
    {
        return true;
    }
    path.find("://").is_some_and(|separator| {
        separator > 0
            && path[..separator]
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
    })
}

/// The value of an `image=` parameter in the query of `url`, or an empty string.
///
/// `http://mysite.com/gallery.php?image=cat.jpg&size=2` yields `cat.jpg`.
#[must_use]
pub fn image_name_from_url(url: &str) -> String {
    const IMAGE_PARAM: &str = "image=";
    let Some(query) = url.find('?') else {
        return String::new();
    };
    let query = &url[query..];
    let Some(start) = find_ignore_case(query, IMAGE_PARAM) else {
        return String::new();
    };
    let value = &query[start + IMAGE_PARAM.len()..];
    value
        .find('&')
        .map_or(value, |end| &value[..end])
        .to_string()
}

/// Everything after the first dot of the host (skipping a `www.` prefix) up to
/// the path or query.
///
/// `www.mysite.co.uk/page.htm` yields `co.uk`.
#[must_use]
pub fn top_level_domain_from_url(url: &str) -> String {
    const WWW: &str = "www.";
    let start = find_ignore_case(url, WWW).map_or(url, |www| &url[www + WWW.len()..]);
    let Some(dot) = start.find('.') else {
        return String::new();
    };
    let tld = &start[dot + 1..];
    tld.find(['/', '?']).map_or(tld, |end| &tld[..end]).to_string()
}

/// Whether `url` is only a domain, with no path beyond an optional trailing `/`.
#[must_use]
pub fn is_top_level_domain_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let after_protocol = url.find("//").map_or(url, |p| &url[p + 2..]);
    after_protocol
        .find('/')
        .is_none_or(|slash| slash + 1 == after_protocol.len())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_last_directory_appends_slash_to_bare_domain() {
        let mut url = String::from("http://www.website.com");
        let (slash, query) = find_last_directory(&mut url);
        assert_eq!(url, "http://www.website.com/");
        assert_eq!(slash, url.len() - 1);
        assert_eq!(query, None);
    }

    #[test]
    fn test_find_last_directory_ignores_slash_in_query() {
        let mut url = String::from("http://a.com/dir/page.php?path=x/y");
        let (slash, query) = find_last_directory(&mut url);
        assert_eq!(slash, 16);
        assert_eq!(query, Some(25));
    }
}
