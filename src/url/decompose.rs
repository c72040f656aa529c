use serde::{Deserialize, Serialize};
use url::Url;

/// Protocol reported when a URL cannot be parsed strictly
pub const FALLBACK_PROTOCOL: &str = "http";

/// A single query parameter, in the order it appeared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

/// Structured form of a URL as written into collection documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    /// The URL text exactly as it was supplied
    pub raw: String,

    /// Scheme without the trailing "://"
    pub protocol: String,

    /// Host split on '.'
    pub host: Vec<String>,

    /// Path split on '/', empty segments removed
    pub path: Vec<String>,

    /// Query parameters; duplicate keys are all kept
    pub query: Vec<QueryParam>,
}

/// Outcome of URL decomposition
///
/// Parsing never fails outright: text that is not a valid hierarchical URL
/// yields a degenerate decomposition built from the caller's fallback values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedUrl {
    /// The URL parsed and has a host
    Strict(UrlParts),
    /// The URL could not be parsed; host and path come from the fallbacks
    Degenerate(UrlParts),
}

impl ParsedUrl {
    /// Borrows the decomposition regardless of how it was produced
    pub fn parts(&self) -> &UrlParts {
        match self {
            Self::Strict(parts) | Self::Degenerate(parts) => parts,
        }
    }

    /// Consumes the value, returning the decomposition
    pub fn into_parts(self) -> UrlParts {
        match self {
            Self::Strict(parts) | Self::Degenerate(parts) => parts,
        }
    }

    /// Returns true if strict parsing failed
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }
}

/// Decomposes a URL into protocol, host labels, path segments and query
///
/// # Arguments
///
/// * `raw` - The URL text
/// * `fallback_host` - Single host label used if strict parsing fails
/// * `fallback_path` - Single path segment used if strict parsing fails
///   (an empty string yields no path segments)
///
/// # Examples
///
/// ```
/// use apk_sieve::url::parse_url;
///
/// let parsed = parse_url("https://api.shop.io/v1/cart?x=1", "", "");
/// let parts = parsed.parts();
/// assert_eq!(parts.protocol, "https");
/// assert_eq!(parts.host, vec!["api", "shop", "io"]);
/// assert_eq!(parts.path, vec!["v1", "cart"]);
/// assert_eq!(parts.query[0].key, "x");
/// ```
pub fn parse_url(raw: &str, fallback_host: &str, fallback_path: &str) -> ParsedUrl {
    match strict_parts(raw) {
        Some(parts) => ParsedUrl::Strict(parts),
        None => {
            tracing::debug!("Falling back to degenerate decomposition for {}", raw);
            ParsedUrl::Degenerate(degenerate_parts(raw, fallback_host, fallback_path))
        }
    }
}

fn strict_parts(raw: &str) -> Option<UrlParts> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;

    let path = url
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    let query = url
        .query_pairs()
        .map(|(key, value)| QueryParam {
            key: key.into_owned(),
            value: value.into_owned(),
        })
        .collect();

    Some(UrlParts {
        raw: raw.to_string(),
        protocol: url.scheme().to_string(),
        host: host.split('.').map(str::to_string).collect(),
        path,
        query,
    })
}

fn degenerate_parts(raw: &str, fallback_host: &str, fallback_path: &str) -> UrlParts {
    let path = if fallback_path.is_empty() {
        Vec::new()
    } else {
        vec![fallback_path.to_string()]
    };

    UrlParts {
        raw: raw.to_string(),
        protocol: FALLBACK_PROTOCOL.to_string(),
        host: vec![fallback_host.to_string()],
        path,
        query: Vec::new(),
    }
}
