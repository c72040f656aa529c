use crate::config::FilterConfig;

/// Minimum candidate length, in characters
pub const MIN_CANDIDATE_LEN: usize = 10;

/// Characters that never appear in an endpoint we want to keep
const FORBIDDEN_CHARS: &[char] = &['<', '>', '{', '}', '\\', '^', '`'];

/// Known ad, analytics, tracker, OS-vendor, documentation and URL-shortener
/// domains. Any candidate containing one of these substrings is dropped.
///
/// The list is hand-tuned and order-preserving; downstream consumers rely on
/// its exact contents.
pub const BLACKLIST: &[&str] = &[
    "google-analytics.com",
    "googletagmanager.com",
    "googleapis.com",
    "googlesyndication.com",
    "googleadservices.com",
    "doubleclick.net",
    "admob.com",
    "app-measurement.com",
    "crashlytics.com",
    "gstatic.com",
    "facebook.com",
    "facebook.net",
    "fbcdn.net",
    "appsflyer.com",
    "adjust.com",
    "branch.io",
    "mixpanel.com",
    "amplitude.com",
    "segment.io",
    "flurry.com",
    "onesignal.com",
    "applovin.com",
    "unity3d.com",
    "ironsrc.com",
    "vungle.com",
    "chartboost.com",
    "inmobi.com",
    "mopub.com",
    "android.com",
    "apple.com",
    "w3.org",
    "schema.org",
    "apache.org",
    "github.com",
    "stackoverflow.com",
    "mozilla.org",
    "youtube.com",
    "twitter.com",
    "bit.ly",
    "goo.gl",
    "tinyurl.com",
];

/// Loopback markers; candidates pointing at the device itself are dropped
pub const LOOPBACK_MARKERS: &[&str] = &["localhost", "127.0.0.1"];

/// Static asset extensions (compared case-insensitively against the end of
/// the whole candidate)
pub const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    // images
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico", ".bmp",
    // fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // stylesheets
    ".css",
    // markup, script and data formats
    ".html", ".htm", ".xml", ".js", ".json", ".txt",
    // media
    ".mp3", ".mp4", ".wav", ".ogg", ".webm", ".avi", ".mov",
    // archives
    ".zip", ".rar", ".7z", ".gz", ".tar",
    // package files
    ".apk", ".xapk", ".aab", ".dex", ".jar",
];

/// The filter stage that rejected a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Shorter than [`MIN_CANDIDATE_LEN`]
    TooShort,
    /// Contains no '.'
    NoDot,
    /// Contains a forbidden character or whitespace
    ForbiddenCharacter,
    /// Contains a blacklisted domain substring
    Blacklisted,
    /// Points at localhost / 127.0.0.1
    Loopback,
    /// Ends with a static asset extension
    StaticAsset,
}

/// Precision-favoring predicate over extracted URL candidates
///
/// Stages run in a fixed order and the first failing stage is reported.
/// Genuine endpoints that happen to contain a blacklisted substring are
/// dropped along with the noise.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    extra_blacklist: Vec<String>,
}

impl CandidateFilter {
    /// Creates a filter using only the built-in lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter that also rejects the given substrings, checked after
    /// the built-in blacklist
    pub fn with_extra_blacklist(extra_blacklist: Vec<String>) -> Self {
        Self { extra_blacklist }
    }

    /// Creates a filter from the `[filter]` configuration section
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::with_extra_blacklist(config.extra_blacklist.clone())
    }

    /// Returns true if the candidate passes every stage
    pub fn accepts(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Runs every stage, returning the first one that rejects the candidate
    pub fn check(&self, candidate: &str) -> Result<(), Rejection> {
        if candidate.chars().count() < MIN_CANDIDATE_LEN {
            return Err(Rejection::TooShort);
        }

        if !candidate.contains('.') {
            return Err(Rejection::NoDot);
        }

        if candidate
            .chars()
            .any(|c| c.is_whitespace() || FORBIDDEN_CHARS.contains(&c))
        {
            return Err(Rejection::ForbiddenCharacter);
        }

        if self.is_blacklisted(candidate) {
            return Err(Rejection::Blacklisted);
        }

        if LOOPBACK_MARKERS.iter().any(|m| candidate.contains(m)) {
            return Err(Rejection::Loopback);
        }

        if has_static_asset_extension(candidate) {
            return Err(Rejection::StaticAsset);
        }

        Ok(())
    }

    fn is_blacklisted(&self, candidate: &str) -> bool {
        BLACKLIST.iter().any(|domain| candidate.contains(domain))
            || self
                .extra_blacklist
                .iter()
                .any(|domain| candidate.contains(domain.as_str()))
    }
}

fn has_static_asset_extension(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    STATIC_ASSET_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_endpoint() {
        let filter = CandidateFilter::new();
        assert!(filter.accepts("https://api.example-shop.com/v1/cart/add?x=1"));
        assert!(filter.accepts("http://backend.example.net/graphql"));
    }

    #[test]
    fn test_rejects_short_candidates() {
        let filter = CandidateFilter::new();
        assert_eq!(filter.check("http://a."), Err(Rejection::TooShort));
        assert_eq!(filter.check("http://a.b"), Ok(()));
    }

    #[test]
    fn test_rejects_without_dot() {
        let filter = CandidateFilter::new();
        assert_eq!(filter.check("http://intranet/api"), Err(Rejection::NoDot));
    }

    #[test]
    fn test_rejects_forbidden_characters() {
        let filter = CandidateFilter::new();
        for candidate in [
            "https://a.example.com/<x",
            "https://a.example.com/x>",
            "https://a.example.com/{id}",
            "https://a.example.com/x}",
            "https://a.example.com/a\\b",
            "https://a.example.com/a^b",
            "https://a.example.com/a`b",
            "https://a.example.com/a b",
            "https://a.example.com/a\tb",
            "https://a.example.com/a\nb",
        ] {
            assert_eq!(
                filter.check(candidate),
                Err(Rejection::ForbiddenCharacter),
                "{candidate}"
            );
        }
    }

    #[test]
    fn test_rejects_every_blacklisted_domain() {
        let filter = CandidateFilter::new();
        for domain in BLACKLIST {
            let candidate = format!("https://sub.{}/path", domain);
            assert_eq!(filter.check(&candidate), Err(Rejection::Blacklisted), "{domain}");
        }
    }

    #[test]
    fn test_blacklist_matches_anywhere() {
        let filter = CandidateFilter::new();
        assert_eq!(
            filter.check("https://api.example.com/redirect?to=facebook.com"),
            Err(Rejection::Blacklisted)
        );
    }

    #[test]
    fn test_extra_blacklist() {
        let filter = CandidateFilter::with_extra_blacklist(vec!["internal.example".to_string()]);
        assert_eq!(
            filter.check("https://metrics.internal.example/v1"),
            Err(Rejection::Blacklisted)
        );
        assert!(filter.accepts("https://api.example.com/v1"));
    }

    #[test]
    fn test_rejects_loopback() {
        let filter = CandidateFilter::new();
        assert_eq!(
            filter.check("http://localhost:8080/api/v1.0"),
            Err(Rejection::Loopback)
        );
        assert_eq!(
            filter.check("http://127.0.0.1:3000/api"),
            Err(Rejection::Loopback)
        );
    }

    #[test]
    fn test_rejects_static_assets_case_insensitively() {
        let filter = CandidateFilter::new();
        assert_eq!(
            filter.check("https://cdn.example.com/logo.PNG"),
            Err(Rejection::StaticAsset)
        );
        assert_eq!(
            filter.check("https://cdn.example.com/app.min.js"),
            Err(Rejection::StaticAsset)
        );
        assert_eq!(
            filter.check("https://cdn.example.com/font.woff2"),
            Err(Rejection::StaticAsset)
        );
    }

    #[test]
    fn test_extension_only_checked_at_end() {
        let filter = CandidateFilter::new();
        assert!(filter.accepts("https://cdn.example.com/logo.png?size=2"));
        assert!(filter.accepts("https://api.example.com/config.json/v2"));
    }

    #[test]
    fn test_stage_order() {
        let filter = CandidateFilter::new();
        // Blacklist is checked before the extension stage.
        assert_eq!(
            filter.check("https://www.gstatic.com/logo.png"),
            Err(Rejection::Blacklisted)
        );
    }
}
