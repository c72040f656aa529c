//! URL classification
//!
//! Groups discovered URLs into the fixed, priority-ordered categories in
//! [`CATEGORIES`]. A URL lands in exactly one bucket: the first category
//! with a matching keyword, or [`UNCATEGORIZED`].

mod categories;

pub use categories::{
    find_category, Category, CATEGORIES, UNCATEGORIZED, UNCATEGORIZED_DISPLAY_NAME,
};

/// URLs grouped by category
///
/// Buckets follow category declaration order with the uncategorized bucket
/// last. Within a bucket, URLs keep their input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One bucket per entry of [`CATEGORIES`], then the uncategorized bucket
    buckets: Vec<Vec<String>>,
}

/// A non-empty bucket as seen by consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket<'a> {
    /// Category name, or [`UNCATEGORIZED`]
    pub name: &'static str,

    /// Name to show end users (folder names, reports)
    pub display_name: &'static str,

    /// URLs in input order
    pub urls: &'a [String],
}

impl Classification {
    fn empty() -> Self {
        Self {
            buckets: vec![Vec::new(); CATEGORIES.len() + 1],
        }
    }

    /// URLs assigned to the named category (or [`UNCATEGORIZED`])
    pub fn get(&self, name: &str) -> Option<&[String]> {
        if name == UNCATEGORIZED {
            return self.buckets.last().map(Vec::as_slice);
        }
        CATEGORIES
            .iter()
            .position(|category| category.name == name)
            .map(|index| self.buckets[index].as_slice())
    }

    /// Name of the category a URL was assigned to, if it was classified
    pub fn category_of(&self, url: &str) -> Option<&'static str> {
        self.non_empty()
            .find(|bucket| bucket.urls.iter().any(|u| u == url))
            .map(|bucket| bucket.name)
    }

    /// Non-empty buckets in priority order, uncategorized last
    pub fn non_empty(&self) -> impl Iterator<Item = Bucket<'_>> {
        let names = CATEGORIES
            .iter()
            .map(|category| (category.name, category.name))
            .chain(std::iter::once((UNCATEGORIZED, UNCATEGORIZED_DISPLAY_NAME)));

        names
            .zip(self.buckets.iter())
            .filter(|(_, urls)| !urls.is_empty())
            .map(|((name, display_name), urls)| Bucket {
                name,
                display_name,
                urls: urls.as_slice(),
            })
    }

    /// Number of non-empty buckets
    pub fn non_empty_count(&self) -> usize {
        self.buckets.iter().filter(|urls| !urls.is_empty()).count()
    }

    /// Total number of classified URLs
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Returns the index into [`CATEGORIES`] of the first matching category
fn match_category(lower_url: &str) -> Option<usize> {
    CATEGORIES.iter().position(|category| {
        category
            .keywords
            .iter()
            .any(|keyword| lower_url.contains(keyword))
    })
}

/// Classifies URLs into priority-ordered categories
///
/// # Examples
///
/// ```
/// use apk_sieve::classify::{classify_urls, UNCATEGORIZED};
///
/// let urls = vec![
///     "https://shop.example.com/cart/add".to_string(),
///     "https://shop.example.com/login".to_string(),
///     "https://cdn.example.com/x".to_string(),
/// ];
/// let classification = classify_urls(&urls);
/// assert_eq!(classification.category_of(&urls[0]), Some("Cart & Checkout"));
/// assert_eq!(classification.category_of(&urls[1]), Some("Authentication & User"));
/// assert_eq!(classification.category_of(&urls[2]), Some(UNCATEGORIZED));
/// ```
pub fn classify_urls(urls: &[String]) -> Classification {
    let mut classification = Classification::empty();
    let uncategorized = CATEGORIES.len();

    for url in urls {
        let lower = url.to_lowercase();
        let index = match_category(&lower).unwrap_or(uncategorized);
        classification.buckets[index].push(url.clone());
    }

    classification
}
