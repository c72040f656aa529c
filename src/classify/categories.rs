/// A named keyword bucket
///
/// A URL belongs to the first category (in [`CATEGORIES`] order) that has a
/// keyword occurring in the lower-cased URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Name, also used as the folder name in exported collections
    pub name: &'static str,

    /// Lower-case substrings that select this category
    pub keywords: &'static [&'static str],
}

/// Bucket for URLs no category claims; always ordered last
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Folder name used for the uncategorized bucket in exported collections
pub const UNCATEGORIZED_DISPLAY_NAME: &str = "Other Endpoints";

/// Categories in priority order. The order and keyword lists are part of the
/// observable classification behavior.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Authentication & User",
        keywords: &[
            "auth", "login", "logout", "signin", "signup", "register", "oauth", "token",
            "session", "password", "otp", "verify", "account", "user", "profile",
        ],
    },
    Category {
        name: "Cart & Checkout",
        keywords: &[
            "cart", "checkout", "basket", "order", "payment", "pay", "coupon", "voucher",
        ],
    },
    Category {
        name: "Products & Catalog",
        keywords: &[
            "product", "catalog", "item", "sku", "category", "inventory", "search", "listing",
        ],
    },
    Category {
        name: "Content & Media",
        keywords: &[
            "content", "media", "image", "video", "feed", "post", "article", "news", "banner",
            "cms",
        ],
    },
    Category {
        name: "Notifications & Messaging",
        keywords: &[
            "notification", "notify", "push", "message", "chat", "inbox", "sms", "email",
        ],
    },
    Category {
        name: "Location & Delivery",
        keywords: &[
            "location", "geo", "map", "address", "store", "delivery", "shipping",
        ],
    },
    Category {
        name: "Configuration & Features",
        keywords: &[
            "config", "setting", "feature", "flag", "remote", "version", "update", "init",
            "bootstrap",
        ],
    },
    Category {
        name: "Analytics & Tracking",
        keywords: &[
            "analytics", "track", "event", "metric", "log", "telemetry", "stat",
        ],
    },
    Category {
        name: "General API",
        keywords: &[
            "/api", "api.", "/v1", "/v2", "/v3", "/rest", "/graphql", "/rpc", "/service",
        ],
    },
];

/// Looks up a category by name
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}
