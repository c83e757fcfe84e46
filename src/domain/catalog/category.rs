use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Lowercases and trims a slug, returning `None` when it is not made of
/// `[a-z0-9]` words joined by single hyphens.
pub fn normalize_slug(raw: &str) -> Option<String> {
    let slug = raw.trim().to_lowercase();
    if SLUG_RE.is_match(&slug) {
        Some(slug)
    } else {
        None
    }
}
