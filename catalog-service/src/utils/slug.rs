use crate::models::book::BookSummary;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// URL-safe form of a title.
///
/// Lowercases, folds diacritics away (NFD, then drops combining marks) and
/// keeps only ASCII word characters, whitespace and hyphens. The trimmed
/// result has whitespace and hyphen runs collapsed to a single hyphen.
/// Underscores and hyphens at the edges survive; empty input gives an empty
/// slug.
pub fn slugify_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            slug.push(c);
        }
    }
    slug
}

/// Composite route segment `<slug>-<id>` for a book's detail page.
///
/// Ids must not contain hyphens themselves; [`extract_book_id`] splits on the
/// last one.
pub fn book_slug(book: &BookSummary) -> String {
    let slug = slugify_title(&book.title);
    if slug.is_empty() {
        book.id.clone()
    } else {
        format!("{}-{}", slug, book.id)
    }
}

/// Recovers the id from a composite route segment. Returns `None` when the
/// terminal segment is empty or contains characters no id can have.
pub fn extract_book_id(composite: &str) -> Option<&str> {
    let id = composite.rsplit('-').next().unwrap_or(composite);
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(id)
}
