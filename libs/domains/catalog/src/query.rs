//! Query engine - filtering and pagination over the full item collection
//!
//! Pure functions: the same items and query always produce the same page.

use crate::models::{Item, ItemPage, ItemQuery};

/// Filter and paginate the item collection.
///
/// When `q` is present and non-empty, an item matches if its `name` or
/// `category` contains `q` as a case-insensitive substring; an absent
/// category simply never matches. `total` and `totalPages` reflect the
/// filtered match count before slicing, and a page past the end yields an
/// empty `items` list rather than an error.
pub fn query(items: &[Item], params: &ItemQuery) -> ItemPage {
    let matched: Vec<&Item> = match params.q.as_deref() {
        Some(q) if !q.is_empty() => {
            let needle = q.to_lowercase();
            items.iter().filter(|item| matches(item, &needle)).collect()
        }
        _ => items.iter().collect(),
    };

    let total = matched.len() as u64;
    let page = params.page();
    let limit = params.limit();
    let start = (page - 1).saturating_mul(limit);

    let page_items: Vec<Item> = matched
        .into_iter()
        .skip(start as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    ItemPage {
        items: page_items,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    }
}

/// Linear scan for an exact id match.
pub fn find_by_id(items: &[Item], id: i64) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

/// Case-insensitive substring match against name and category.
/// `needle` must already be lowercased.
fn matches(item: &Item, needle: &str) -> bool {
    if item.name.to_lowercase().contains(needle) {
        return true;
    }
    item.category
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(needle))
}
