// Reverse-chronological ordering and "reveal N more" pagination
use serde::Serialize;

use super::dashboard::Timestamped;

/// Sort newest first; entries with equal timestamps keep their relative order
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub visible: usize,
    pub total: usize,
    pub has_more: bool,
    /// Visible count to request for the next "show more" click
    pub next_visible: Option<usize>,
}

/// Reveal the first `visible` items (at least one page), clamped to the list length
pub fn reveal<T: Clone>(items: &[T], visible: Option<usize>, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let visible = visible.unwrap_or(page_size).max(page_size).min(total);
    let has_more = visible < total;

    Page {
        items: items[..visible].to_vec(),
        visible,
        total,
        has_more,
        next_visible: has_more.then(|| (visible + page_size).min(total)),
    }
}
