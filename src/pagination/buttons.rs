//! Windowed page-button generation.
//!
//! The bar always shows the first and last page, up to three pages around
//! the current one, and collapses everything else into ellipsis markers.

use serde::Serialize;

/// One entry of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageButton {
    /// A clickable page; `index` is zero-based, `label` is what the user sees.
    Page {
        index: u32,
        label: String,
        active: bool,
    },
    /// A non-interactive gap marker.
    Ellipsis,
}

impl PageButton {
    fn page(index: u32, current_page: u32) -> Self {
        PageButton::Page {
            index,
            label: (u64::from(index) + 1).to_string(),
            active: index == current_page,
        }
    }

    /// Zero-based page index, `None` for ellipses.
    pub fn index(&self) -> Option<u32> {
        match self {
            PageButton::Page { index, .. } => Some(*index),
            PageButton::Ellipsis => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PageButton::Page { active: true, .. })
    }
}

/// Produce the ordered button sequence for `current_page` out of `total_pages`.
///
/// Returns an empty sequence when there are no pages. The caller clamps
/// `current_page` into range; an out-of-range value never panics but may
/// yield a bar without an active button.
pub fn generate_page_buttons(current_page: u32, total_pages: u32) -> Vec<PageButton> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut buttons = Vec::with_capacity(7);
    buttons.push(PageButton::page(0, current_page));

    if current_page > 3 {
        buttons.push(PageButton::Ellipsis);
    }

    // [max(1, current-1), min(total-2, current+1)]; empty when total <= 2 so the
    // window never repeats an anchor.
    let start = current_page.saturating_sub(1).max(1);
    let end = current_page
        .saturating_add(1)
        .min(total_pages.saturating_sub(2));
    buttons.extend((start..=end).map(|index| PageButton::page(index, current_page)));

    // current < total - 4, without underflow
    if u64::from(current_page) + 4 < u64::from(total_pages) {
        buttons.push(PageButton::Ellipsis);
    }

    if total_pages > 1 {
        buttons.push(PageButton::page(total_pages - 1, current_page));
    }

    buttons
}
