use serde_json::Value;

use crate::pagination::{PageButton, PageResult};

/// Navigation bar: `« Prev`, the page buttons, `Next »`.
///
/// The active page is bracketed and disabled arrows are parenthesized.
pub fn render_pager(page: &PageResult<Value>, buttons: &[PageButton]) -> String {
    let prev = if page.first { "(« Prev)" } else { "« Prev" };
    let next = if page.last { "(Next »)" } else { "Next »" };

    let mut parts = vec![prev.to_string()];
    parts.extend(buttons.iter().map(|button| match button {
        PageButton::Page {
            label,
            active: true,
            ..
        } => format!("[{label}]"),
        PageButton::Page { label, .. } => label.clone(),
        PageButton::Ellipsis => "…".to_string(),
    }));
    parts.push(next.to_string());
    parts.join(" ")
}

/// Page-size selector with the active size bracketed.
pub fn render_size_selector(current: u32, allowed: &[u32]) -> String {
    let options: Vec<String> = allowed
        .iter()
        .map(|size| {
            if *size == current {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect();
    format!("Rows per page: {}", options.join(" "))
}

/// e.g. "Showing 11-20 of 42"
pub fn render_totals(page: &PageResult<Value>) -> String {
    if page.is_empty() {
        return format!("Showing 0 of {}", page.total_elements);
    }
    let from = u64::from(page.number) * u64::from(page.size) + 1;
    let to = from + u64::from(page.number_of_elements) - 1;
    format!("Showing {from}-{to} of {}", page.total_elements)
}
