//! Plain-text rendering of list screens for the terminal client.

mod pager;
mod table;

pub use pager::{render_pager, render_size_selector, render_totals};
pub use table::render_table;

use crate::models::ResourceKind;
use crate::pagination::{PageButton, PaginationState};
use crate::services::ListView;

pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Whole list screen: heading, then the body for the current view.
///
/// Errors replace the table with a banner; the pagination bar is only drawn
/// next to rows.
pub fn render_screen(
    kind: ResourceKind,
    view: &ListView,
    state: &PaginationState,
    buttons: &[PageButton],
    allowed_sizes: &[u32],
) -> String {
    let mut out = format!("{}\n\n", kind.title());
    match view {
        ListView::Loading => {
            out.push_str(LOADING_PLACEHOLDER);
            out.push('\n');
        }
        ListView::Error(message) => {
            out.push_str(&format!("! Error: {message}\n"));
        }
        ListView::Ready(page) => {
            out.push_str(&render_table(kind, page));
            if !page.is_empty() || page.total_pages > 0 {
                out.push('\n');
                out.push_str(&render_pager(page, buttons));
                out.push('\n');
            }
            out.push_str(&render_size_selector(state.size, allowed_sizes));
            out.push('\n');
            out.push_str(&render_totals(page));
            out.push('\n');
        }
    }
    out
}
