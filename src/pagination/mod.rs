//! Pagination primitives shared by every list screen.
//!
//! - [`PaginationState`]: the client-held `(page, size, sort)` triple
//! - [`PageResult`]: one page of rows as returned by the backend
//! - [`generate_page_buttons`]: the windowed page-number bar

mod buttons;
mod page;
mod state;

pub use buttons::{PageButton, generate_page_buttons};
pub use page::PageResult;
pub use state::{DEFAULT_PAGE_SIZE, DEFAULT_SORT, PaginationState};
