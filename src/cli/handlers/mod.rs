//! Command handlers for CLI operations
//!
//! Each handler owns the services it needs and writes its output to the
//! `Write` it is given, so commands can be exercised without a terminal.

pub mod browse;
pub mod check;
pub mod list;
pub mod mutate;

pub use browse::{BrowseCommand, BrowseCommandHandler, parse_browse_command};
pub use check::CheckCommandHandler;
pub use list::ListCommandHandler;
pub use mutate::MutateCommandHandler;

use crate::cli::PageArgs;
use crate::config::PaginationConfig;
use crate::error::AppResult;
use crate::pagination::PaginationState;
use crate::render::render_screen;
use crate::services::ListViewModel;

/// Mount position for a list screen from the configured defaults and the
/// `--size`/`--sort` flags.
pub(crate) fn initial_state(
    config: &PaginationConfig,
    paging: &PageArgs,
) -> AppResult<PaginationState> {
    let mut state = PaginationState::from_config(config);
    if let Some(size) = paging.size {
        state = state.with_size(size)?;
    }
    if let Some(sort) = &paging.sort {
        state = state.with_sort(sort.trim());
    }
    Ok(state)
}

/// Render whatever `list` currently shows.
pub(crate) fn render_list(list: &ListViewModel, config: &PaginationConfig) -> String {
    render_screen(
        list.kind(),
        &list.view(),
        &list.state(),
        &list.buttons(),
        &config.allowed_sizes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_uses_config_defaults() {
        let config = PaginationConfig::default();
        let state = initial_state(&config, &PageArgs::default()).unwrap();
        assert_eq!(state, PaginationState::from_config(&config));
    }

    #[test]
    fn test_initial_state_applies_flags() {
        let paging = PageArgs {
            size: Some(20),
            sort: Some(" title,asc ".to_string()),
        };
        let state = initial_state(&PaginationConfig::default(), &paging).unwrap();
        assert_eq!(state.page, 0);
        assert_eq!(state.size, 20);
        assert_eq!(state.sort, "title,asc");
    }
}
