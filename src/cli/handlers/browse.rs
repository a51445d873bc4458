//! Browse command handler
//!
//! An interactive pager over one resource. Each line read from stdin is one
//! command; the screen is redrawn after every command that changes it.

use std::io::Write;

use super::{initial_state, render_list};
use crate::cli::PageArgs;
use crate::cli::validation::{validate_id, validate_page_number, validate_page_size};
use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};
use crate::models::ResourceKind;
use crate::services::{ListViewModel, MutationOutcome, Services};

const HELP: &str = "\
Commands:
  n            next page
  p            previous page
  g <page>     go to page (starting at 1)
  s <size>     rows per page
  o <sort>     sort, e.g. createdAt,desc
  r            refresh
  d <id>       delete a record
  h            this help
  q            quit";

/// One line of input in browse mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    /// 1-based page number
    Goto(u32),
    Size(u32),
    Sort(String),
    Refresh,
    Delete(String),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_browse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments: '{}'", line.trim()));
    }

    let required = |name: &str| argument.ok_or_else(|| format!("Usage: {verb} <{name}>"));

    let command = match verb.to_lowercase().as_str() {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "g" | "goto" => BrowseCommand::Goto(validate_page_number(required("page")?)?),
        "s" | "size" => BrowseCommand::Size(validate_page_size(required("size")?)?),
        "o" | "sort" => BrowseCommand::Sort(required("sort")?.to_string()),
        "r" | "refresh" => BrowseCommand::Refresh,
        "d" | "delete" => BrowseCommand::Delete(validate_id(required("id")?)?),
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type h for help.")),
    };
    Ok(Some(command))
}

/// Handler for the browse command
pub struct BrowseCommandHandler {
    services: Services,
    pagination: PaginationConfig,
}

impl BrowseCommandHandler {
    pub fn new(services: Services, pagination: PaginationConfig) -> Self {
        Self {
            services,
            pagination,
        }
    }

    /// Run the interactive loop until `q` or end of input.
    pub async fn execute(
        &self,
        kind: ResourceKind,
        paging: &PageArgs,
        out: &mut impl Write,
    ) -> AppResult<()> {
        let list = self
            .services
            .list_at(kind, initial_state(&self.pagination, paging)?);
        list.load().await;
        writeln!(out, "{}", render_list(&list, &self.pagination))?;
        writeln!(out, "Type h for help, q to quit.")?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line().await? else {
                break;
            };
            let command = match parse_browse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(out, "{message}")?;
                    continue;
                }
            };
            match self.apply(&list, command).await? {
                Some(text) => writeln!(out, "{text}")?,
                None => break,
            }
        }
        Ok(())
    }

    /// Apply one command to `list` and return the text to show, or `None`
    /// when the session should end.
    pub async fn apply(
        &self,
        list: &ListViewModel,
        command: BrowseCommand,
    ) -> AppResult<Option<String>> {
        match command {
            BrowseCommand::Next => {
                list.next_page().await;
            }
            BrowseCommand::Prev => {
                list.prev_page().await;
            }
            BrowseCommand::Goto(number) => {
                let index = number - 1;
                let view = list.view();
                if let Some(page) = view.page()
                    && index >= page.total_pages.max(1)
                {
                    return Ok(Some(format!(
                        "Page {number} does not exist; there are {} pages",
                        page.total_pages
                    )));
                }
                list.set_page(index).await;
            }
            BrowseCommand::Size(size) => {
                if !self.pagination.is_allowed_size(size) {
                    return Ok(Some(format!(
                        "Page size {size} is not offered; choose one of {}",
                        self.allowed_sizes()
                    )));
                }
                list.set_page_size(size).await?;
            }
            BrowseCommand::Sort(sort) => {
                list.set_sort(&sort).await;
            }
            BrowseCommand::Refresh => {
                list.refetch().await;
            }
            BrowseCommand::Delete(id) => {
                let outcome = self
                    .services
                    .mutations
                    .delete(Some(list), list.kind(), &id)
                    .await;
                if matches!(outcome, MutationOutcome::Cancelled) {
                    return Ok(Some("Delete cancelled".to_string()));
                }
            }
            BrowseCommand::Help => return Ok(Some(HELP.to_string())),
            BrowseCommand::Quit => return Ok(None),
        }
        Ok(Some(render_list(list, &self.pagination)))
    }

    fn allowed_sizes(&self) -> String {
        self.pagination
            .allowed_sizes
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Next stdin line, or `None` at end of input.
///
/// Reads through the blocking std handle so that confirmation prompts share
/// the same buffer.
async fn read_line() -> AppResult<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .map(|read| (read > 0).then_some(line))
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })??;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::testing::{FakeSource, RecordingNotifier, ScriptedConfirmer};
    use std::sync::Arc;

    fn handler(source: Arc<FakeSource>, confirm: bool) -> BrowseCommandHandler {
        let settings = Settings::default();
        let services = Services::new(
            source,
            Arc::new(RecordingNotifier::default()),
            Arc::new(ScriptedConfirmer::new(confirm)),
            &settings,
        );
        BrowseCommandHandler::new(services, settings.pagination)
    }

    async fn mounted(handler: &BrowseCommandHandler, kind: ResourceKind) -> ListViewModel {
        let list = handler
            .services
            .list_at(kind, initial_state(&handler.pagination, &PageArgs::default()).unwrap());
        list.load().await;
        list
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_browse_command("n"), Ok(Some(BrowseCommand::Next)));
        assert_eq!(parse_browse_command(" Prev "), Ok(Some(BrowseCommand::Prev)));
        assert_eq!(parse_browse_command("g 4"), Ok(Some(BrowseCommand::Goto(4))));
        assert_eq!(parse_browse_command("s 20"), Ok(Some(BrowseCommand::Size(20))));
        assert_eq!(
            parse_browse_command("o title,asc"),
            Ok(Some(BrowseCommand::Sort("title,asc".to_string())))
        );
        assert_eq!(
            parse_browse_command("d 17"),
            Ok(Some(BrowseCommand::Delete("17".to_string())))
        );
        assert_eq!(parse_browse_command("?"), Ok(Some(BrowseCommand::Help)));
        assert_eq!(parse_browse_command("q"), Ok(Some(BrowseCommand::Quit)));
        assert_eq!(parse_browse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_browse_command("g").unwrap_err().contains("Usage: g <page>"));
        assert!(parse_browse_command("g 0").is_err());
        assert!(parse_browse_command("s ten").is_err());
        assert!(parse_browse_command("n 2 3").is_err());
        assert!(parse_browse_command("x").unwrap_err().contains("Unknown command 'x'"));
    }

    #[tokio::test]
    async fn test_paging_through_list() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Companies, 25));
        let handler = handler(source, true);
        let list = mounted(&handler, ResourceKind::Companies).await;

        let screen = handler.apply(&list, BrowseCommand::Next).await.unwrap().unwrap();
        assert_eq!(list.state().page, 1);
        assert!(screen.contains("Showing 11-20 of 25"));

        handler.apply(&list, BrowseCommand::Goto(3)).await.unwrap();
        assert_eq!(list.state().page, 2);

        handler.apply(&list, BrowseCommand::Next).await.unwrap();
        assert_eq!(list.state().page, 2, "next is a no-op on the last page");
    }

    #[tokio::test]
    async fn test_goto_out_of_range_is_refused() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Companies, 25));
        let handler = handler(source.clone(), true);
        let list = mounted(&handler, ResourceKind::Companies).await;

        let text = handler.apply(&list, BrowseCommand::Goto(4)).await.unwrap().unwrap();
        assert_eq!(text, "Page 4 does not exist; there are 3 pages");
        assert_eq!(list.state().page, 0);
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_size_must_be_offered() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Users, 30));
        let handler = handler(source, true);
        let list = mounted(&handler, ResourceKind::Users).await;
        handler.apply(&list, BrowseCommand::Next).await.unwrap();

        let text = handler.apply(&list, BrowseCommand::Size(7)).await.unwrap().unwrap();
        assert!(text.starts_with("Page size 7 is not offered"));
        assert_eq!(list.state().size, 10);

        handler.apply(&list, BrowseCommand::Size(20)).await.unwrap();
        assert_eq!(list.state().size, 20);
        assert_eq!(list.state().page, 0);
    }

    #[tokio::test]
    async fn test_delete_declined_keeps_rows() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::BlogTags, 3));
        let handler = handler(source.clone(), false);
        let list = mounted(&handler, ResourceKind::BlogTags).await;

        let text = handler
            .apply(&list, BrowseCommand::Delete("2".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(text, "Delete cancelled");
        assert_eq!(source.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_confirmed_redraws_without_row() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::BlogTags, 3));
        let handler = handler(source.clone(), true);
        let list = mounted(&handler, ResourceKind::BlogTags).await;

        let screen = handler
            .apply(&list, BrowseCommand::Delete("2".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert!(screen.contains("Showing 1-2 of 2"));
        assert!(!screen.contains("row 2"));
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Users, 1));
        let handler = handler(source, true);
        let list = mounted(&handler, ResourceKind::Users).await;
        assert_eq!(handler.apply(&list, BrowseCommand::Quit).await.unwrap(), None);
        let help = handler.apply(&list, BrowseCommand::Help).await.unwrap().unwrap();
        assert!(help.contains("g <page>"));
    }
}
