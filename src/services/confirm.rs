//! Confirmation step for destructive actions.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use tracing::warn;

/// Answer of a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmResult {
    pub is_confirmed: bool,
}

impl ConfirmResult {
    pub const CONFIRMED: Self = Self { is_confirmed: true };
    pub const DECLINED: Self = Self {
        is_confirmed: false,
    };
}

#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> ConfirmResult;
}

/// Says yes without asking (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> ConfirmResult {
        ConfirmResult::CONFIRMED
    }
}

/// Asks `prompt [y/N]` on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmer;

/// Only an explicit yes confirms.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, prompt: &str) -> ConfirmResult {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            let mut stderr = std::io::stderr().lock();
            write!(stderr, "{prompt} [y/N] ")?;
            stderr.flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) if is_affirmative(&line) => ConfirmResult::CONFIRMED,
            Ok(Ok(_)) => ConfirmResult::DECLINED,
            Ok(Err(e)) => {
                warn!(error = %e, "Could not read confirmation, treating as declined");
                ConfirmResult::DECLINED
            }
            Err(e) => {
                warn!(error = %e, "Confirmation prompt task failed");
                ConfirmResult::DECLINED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        for answer in ["y", "Y", "yes", " YES \n"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "\n", "n", "no", "yep", "sure"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }

    #[tokio::test]
    async fn test_auto_confirm() {
        assert!(AutoConfirm.confirm("Delete?").await.is_confirmed);
    }
}
