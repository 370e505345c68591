//! Terminal prompts backed by `inquire`
//!
//! inquire blocks on the terminal, so every prompt runs on the blocking pool.

use async_trait::async_trait;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use tracing::debug;

use crate::application::ports::{Answer, PromptError, PromptProvider, Question};

/// Rows shown at once in list prompts
const PAGE_SIZE: usize = 15;

pub struct InquirePrompt {
    page_size: usize,
}

impl InquirePrompt {
    pub fn new() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }

    fn ask_blocking(question: Question, page_size: usize) -> Result<Answer, InquireError> {
        match question {
            Question::Select { message, choices } => Select::new(&message, choices)
                .with_page_size(page_size)
                .raw_prompt()
                .map(|choice| Answer::Selected(choice.index)),
            Question::MultiSelect { message, choices } => MultiSelect::new(&message, choices)
                .with_page_size(page_size)
                .raw_prompt()
                .map(|picked| Answer::MultiSelected(picked.into_iter().map(|c| c.index).collect())),
            Question::Input { message, default } => {
                let mut text = Text::new(&message);
                if let Some(default) = default.as_deref().filter(|d| !d.is_empty()) {
                    text = text.with_default(default);
                }
                text.prompt().map(Answer::Text)
            }
            Question::Confirm { message, default } => Confirm::new(&message)
                .with_default(default)
                .prompt()
                .map(Answer::Confirmed),
        }
    }
}

impl Default for InquirePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptProvider for InquirePrompt {
    async fn ask(&self, question: Question) -> Result<Answer, PromptError> {
        debug!(message = question.message(), "prompting");
        let page_size = self.page_size;
        tokio::task::spawn_blocking(move || Self::ask_blocking(question, page_size))
            .await
            .map_err(|e| PromptError::Failed(e.to_string()))?
            .map_err(map_error)
    }
}

fn map_error(error: InquireError) -> PromptError {
    match error {
        InquireError::OperationCanceled => PromptError::Cancelled,
        InquireError::OperationInterrupted => PromptError::Interrupted,
        other => PromptError::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_ctrl_c_map_to_navigation_errors() {
        assert_eq!(map_error(InquireError::OperationCanceled), PromptError::Cancelled);
        assert_eq!(
            map_error(InquireError::OperationInterrupted),
            PromptError::Interrupted
        );
    }

    #[test]
    fn terminal_failures_are_reported() {
        let err = map_error(InquireError::NotTTY);
        assert!(matches!(err, PromptError::Failed(_)));
    }
}
