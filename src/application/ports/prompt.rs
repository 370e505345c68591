//! Prompt provider port interface

use async_trait::async_trait;
use thiserror::Error;

/// Prompt errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Prompt cancelled")]
    Cancelled,

    #[error("Prompt interrupted")]
    Interrupted,

    #[error("Prompt returned an answer of the wrong kind")]
    UnexpectedAnswer,

    #[error("Prompt failed: {0}")]
    Failed(String),
}

/// A request for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// Pick exactly one of `choices`
    Select { message: String, choices: Vec<String> },
    /// Pick any subset of `choices`
    MultiSelect { message: String, choices: Vec<String> },
    /// Free text
    Input {
        message: String,
        default: Option<String>,
    },
    /// Yes or no
    Confirm { message: String, default: bool },
}

impl Question {
    pub fn message(&self) -> &str {
        match self {
            Self::Select { message, .. }
            | Self::MultiSelect { message, .. }
            | Self::Input { message, .. }
            | Self::Confirm { message, .. } => message,
        }
    }
}

/// The user's answer. List answers are indices into the question's choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Selected(usize),
    MultiSelected(Vec<usize>),
    Text(String),
    Confirmed(bool),
}

/// Port for interactive prompts
#[async_trait]
pub trait PromptProvider: Send + Sync {
    /// Present a question and wait for the answer.
    ///
    /// # Arguments
    /// * `question` - What to ask
    ///
    /// # Returns
    /// An answer whose kind matches the question, error otherwise
    async fn ask(&self, question: Question) -> Result<Answer, PromptError>;
}

/// Blanket implementation for boxed prompt providers
#[async_trait]
impl PromptProvider for Box<dyn PromptProvider> {
    async fn ask(&self, question: Question) -> Result<Answer, PromptError> {
        self.as_ref().ask(question).await
    }
}
