//! Scripted doubles for navigator tests

use std::collections::VecDeque;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use super::MenuNavigator;
use crate::application::ports::{
    Answer, PlatformOpener, ProcessError, ProcessExecutor, PromptError, PromptProvider, Question,
};
use crate::infrastructure::storage::Catalog;
use crate::infrastructure::watch::{ChangeEvent, ChangeWatcher};

/// Index of "Exit" on the main menu when no categories exist
pub const ROOT_EXIT: usize = 5;

pub fn sel(index: usize) -> Result<Answer, PromptError> {
    Ok(Answer::Selected(index))
}

pub fn multi(indices: &[usize]) -> Result<Answer, PromptError> {
    Ok(Answer::MultiSelected(indices.to_vec()))
}

pub fn text(value: &str) -> Result<Answer, PromptError> {
    Ok(Answer::Text(value.to_string()))
}

pub fn yes() -> Result<Answer, PromptError> {
    Ok(Answer::Confirmed(true))
}

pub fn no() -> Result<Answer, PromptError> {
    Ok(Answer::Confirmed(false))
}

/// Prompt that replays a fixed script and records every question.
///
/// Running out of answers reads as Ctrl+C.
pub struct ScriptedPrompt {
    script: Mutex<VecDeque<Result<Answer, PromptError>>>,
    questions: Mutex<Vec<Question>>,
}

impl ScriptedPrompt {
    pub fn new(script: Vec<Result<Answer, PromptError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub fn question(&self, index: usize) -> Question {
        self.questions.lock().unwrap()[index].clone()
    }

    /// Choices of the `index`-th question
    pub fn choices(&self, index: usize) -> Vec<String> {
        match self.question(index) {
            Question::Select { choices, .. } | Question::MultiSelect { choices, .. } => choices,
            other => panic!("question {} has no choices: {:?}", index, other),
        }
    }
}

#[async_trait]
impl PromptProvider for ScriptedPrompt {
    async fn ask(&self, question: Question) -> Result<Answer, PromptError> {
        self.questions.lock().unwrap().push(question);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PromptError::Interrupted))
    }
}

#[derive(Default)]
pub struct RecordingExecutor {
    spawned: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingExecutor {
    pub fn spawned(&self) -> Vec<(String, PathBuf)> {
        self.spawned.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessExecutor for RecordingExecutor {
    async fn spawn(&self, command: &str, cwd: &Path) -> Result<(), ProcessError> {
        self.spawned
            .lock()
            .unwrap()
            .push((command.to_string(), cwd.to_path_buf()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformOpener for RecordingOpener {
    async fn open(&self, path: &Path) -> Result<(), ProcessError> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            return Err(ProcessError::OpenFailed {
                path: path.display().to_string(),
                message: "no handler".to_string(),
            });
        }
        Ok(())
    }
}

pub type ScriptedNavigator = MenuNavigator<ScriptedPrompt, RecordingExecutor, RecordingOpener>;

/// Temp base directory plus the script for one navigator
pub struct Fixture {
    dir: TempDir,
    script: Vec<Result<Answer, PromptError>>,
    opener: RecordingOpener,
}

impl Fixture {
    pub fn new(script: Vec<Result<Answer, PromptError>>) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            script,
            opener: RecordingOpener::default(),
        }
    }

    pub fn with_failing_opener(mut self) -> Self {
        self.opener = RecordingOpener::failing();
        self
    }

    pub fn base_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::open(self.dir.path()).unwrap()
    }

    pub async fn catalog_categories(&self, names: &[&str]) {
        let catalog = self.catalog();
        for name in names {
            catalog.categories.create_category(name).await.unwrap();
        }
    }

    pub fn navigator(self) -> TestNavigator {
        self.navigator_at(None)
    }

    /// Navigator whose catalog lives at `base_dir` instead of the temp dir
    pub fn navigator_at(self, base_dir: Option<PathBuf>) -> TestNavigator {
        let base_dir = base_dir.unwrap_or_else(|| self.dir.path().to_path_buf());
        let navigator = MenuNavigator::new(
            ScriptedPrompt::new(self.script),
            RecordingExecutor::default(),
            self.opener,
            Catalog::open(base_dir).unwrap(),
            Arc::new(ChangeWatcher::new(Duration::from_millis(100))),
            Arc::new(|_: ChangeEvent| {}),
        );
        TestNavigator {
            navigator,
            _dir: self.dir,
        }
    }
}

/// Navigator that keeps its temp directory alive
pub struct TestNavigator {
    navigator: ScriptedNavigator,
    _dir: TempDir,
}

impl Deref for TestNavigator {
    type Target = ScriptedNavigator;

    fn deref(&self) -> &Self::Target {
        &self.navigator
    }
}
