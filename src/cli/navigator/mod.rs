//! Interactive menu navigator
//!
//! Drives the `Menu` state machine: each handler shows one menu, performs
//! the chosen action against the catalog, and returns the next transition.
//! Registries are re-read on every visit, nothing is cached between menus.

mod categories;
mod files;
mod projects;

#[cfg(test)]
mod testing;

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::presenter::Presenter;
use crate::application::ports::{
    Answer, PlatformOpener, ProcessExecutor, PromptError, PromptProvider, Question,
};
use crate::domain::{Menu, SessionEnd, Transition};
use crate::infrastructure::storage::{Catalog, StoreError};
use crate::infrastructure::watch::{ChangeCallback, ChangeWatcher, WatchRegistration};

/// Label prefix of the category shortcuts on the main menu
pub const CATEGORY_MARKER: &str = "▸ ";

/// Menu state machine over the prompt, process and opener ports
pub struct MenuNavigator<P, E, O>
where
    P: PromptProvider,
    E: ProcessExecutor,
    O: PlatformOpener,
{
    prompt: P,
    executor: E,
    opener: O,
    catalog: Catalog,
    watcher: Arc<ChangeWatcher>,
    on_change: ChangeCallback,
    presenter: Presenter,
}

enum RootChoice {
    OpenProject,
    CreateFile,
    Category(String),
    Projects,
    Categories,
    Commands,
    Exit,
}

impl<P, E, O> MenuNavigator<P, E, O>
where
    P: PromptProvider,
    E: ProcessExecutor,
    O: PlatformOpener,
{
    pub fn new(
        prompt: P,
        executor: E,
        opener: O,
        catalog: Catalog,
        watcher: Arc<ChangeWatcher>,
        on_change: ChangeCallback,
    ) -> Self {
        Self {
            prompt,
            executor,
            opener,
            catalog,
            watcher,
            on_change,
            presenter: Presenter::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run menus from the root until the session goes idle or exits.
    pub async fn run(&self) -> SessionEnd {
        let mut menu = Menu::Root;
        loop {
            match self.step(menu).await {
                Transition::Next(next) => menu = next,
                Transition::Idle => return SessionEnd::Idle,
                Transition::Exit => return SessionEnd::Exit,
            }
        }
    }

    /// Show one menu and handle the answer.
    pub async fn step(&self, menu: Menu) -> Transition {
        debug!(%menu, "showing menu");
        let at_root = menu.is_root();

        let result = match menu {
            Menu::Root => self.root().await,
            Menu::Projects => self.projects_menu().await,
            Menu::OpenProject => self.open_project_menu().await,
            Menu::Commands => self.commands_menu().await,
            Menu::Categories => self.categories_menu().await,
            Menu::CategoryList => self.category_list().await,
            Menu::CategoryItems { category } => self.category_items(category).await,
            Menu::ItemActions { item, category } => self.item_actions(item, category).await,
            Menu::CreateFile => self.create_file().await,
            Menu::ChooseCategory { file_name } => self.choose_category(file_name).await,
            Menu::PostCreateFile { path } => self.post_create_file(path).await,
            Menu::ReturnConfirm => self.return_confirm().await,
        };

        match result {
            Ok(transition) => transition,
            Err(PromptError::Cancelled) if at_root => Transition::Exit,
            Err(PromptError::Cancelled) => Transition::to(Menu::Root),
            Err(PromptError::Interrupted) => Transition::Exit,
            Err(e) => {
                self.presenter.error(&e.to_string());
                Transition::Exit
            }
        }
    }

    async fn root(&self) -> Result<Transition, PromptError> {
        let categories = match self.category_names().await {
            Ok(names) => names,
            Err(e) => {
                self.presenter.error(&format!("Could not list categories: {}", e));
                Vec::new()
            }
        };

        let mut options = vec![
            ("Open a project".to_string(), RootChoice::OpenProject),
            ("Create file".to_string(), RootChoice::CreateFile),
        ];
        options.extend(
            categories
                .into_iter()
                .map(|name| (format!("{}{}", CATEGORY_MARKER, name), RootChoice::Category(name))),
        );
        options.extend([
            ("Manage Projects".to_string(), RootChoice::Projects),
            ("Manage Categories".to_string(), RootChoice::Categories),
            ("Manage Commands".to_string(), RootChoice::Commands),
            ("Exit".to_string(), RootChoice::Exit),
        ]);

        let next = match self.choose("What do you want to do?", options).await? {
            RootChoice::OpenProject => Menu::OpenProject,
            RootChoice::CreateFile => Menu::CreateFile,
            RootChoice::Category(category) => Menu::CategoryItems { category },
            RootChoice::Projects => Menu::Projects,
            RootChoice::Categories => Menu::Categories,
            RootChoice::Commands => Menu::Commands,
            RootChoice::Exit => {
                self.presenter.info("Bye");
                return Ok(Transition::Exit);
            }
        };
        Ok(Transition::to(next))
    }

    async fn return_confirm(&self) -> Result<Transition, PromptError> {
        if self.confirm("Return to main menu?", true).await? {
            Ok(Transition::to(Menu::Root))
        } else {
            Ok(Transition::Idle)
        }
    }

    /// Report a failed action and fall back to the return prompt
    /// Category names from a fresh rebuild of the category index
    async fn category_names(&self) -> Result<Vec<String>, StoreError> {
        let index = self.catalog.categories.discover().await?;
        Ok(index.into_keys().collect())
    }

    fn failed(&self, action: &str, error: impl Display) -> Transition {
        self.presenter.error(&format!("{}: {}", action, error));
        Transition::to(Menu::ReturnConfirm)
    }

    /// Open `path` with the platform handler, reporting failures only
    async fn open_path(&self, path: &Path) {
        if let Err(e) = self.opener.open(path).await {
            self.presenter.error(&e.to_string());
        }
    }

    /// Watch `path` and auto-commit its changes
    async fn watch_path(&self, path: &Path) {
        match self.watcher.watch(path, Arc::clone(&self.on_change)).await {
            Ok(WatchRegistration::Added) => self
                .presenter
                .info(&format!("Watching {} for changes", path.display())),
            Ok(WatchRegistration::Replaced) => self
                .presenter
                .info(&format!("Restarted watch on {}", path.display())),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    /// Ask for a 1-based position and return it 0-based
    async fn position(
        &self,
        message: &str,
        current: usize,
        len: usize,
    ) -> Result<Option<usize>, PromptError> {
        let answer = self
            .input(
                &format!("{} (1-{})", message, len),
                Some(&(current + 1).to_string()),
            )
            .await?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(Some(n - 1)),
            _ => {
                self.presenter.warn(&format!("Invalid position: {}", answer));
                Ok(None)
            }
        }
    }

    /// Check a value before it goes into a record.
    ///
    /// Quotes would break the line format, so they are rejected up front.
    fn accept_field(&self, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.presenter.warn(&format!("{} cannot be empty", label));
            return false;
        }
        if value.contains('"') {
            self.presenter
                .warn(&format!("{} cannot contain double quotes", label));
            return false;
        }
        true
    }

    /// Single choice among labelled options
    async fn choose<T>(&self, message: &str, options: Vec<(String, T)>) -> Result<T, PromptError> {
        let choices = options.iter().map(|(label, _)| label.clone()).collect();
        let index = self.select(message, choices).await?;
        options
            .into_iter()
            .nth(index)
            .map(|(_, value)| value)
            .ok_or(PromptError::UnexpectedAnswer)
    }

    async fn select(&self, message: &str, choices: Vec<String>) -> Result<usize, PromptError> {
        let len = choices.len();
        let question = Question::Select {
            message: message.to_string(),
            choices,
        };
        match self.prompt.ask(question).await? {
            Answer::Selected(index) if index < len => Ok(index),
            _ => Err(PromptError::UnexpectedAnswer),
        }
    }

    async fn multi_select(
        &self,
        message: &str,
        choices: Vec<String>,
    ) -> Result<Vec<usize>, PromptError> {
        let len = choices.len();
        let question = Question::MultiSelect {
            message: message.to_string(),
            choices,
        };
        match self.prompt.ask(question).await? {
            Answer::MultiSelected(indices) if indices.iter().all(|&i| i < len) => Ok(indices),
            _ => Err(PromptError::UnexpectedAnswer),
        }
    }

    async fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let question = Question::Input {
            message: message.to_string(),
            default: default.map(str::to_string),
        };
        match self.prompt.ask(question).await? {
            Answer::Text(text) => Ok(text.trim().to_string()),
            _ => Err(PromptError::UnexpectedAnswer),
        }
    }

    async fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let question = Question::Confirm {
            message: message.to_string(),
            default,
        };
        match self.prompt.ask(question).await? {
            Answer::Confirmed(yes) => Ok(yes),
            _ => Err(PromptError::UnexpectedAnswer),
        }
    }
}
