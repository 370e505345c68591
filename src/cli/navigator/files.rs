//! File creation flow

use std::path::PathBuf;

use super::MenuNavigator;
use crate::application::ports::{PlatformOpener, ProcessExecutor, PromptError, PromptProvider};
use crate::domain::{Menu, Transition};

enum Destination {
    NewCategory,
    Existing(String),
}

enum AfterCreate {
    OpenFile,
    CreateAnother,
    Back,
}

impl<P, E, O> MenuNavigator<P, E, O>
where
    P: PromptProvider,
    E: ProcessExecutor,
    O: PlatformOpener,
{
    pub(super) async fn create_file(&self) -> Result<Transition, PromptError> {
        let file_name = self.input("File name", None).await?;
        if !self.accept_field("File name", &file_name) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        Ok(Transition::to(Menu::ChooseCategory { file_name }))
    }

    pub(super) async fn choose_category(
        &self,
        file_name: String,
    ) -> Result<Transition, PromptError> {
        let names = match self.category_names().await {
            Ok(names) => names,
            Err(e) => return Ok(self.failed("Could not list categories", e)),
        };

        let mut options = vec![("+ Create new category".to_string(), Destination::NewCategory)];
        options.extend(
            names
                .into_iter()
                .map(|name| (name.clone(), Destination::Existing(name))),
        );

        let message = format!("Category for {}", file_name);
        match self.choose(&message, options).await? {
            Destination::NewCategory => {
                self.new_category().await?;
                Ok(Transition::to(Menu::ChooseCategory { file_name }))
            }
            Destination::Existing(category) => {
                match self
                    .catalog
                    .categories
                    .create_file_in_category(&file_name, &category)
                    .await
                {
                    Ok(path) => {
                        self.presenter
                            .success(&format!("Created {}", path.display()));
                        Ok(Transition::to(Menu::PostCreateFile { path }))
                    }
                    Err(e) => Ok(self.failed("Could not create file", e)),
                }
            }
        }
    }

    pub(super) async fn post_create_file(&self, path: PathBuf) -> Result<Transition, PromptError> {
        let options = vec![
            ("Open file".to_string(), AfterCreate::OpenFile),
            ("Create another file".to_string(), AfterCreate::CreateAnother),
            ("Back".to_string(), AfterCreate::Back),
        ];

        match self.choose("What next?", options).await? {
            AfterCreate::OpenFile => {
                self.open_path(&path).await;
                self.watch_path(&path).await;
                Ok(Transition::Idle)
            }
            AfterCreate::CreateAnother => Ok(Transition::to(Menu::CreateFile)),
            AfterCreate::Back => Ok(Transition::to(Menu::Root)),
        }
    }
}
