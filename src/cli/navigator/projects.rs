//! Project and command menus

use std::path::Path;
use std::time::SystemTime;

use super::MenuNavigator;
use crate::application::ports::{PlatformOpener, ProcessExecutor, PromptError, PromptProvider};
use crate::domain::record::{display_labels, sort_by_recency};
use crate::domain::{CommandRecord, Menu, ProjectRecord, Transition};

enum ProjectAction {
    Open,
    Add,
    Delete,
    Move,
    Back,
}

enum LaunchAction {
    Run,
    OpenFolders,
}

enum CommandAction {
    List,
    Add,
    Delete,
    Back,
}

impl<P, E, O> MenuNavigator<P, E, O>
where
    P: PromptProvider,
    E: ProcessExecutor,
    O: PlatformOpener,
{
    pub(super) async fn projects_menu(&self) -> Result<Transition, PromptError> {
        let options = vec![
            ("Open project".to_string(), ProjectAction::Open),
            ("Add project".to_string(), ProjectAction::Add),
            ("Delete project".to_string(), ProjectAction::Delete),
            ("Move project".to_string(), ProjectAction::Move),
            ("Back".to_string(), ProjectAction::Back),
        ];

        match self.choose("Projects", options).await? {
            ProjectAction::Open => self.open_one_project().await,
            ProjectAction::Add => self.add_project().await,
            ProjectAction::Delete => self.delete_project().await,
            ProjectAction::Move => self.move_project().await,
            ProjectAction::Back => Ok(Transition::to(Menu::Root)),
        }
    }

    /// Pick one stored project, or `None` when there are none
    async fn pick_project(&self, message: &str) -> Result<Option<ProjectRecord>, PromptError> {
        let records = match self.catalog.projects.records().await {
            Ok(records) => records,
            Err(e) => {
                self.presenter.error(&format!("Could not read projects: {}", e));
                return Ok(None);
            }
        };
        if records.is_empty() {
            self.presenter.info("No projects yet");
            return Ok(None);
        }

        let options = records
            .into_iter()
            .map(|record| (format!("{} ({})", record.name, record.path), record))
            .collect();
        self.choose(message, options).await.map(Some)
    }

    async fn open_one_project(&self) -> Result<Transition, PromptError> {
        if let Some(record) = self.pick_project("Project to open").await? {
            self.launch(&record).await;
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    /// Run a project's command in its directory
    async fn launch(&self, record: &ProjectRecord) {
        self.presenter
            .info(&format!("Running `{}` in {}", record.command, record.path));
        if let Err(e) = self
            .executor
            .spawn(&record.command, Path::new(&record.path))
            .await
        {
            self.presenter
                .error(&format!("Could not open {}: {}", record.name, e));
        }
    }

    async fn add_project(&self) -> Result<Transition, PromptError> {
        let path = self.input("Project path", Some(".")).await?;
        if !self.accept_field("Path", &path) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        let commands = match self.catalog.commands.list().await {
            Ok(commands) => commands,
            Err(e) => return Ok(self.failed("Could not read commands", e)),
        };
        let mut options: Vec<(String, Option<CommandRecord>)> = commands
            .into_iter()
            .map(|c| (format!("{} ({})", c.name, c.command), Some(c)))
            .collect();
        options.push(("Custom command".to_string(), None));

        let preset = self.choose("Command to run", options).await?;
        let command = match &preset {
            Some(preset) => preset.command.clone(),
            None => self.input("Command", None).await?,
        };
        if !self.accept_field("Command", &command) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        let name = self.input("Project name", None).await?;
        if !self.accept_field("Name", &name) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        let name = match &preset {
            Some(preset) => preset.decorate(&name),
            None => name,
        };

        if !self.confirm(&format!("Add project {}?", name), false).await? {
            self.presenter.info("Project not added");
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        match self.catalog.projects.add(&path, &command, &name).await {
            Ok(record) => self
                .presenter
                .success(&format!("Added {} ({})", record.name, record.path)),
            Err(e) => return Ok(self.failed("Could not add project", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    async fn delete_project(&self) -> Result<Transition, PromptError> {
        let Some(record) = self.pick_project("Project to delete").await? else {
            return Ok(Transition::to(Menu::ReturnConfirm));
        };
        if !self.confirm(&format!("Delete {}?", record.name), false).await? {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        match self.catalog.projects.remove(&record).await {
            Ok(true) => self.presenter.success(&format!("Deleted {}", record.name)),
            Ok(false) => self
                .presenter
                .warn(&format!("{} is no longer in the list", record.name)),
            Err(e) => return Ok(self.failed("Could not delete project", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    async fn move_project(&self) -> Result<Transition, PromptError> {
        let records = match self.catalog.projects.records().await {
            Ok(records) => records,
            Err(e) => return Ok(self.failed("Could not read projects", e)),
        };
        let len = records.len();
        let Some(record) = self.pick_project("Project to move").await? else {
            return Ok(Transition::to(Menu::ReturnConfirm));
        };
        let current = records.iter().position(|r| *r == record).unwrap_or(0);

        let Some(index) = self.position("New position", current, len).await? else {
            return Ok(Transition::to(Menu::ReturnConfirm));
        };
        match self.catalog.projects.move_to(&record, index).await {
            Ok(true) => self
                .presenter
                .success(&format!("Moved {} to position {}", record.name, index + 1)),
            Ok(false) => self
                .presenter
                .warn(&format!("{} is no longer in the list", record.name)),
            Err(e) => return Ok(self.failed("Could not move project", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    pub(super) async fn open_project_menu(&self) -> Result<Transition, PromptError> {
        let mut entries = match self.catalog.projects.list().await {
            Ok(entries) => entries,
            Err(e) => return Ok(self.failed("Could not read projects", e)),
        };
        if entries.is_empty() {
            self.presenter.info("No projects yet. Add one under Manage Projects.");
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        for entry in &entries {
            if let Err(e) = &entry.modified {
                self.presenter.warn(&e.to_string());
            }
        }

        sort_by_recency(&mut entries);
        let labels = display_labels(&entries, SystemTime::now());
        let picked = self.multi_select("Projects to open", labels).await?;
        if picked.is_empty() {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        let options = vec![
            ("Run selected".to_string(), LaunchAction::Run),
            ("Open folders".to_string(), LaunchAction::OpenFolders),
        ];
        let action = self.choose("What to do with them?", options).await?;

        for record in picked.into_iter().map(|i| &entries[i].record) {
            match action {
                LaunchAction::Run => self.launch(record).await,
                LaunchAction::OpenFolders => {
                    let path = Path::new(&record.path);
                    let folder = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                    self.open_path(&folder).await;
                }
            }
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    pub(super) async fn commands_menu(&self) -> Result<Transition, PromptError> {
        let options = vec![
            ("List commands".to_string(), CommandAction::List),
            ("Add command".to_string(), CommandAction::Add),
            ("Delete command".to_string(), CommandAction::Delete),
            ("Back".to_string(), CommandAction::Back),
        ];

        match self.choose("Commands", options).await? {
            CommandAction::List => self.list_commands().await,
            CommandAction::Add => self.add_command().await,
            CommandAction::Delete => self.delete_command().await,
            CommandAction::Back => Ok(Transition::to(Menu::Root)),
        }
    }

    async fn list_commands(&self) -> Result<Transition, PromptError> {
        let commands = match self.catalog.commands.list().await {
            Ok(commands) => commands,
            Err(e) => return Ok(self.failed("Could not read commands", e)),
        };
        if commands.is_empty() {
            self.presenter.info("No commands yet");
        }
        for (i, command) in commands.iter().enumerate() {
            let line = if command.identifier.is_empty() {
                format!("{}: {}", command.name, command.command)
            } else {
                format!("{}: {} [{}]", command.name, command.command, command.identifier)
            };
            self.presenter.list_item(i + 1, &line);
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    async fn add_command(&self) -> Result<Transition, PromptError> {
        let name = self.input("Command name", None).await?;
        if !self.accept_field("Name", &name) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        let command = self.input("Command line", None).await?;
        if !self.accept_field("Command", &command) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        let identifier = self
            .input("Identifier shown after project names (optional)", Some(""))
            .await?;
        if identifier.contains('"') {
            self.presenter.warn("Identifier cannot contain double quotes");
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        match self.catalog.commands.add(&name, &command, &identifier).await {
            Ok(record) => self.presenter.success(&format!("Added command {}", record.name)),
            Err(e) => return Ok(self.failed("Could not add command", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    async fn delete_command(&self) -> Result<Transition, PromptError> {
        let commands = match self.catalog.commands.list().await {
            Ok(commands) => commands,
            Err(e) => return Ok(self.failed("Could not read commands", e)),
        };
        if commands.is_empty() {
            self.presenter.info("No commands yet");
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        let options = commands
            .into_iter()
            .map(|c| (format!("{} ({})", c.name, c.command), c))
            .collect();
        let target = self.choose("Command to delete", options).await?;
        match self.catalog.commands.remove(&target).await {
            Ok(_) => self.presenter.success(&format!("Deleted command {}", target.name)),
            Err(e) => return Ok(self.failed("Could not delete command", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }
}
