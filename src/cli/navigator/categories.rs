//! Category menus

use std::path::{Path, PathBuf};

use super::MenuNavigator;
use crate::application::ports::{PlatformOpener, ProcessExecutor, PromptError, PromptProvider};
use crate::domain::{CategoryItemRecord, Menu, Transition};

enum CategoryAction {
    ListManage,
    AddCategory,
    AddItem,
    Back,
}

enum ItemChoice {
    Item(CategoryItemRecord),
    Add,
    Back,
}

enum ItemAction {
    Execute,
    OpenFolder,
    Move,
    Delete,
    Back,
}

impl<P, E, O> MenuNavigator<P, E, O>
where
    P: PromptProvider,
    E: ProcessExecutor,
    O: PlatformOpener,
{
    pub(super) async fn categories_menu(&self) -> Result<Transition, PromptError> {
        let options = vec![
            ("List & manage categories".to_string(), CategoryAction::ListManage),
            ("Add new category".to_string(), CategoryAction::AddCategory),
            ("Add item to a category".to_string(), CategoryAction::AddItem),
            ("Back".to_string(), CategoryAction::Back),
        ];

        match self.choose("Categories", options).await? {
            CategoryAction::ListManage => Ok(Transition::to(Menu::CategoryList)),
            CategoryAction::AddCategory => {
                self.new_category().await?;
                Ok(Transition::to(Menu::ReturnConfirm))
            }
            CategoryAction::AddItem => {
                let names = match self.category_names().await {
                    Ok(names) => names,
                    Err(e) => return Ok(self.failed("Could not list categories", e)),
                };
                if names.is_empty() {
                    self.presenter.info("No categories yet");
                    return Ok(Transition::to(Menu::ReturnConfirm));
                }
                let options = names.into_iter().map(|n| (n.clone(), n)).collect();
                let category = self.choose("Category", options).await?;
                self.add_item(&category).await
            }
            CategoryAction::Back => Ok(Transition::to(Menu::Root)),
        }
    }

    /// Ask for a name and create the category. Returns the name on success.
    pub(super) async fn new_category(&self) -> Result<Option<String>, PromptError> {
        let name = self.input("Category name", None).await?;
        match self.catalog.categories.create_category(&name).await {
            Ok(true) => {
                self.presenter
                    .success(&format!("Category {} created", name));
                Ok(Some(name))
            }
            Ok(false) => {
                self.presenter
                    .info(&format!("Category {} already exists", name));
                Ok(Some(name))
            }
            Err(e) => {
                self.presenter
                    .error(&format!("Could not create category: {}", e));
                Ok(None)
            }
        }
    }

    async fn add_item(&self, category: &str) -> Result<Transition, PromptError> {
        let path = self.input("Item path", None).await?;
        if !self.accept_field("Path", &path) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }
        let default_name = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = self.input("Item name", Some(&default_name)).await?;
        if !self.accept_field("Name", &name) {
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        match self.catalog.categories.add_item(category, &path, &name).await {
            Ok(item) => self
                .presenter
                .success(&format!("Added {} to {}", item.name, category)),
            Err(e) => return Ok(self.failed("Could not add item", e)),
        }
        Ok(Transition::to(Menu::ReturnConfirm))
    }

    pub(super) async fn category_list(&self) -> Result<Transition, PromptError> {
        let names = match self.category_names().await {
            Ok(names) => names,
            Err(e) => return Ok(self.failed("Could not list categories", e)),
        };

        let mut options: Vec<(String, Option<String>)> =
            names.into_iter().map(|n| (n.clone(), Some(n))).collect();
        options.push(("Back".to_string(), None));

        Ok(match self.choose("Select a category", options).await? {
            Some(category) => Transition::to(Menu::CategoryItems { category }),
            None => Transition::to(Menu::Categories),
        })
    }

    pub(super) async fn category_items(&self, category: String) -> Result<Transition, PromptError> {
        let items = match self.catalog.categories.items(&category).await {
            Ok(items) => items,
            Err(e) => return Ok(self.failed("Could not read category", e)),
        };
        if items.is_empty() {
            self.presenter
                .info(&format!("Category {} has no items", category));
            return Ok(Transition::to(Menu::ReturnConfirm));
        }

        let mut options: Vec<(String, ItemChoice)> = items
            .into_iter()
            .map(|item| (item.name.clone(), ItemChoice::Item(item)))
            .collect();
        options.push(("Add item".to_string(), ItemChoice::Add));
        options.push(("Back".to_string(), ItemChoice::Back));

        match self.choose(&category, options).await? {
            ItemChoice::Item(item) => Ok(Transition::to(Menu::ItemActions { item, category })),
            ItemChoice::Add => self.add_item(&category).await,
            ItemChoice::Back => Ok(Transition::to(Menu::Root)),
        }
    }

    pub(super) async fn item_actions(
        &self,
        item: CategoryItemRecord,
        category: String,
    ) -> Result<Transition, PromptError> {
        let options = vec![
            ("Execute".to_string(), ItemAction::Execute),
            ("Open folder".to_string(), ItemAction::OpenFolder),
            ("Move".to_string(), ItemAction::Move),
            ("Delete".to_string(), ItemAction::Delete),
            ("Back".to_string(), ItemAction::Back),
        ];
        let action = self.choose(&item.name, options).await?;

        let back = Transition::to(Menu::CategoryItems {
            category: category.clone(),
        });
        match action {
            ItemAction::Execute => {
                let path = Path::new(&item.path);
                self.open_path(path).await;
                self.watch_path(path).await;
                Ok(back)
            }
            ItemAction::OpenFolder => {
                self.open_path(&parent_folder(&item.path)).await;
                Ok(back)
            }
            ItemAction::Move => self.move_item(&item, category).await,
            ItemAction::Delete => self.delete_item(&item, category).await,
            ItemAction::Back => Ok(back),
        }
    }

    async fn move_item(
        &self,
        item: &CategoryItemRecord,
        category: String,
    ) -> Result<Transition, PromptError> {
        let items = match self.catalog.categories.items(&category).await {
            Ok(items) => items,
            Err(e) => return Ok(self.failed("Could not read category", e)),
        };
        let current = items.iter().position(|i| i == item).unwrap_or(0);

        let Some(index) = self.position("New position", current, items.len()).await? else {
            return Ok(Transition::to(Menu::CategoryItems { category }));
        };
        match self.catalog.categories.move_item(&category, &item.name, index).await {
            Ok(true) => self
                .presenter
                .success(&format!("Moved {} to position {}", item.name, index + 1)),
            Ok(false) => self
                .presenter
                .warn(&format!("{} is no longer in {}", item.name, category)),
            Err(e) => return Ok(self.failed("Could not move item", e)),
        }
        Ok(Transition::to(Menu::CategoryItems { category }))
    }

    async fn delete_item(
        &self,
        item: &CategoryItemRecord,
        category: String,
    ) -> Result<Transition, PromptError> {
        if !self
            .confirm(&format!("Remove {} from {}?", item.name, category), false)
            .await?
        {
            return Ok(Transition::to(Menu::CategoryItems { category }));
        }
        match self.catalog.categories.remove_item(&category, &item.name).await {
            Ok(0) => self
                .presenter
                .warn(&format!("{} is no longer in {}", item.name, category)),
            Ok(1) => self
                .presenter
                .success(&format!("Removed {} from {}", item.name, category)),
            Ok(n) => self
                .presenter
                .success(&format!("Removed {} entries named {}", n, item.name)),
            Err(e) => return Ok(self.failed("Could not remove item", e)),
        }
        Ok(Transition::to(Menu::CategoryItems { category }))
    }
}

/// Absolute directory containing `path`
fn parent_folder(path: &str) -> PathBuf {
    let path = Path::new(path);
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match absolute.parent() {
        Some(parent) => parent.to_path_buf(),
        None => absolute,
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    async fn seed_items(fixture: &Fixture, category: &str, names: &[&str]) {
        let catalog = fixture.catalog();
        catalog.categories.create_category(category).await.unwrap();
        for name in names {
            catalog
                .categories
                .add_item(category, &format!("/notes/{}", name), name)
                .await
                .unwrap();
        }
    }

    fn item(name: &str) -> CategoryItemRecord {
        CategoryItemRecord::new(format!("/notes/{}", name), name)
    }

    fn items_menu(category: &str) -> Menu {
        Menu::CategoryItems {
            category: category.to_string(),
        }
    }

    fn actions_menu(name: &str) -> Menu {
        Menu::ItemActions {
            item: item(name),
            category: "work".to_string(),
        }
    }

    #[test]
    fn parent_folder_of_absolute_path() {
        assert_eq!(parent_folder("/notes/todo.md"), PathBuf::from("/notes"));
        assert_eq!(parent_folder("/"), PathBuf::from("/"));
    }

    #[tokio::test]
    async fn add_new_category() {
        let nav = Fixture::new(vec![sel(1), text("work")]).navigator();

        assert_eq!(nav.step(Menu::Categories).await, Transition::to(Menu::ReturnConfirm));
        assert!(nav.catalog().categories.exists("work"));
    }

    #[tokio::test]
    async fn invalid_category_name_is_reported() {
        let nav = Fixture::new(vec![sel(1), text("a/b")]).navigator();

        assert_eq!(nav.step(Menu::Categories).await, Transition::to(Menu::ReturnConfirm));
        assert!(nav.catalog().categories.names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_then_back() {
        let nav = Fixture::new(vec![sel(0), sel(0)]).navigator();

        assert_eq!(nav.step(Menu::Categories).await, Transition::to(Menu::CategoryList));
        // no categories, so "Back" is the only choice
        assert_eq!(nav.step(Menu::CategoryList).await, Transition::to(Menu::Categories));
    }

    #[tokio::test]
    async fn list_selects_category() {
        let fixture = Fixture::new(vec![sel(1)]);
        fixture.catalog_categories(&["home", "work"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(Menu::CategoryList).await, Transition::to(items_menu("work")));
    }

    #[tokio::test]
    async fn empty_category_skips_to_return_confirm() {
        let fixture = Fixture::new(vec![]);
        fixture.catalog_categories(&["work"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(items_menu("work")).await, Transition::to(Menu::ReturnConfirm));
        assert_eq!(nav.prompt.asked(), 0);
    }

    #[tokio::test]
    async fn selecting_item_opens_actions() {
        let fixture = Fixture::new(vec![sel(1)]);
        seed_items(&fixture, "work", &["a.md", "b.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(items_menu("work")).await, Transition::to(actions_menu("b.md")));
        assert_eq!(nav.prompt.choices(0), vec!["a.md", "b.md", "Add item", "Back"]);
    }

    #[tokio::test]
    async fn item_menu_back_goes_home() {
        let fixture = Fixture::new(vec![sel(2)]);
        seed_items(&fixture, "work", &["a.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(items_menu("work")).await, Transition::to(Menu::Root));
    }

    #[tokio::test]
    async fn add_item_from_item_menu() {
        let fixture = Fixture::new(vec![sel(1), text("/docs/plan.md"), text("")]);
        seed_items(&fixture, "work", &["a.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(items_menu("work")).await, Transition::to(Menu::ReturnConfirm));
        // empty name is rejected
        assert_eq!(nav.catalog().categories.items("work").await.unwrap().len(), 1);
        assert_eq!(
            nav.prompt.question(2),
            crate::application::ports::Question::Input {
                message: "Item name".to_string(),
                default: Some("plan.md".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn add_item_from_categories_menu() {
        let fixture = Fixture::new(vec![sel(2), sel(0), text("/docs/plan.md"), text("Plan")]);
        fixture.catalog_categories(&["work"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(Menu::Categories).await, Transition::to(Menu::ReturnConfirm));
        assert_eq!(
            nav.catalog().categories.items("work").await.unwrap(),
            vec![CategoryItemRecord::new("/docs/plan.md", "Plan")]
        );
    }

    #[tokio::test]
    async fn execute_opens_and_watches() {
        let fixture = Fixture::new(vec![sel(0)]);
        let file = fixture.base_dir().join("todo.md");
        std::fs::write(&file, "x").unwrap();
        let item = CategoryItemRecord::new(file.to_string_lossy(), "todo.md");
        let nav = fixture.navigator();

        let next = nav
            .step(Menu::ItemActions {
                item,
                category: "work".to_string(),
            })
            .await;

        assert_eq!(next, Transition::to(items_menu("work")));
        assert_eq!(nav.opener.opened(), vec![file.clone()]);
        assert!(nav.watcher.is_watching(&file).await);
    }

    #[tokio::test]
    async fn execute_watches_even_when_open_fails() {
        let fixture = Fixture::new(vec![sel(0)]).with_failing_opener();
        let file = fixture.base_dir().join("todo.md");
        std::fs::write(&file, "x").unwrap();
        let item = CategoryItemRecord::new(file.to_string_lossy(), "todo.md");
        let nav = fixture.navigator();

        nav.step(Menu::ItemActions {
            item,
            category: "work".to_string(),
        })
        .await;
        assert_eq!(nav.watcher.active_count().await, 1);
    }

    #[tokio::test]
    async fn open_folder_opens_parent() {
        let nav = Fixture::new(vec![sel(1)]).navigator();

        assert_eq!(nav.step(actions_menu("a.md")).await, Transition::to(items_menu("work")));
        assert_eq!(nav.opener.opened(), vec![PathBuf::from("/notes")]);
        assert_eq!(nav.watcher.active_count().await, 0);
    }

    #[tokio::test]
    async fn move_item_within_category() {
        let fixture = Fixture::new(vec![sel(2), text("1")]);
        seed_items(&fixture, "work", &["a.md", "b.md", "c.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(actions_menu("c.md")).await, Transition::to(items_menu("work")));
        let names: Vec<_> = nav
            .catalog()
            .categories
            .items("work")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["c.md", "a.md", "b.md"]);
    }

    #[tokio::test]
    async fn delete_item_after_confirm() {
        let fixture = Fixture::new(vec![sel(3), yes()]);
        seed_items(&fixture, "work", &["a.md", "b.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(actions_menu("a.md")).await, Transition::to(items_menu("work")));
        assert_eq!(
            nav.catalog().categories.items("work").await.unwrap(),
            vec![item("b.md")]
        );
    }

    /// Replace the category file with a directory so reads and writes fail
    fn break_category_file(fixture: &Fixture, category: &str) {
        let file = fixture
            .base_dir()
            .join(format!("{}{}", category, crate::infrastructure::storage::CATEGORY_FILE_SUFFIX));
        let _ = std::fs::remove_file(&file);
        std::fs::create_dir(&file).unwrap();
    }

    #[tokio::test]
    async fn failed_move_goes_to_return_confirm() {
        let fixture = Fixture::new(vec![sel(2), text("1")]);
        break_category_file(&fixture, "work");
        let nav = fixture.navigator();

        assert_eq!(nav.step(actions_menu("b.md")).await, Transition::to(Menu::ReturnConfirm));
    }

    #[tokio::test]
    async fn failed_delete_goes_to_return_confirm() {
        let fixture = Fixture::new(vec![sel(3), yes()]);
        break_category_file(&fixture, "work");
        let nav = fixture.navigator();

        assert_eq!(nav.step(actions_menu("a.md")).await, Transition::to(Menu::ReturnConfirm));
    }

    #[tokio::test]
    async fn declined_delete_keeps_item() {
        let fixture = Fixture::new(vec![sel(3), no()]);
        seed_items(&fixture, "work", &["a.md"]).await;
        let nav = fixture.navigator();

        assert_eq!(nav.step(actions_menu("a.md")).await, Transition::to(items_menu("work")));
        assert_eq!(nav.catalog().categories.items("work").await.unwrap(), vec![item("a.md")]);
    }

    #[tokio::test]
    async fn item_back_returns_to_items() {
        let nav = Fixture::new(vec![sel(4)]).navigator();
        assert_eq!(nav.step(actions_menu("a.md")).await, Transition::to(items_menu("work")));
        assert!(nav.opener.opened().is_empty());
    }
}
