//! Menu states and transitions
//!
//! Navigation is an explicit state machine: each menu handler returns the
//! next `Transition` instead of calling the next handler itself.
//!
//! ```text
//!   Root -> OpenProject | CreateFile | CategoryItems(c) | Projects | Categories | Commands | exit
//!   Categories -> CategoryList -> CategoryItems(c) -> ItemActions(i, c) -> CategoryItems(c)
//!   CreateFile -> ChooseCategory(f) -> PostCreateFile(p) -> CreateFile | Root
//!   leaf actions -> ReturnConfirm -> Root | idle
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::domain::record::CategoryItemRecord;

/// A menu the navigator can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Menu {
    #[default]
    Root,
    Projects,
    Categories,
    CategoryList,
    CategoryItems {
        category: String,
    },
    ItemActions {
        item: CategoryItemRecord,
        category: String,
    },
    Commands,
    CreateFile,
    /// Pick the category a new file goes into
    ChooseCategory {
        file_name: String,
    },
    OpenProject,
    PostCreateFile {
        path: PathBuf,
    },
    ReturnConfirm,
}

impl Menu {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Projects => "projects",
            Self::Categories => "categories",
            Self::CategoryList => "category-list",
            Self::CategoryItems { .. } => "category-items",
            Self::ItemActions { .. } => "item-actions",
            Self::Commands => "commands",
            Self::CreateFile => "create-file",
            Self::ChooseCategory { .. } => "choose-category",
            Self::OpenProject => "open-project",
            Self::PostCreateFile { .. } => "post-create-file",
            Self::ReturnConfirm => "return-confirm",
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happens after a menu has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Show another menu
    Next(Menu),
    /// Stop prompting; background watches may keep running
    Idle,
    /// Stop prompting and end the session
    Exit,
}

impl Transition {
    pub fn to(menu: Menu) -> Self {
        Self::Next(menu)
    }
}

/// How a navigation session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Idle,
    Exit,
}
