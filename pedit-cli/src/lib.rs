//! Front-end pieces of the `pedit` command: settings, view state, recipes
//! and the session that drives the editor.

pub mod frontend;
pub mod recipe;
pub mod settings;
pub mod view;

pub use frontend::{Action, Frontend, Session, Step};
pub use recipe::{load_recipe, parse_recipe};
pub use settings::{EditorSettings, SettingsError};
pub use view::{adjust_scrollbar, Actions, ViewState};
