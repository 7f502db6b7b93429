//! UI Components
//!
//! One component per view fragment: the login form, the list and its rows.
//! Class and input names are what `index.html`'s stylesheet targets.

mod error_banner;
mod login_form;
mod todo_item;
mod todo_list;

pub use error_banner::ErrorBanner;
pub use login_form::LoginForm;
pub use todo_item::{RowContent, TodoItemRow};
pub use todo_list::TodoList;
