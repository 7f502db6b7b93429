//! Todo Item Component

use leptos::prelude::*;
use todo_api::TodoItem;

use crate::context::use_app_context;

/// What a row shows for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub text: String,
    pub checked: bool,
    pub class: &'static str,
}

impl From<&TodoItem> for RowContent {
    fn from(item: &TodoItem) -> Self {
        Self {
            text: item.body.clone(),
            checked: item.complete,
            class: if item.complete { "todo-item completed" } else { "todo-item" },
        }
    }
}

/// A single row. Handlers act on the copy rendered here; the server's answer
/// arrives with the next full re-render.
#[component]
pub fn TodoItemRow(item: TodoItem) -> impl IntoView {
    let ctx = use_app_context();

    let id = item.id;
    let row = RowContent::from(&item);

    view! {
        <li class=row.class>
            <input
                type="checkbox"
                class="complete"
                checked=row.checked
                on:click=move |ev| {
                    // The box only changes once the server has the new state
                    ev.prevent_default();
                    let item = item.clone();
                    ctx.dispatch(move |controller| async move {
                        controller.toggle_complete(&item).await
                    });
                }
            />
            <span class="body">{row.text}</span>
            <button class="delete" on:click=move |_| {
                ctx.dispatch(move |controller| async move { controller.delete_todo(id).await });
            }>"×"</button>
        </li>
    }
}
