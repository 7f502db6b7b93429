//! Todo List Component
//!
//! The logged-in view: logout control, create form and one row per item.

use leptos::prelude::*;
use todo_api::TodoItem;

use crate::components::TodoItemRow;
use crate::context::use_app_context;

#[component]
pub fn TodoList(items: Vec<TodoItem>) -> impl IntoView {
    let ctx = use_app_context();

    let (new_body, set_new_body) = signal(String::new());

    let create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let body = new_body.get();
        if body.trim().is_empty() {
            return;
        }
        ctx.dispatch(move |controller| async move { controller.create_todo(body).await });
    };

    view! {
        <div class="todo-app">
            <button class="logout" on:click=move |_| ctx.run(|controller| controller.logout())>
                "Log out"
            </button>

            <form class="todo-form" on:submit=create>
                <input
                    type="text"
                    name="body"
                    placeholder="What needs doing?"
                    prop:value=new_body
                    on:input=move |ev| set_new_body.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>

            <ul class="todo-list">
                {items
                    .into_iter()
                    .map(|item| view! { <TodoItemRow item=item /> })
                    .collect_view()}
            </ul>
        </div>
    }
}
