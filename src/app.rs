//! Todo App Root
//!
//! Mounts whatever screen the surface currently holds into the root element.

use leptos::prelude::*;

use crate::components::{ErrorBanner, LoginForm, TodoList};
use crate::surface::{LeptosSurface, Screen, UiSurface};

#[component]
pub fn App(surface: LeptosSurface) -> impl IntoView {
    let screen = surface.screen();
    let dismiss = Callback::new(move |_: ()| surface.clear_error());

    view! {
        <ErrorBanner notice=surface.notice() on_dismiss=dismiss />

        // Root content: replaced on every render
        <div class="root">
            {move || screen.get().map(|screen| match screen {
                Screen::Login => view! { <LoginForm /> }.into_any(),
                Screen::List(items) => view! { <TodoList items=items /> }.into_any(),
            })}
        </div>
    }
}
