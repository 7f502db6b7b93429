//! Login Form Component

use leptos::prelude::*;
use todo_api::Credentials;

use crate::context::use_app_context;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials::new(username.get(), password.get());
        ctx.dispatch(move |controller| async move { controller.login(credentials).await });
    };

    view! {
        <form class="login-form" on:submit=submit>
            <h1>"Login"</h1>
            <input
                type="text"
                name="username"
                placeholder="Username"
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                type="password"
                name="password"
                placeholder="Password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit">"Log in"</button>
        </form>
    }
}
