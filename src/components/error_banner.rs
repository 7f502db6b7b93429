//! Error Banner Component

use leptos::prelude::*;

use crate::surface::Notice;

/// Shows the latest failure until it is dismissed or replaced
#[component]
pub fn ErrorBanner(notice: ReadSignal<Option<Notice>>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        {move || notice.get().map(|notice| view! {
            <div class="error-banner" role="alert">
                <span class="error-message">{notice.message}</span>
                <button class="error-dismiss" on:click=move |_| on_dismiss.run(())>"✗"</button>
            </div>
        })}
    }
}
