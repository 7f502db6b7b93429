//! UI Surface
//!
//! The controller never touches the document directly. It tells a
//! [`UiSurface`] which screen to show, and the surface swaps the root
//! content. [`LeptosSurface`] is the browser implementation.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_api::TodoItem;

/// Everything the root element can show
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    List(Vec<TodoItem>),
}

/// Handle on the root content of the page
pub trait UiSurface {
    /// Replace the root content with `screen`
    fn render(&self, screen: Screen);

    /// Toggle the body-level loading indicator
    fn set_loading(&self, loading: bool);

    fn show_error(&self, message: String);

    fn clear_error(&self);
}

/// An error message plus the generation it was shown in, so a stale
/// dismiss timer cannot hide a newer message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub generation: u64,
    pub message: String,
}

const LOADING_CLASS: &str = "loading";

/// Signal-backed surface mounted by [`App`](crate::app::App)
#[derive(Clone, Copy)]
pub struct LeptosSurface {
    screen: RwSignal<Option<Screen>>,
    notice: RwSignal<Option<Notice>>,
    generation: RwSignal<u64>,
    dismiss_ms: u32,
}

impl LeptosSurface {
    pub fn new(dismiss_ms: u32) -> Self {
        Self {
            screen: RwSignal::new(None),
            notice: RwSignal::new(None),
            generation: RwSignal::new(0),
            dismiss_ms,
        }
    }

    /// Current root content; `None` until the first render
    pub fn screen(&self) -> ReadSignal<Option<Screen>> {
        self.screen.read_only()
    }

    pub fn notice(&self) -> ReadSignal<Option<Notice>> {
        self.notice.read_only()
    }
}

impl UiSurface for LeptosSurface {
    fn render(&self, screen: Screen) {
        match &screen {
            Screen::Login => log::debug!("Rendering login view"),
            Screen::List(items) => log::debug!("Rendering list view with {} items", items.len()),
        }
        self.screen.set(Some(screen));
    }

    fn set_loading(&self, loading: bool) {
        let Some(body) = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.body())
        else {
            return;
        };
        let classes = body.class_list();
        let result = if loading {
            classes.add_1(LOADING_CLASS)
        } else {
            classes.remove_1(LOADING_CLASS)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle loading class: {:?}", e);
        }
    }

    fn show_error(&self, message: String) {
        let generation = self.generation.get_untracked() + 1;
        self.generation.set(generation);
        self.notice.set(Some(Notice { generation, message }));

        if self.dismiss_ms == 0 {
            return;
        }
        let notice = self.notice;
        let delay = self.dismiss_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            let still_current = notice
                .get_untracked()
                .is_some_and(|current| current.generation == generation);
            if still_current {
                notice.set(None);
            }
        });
    }

    fn clear_error(&self) {
        if self.notice.get_untracked().is_some() {
            self.notice.set(None);
        }
    }
}
