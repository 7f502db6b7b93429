//! Application Context
//!
//! Gives components access to the controller via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::controller::Controller;

/// App-wide handle provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<Controller, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
        }
    }

    /// Run a controller action as its own task.
    ///
    /// Actions are not serialized: two quick clicks start two requests.
    pub fn dispatch<F, Fut>(&self, action: F)
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let controller = self.controller.get_value();
        spawn_local(action(controller));
    }

    /// Run a synchronous controller action
    pub fn run(&self, action: impl FnOnce(&Controller)) {
        self.controller.with_value(action);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
