//! Toast surface

use std::time::Duration;

use agri_core::{Notice, Severity};
use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Toast {
    id: u64,
    notice: Notice,
}

/// Handle for pushing notices; cheap to copy into handlers
#[derive(Clone, Copy, Debug)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Show a notice; ignored once the page owner is gone
    pub fn push(self, notice: Notice) {
        let Some(id) = self.next_id.try_get_untracked() else {
            return;
        };
        self.next_id.try_set(id + 1);
        self.items.try_update(|items| items.push(Toast { id, notice }));
        set_timeout(move || self.dismiss(id), TOAST_LIFETIME);
    }

    pub fn dismiss(self, id: u64) {
        self.items.try_update(|items| items.retain(|t| t.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn Toaster(toasts: Toasts) -> impl IntoView {
    view! {
        <ol class="toaster">
            <For
                each=move || toasts.items.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.notice.severity {
                        Severity::Info => "toast",
                        Severity::Destructive => "toast toast-destructive",
                    };
                    let id = toast.id;
                    view! {
                        <li class=class on:click=move |_| toasts.dismiss(id)>
                            <strong>{toast.notice.title}</strong>
                            <p>{toast.notice.description}</p>
                        </li>
                    }
                }
            />
        </ol>
    }
}
