//! Pest & disease detection panel

use std::cell::RefCell;
use std::rc::Rc;

use agri_advisor::{Advisor, AdvisorError, DetectionResult, PestUpload, Severity};
use agri_core::{FileHandle, Notice};
use leptos::prelude::*;

use super::Toasts;
use crate::platform::{file_list, read_file, BrowserPreviews};

/// Render state mirrored out of `PestUpload`
#[derive(Clone, Debug, Default, PartialEq)]
struct PanelState {
    file_name: Option<String>,
    preview: Option<String>,
    dragging: bool,
    uploading: bool,
    result: Option<DetectionResult>,
}

impl PanelState {
    fn of(upload: &PestUpload) -> Self {
        Self {
            file_name: upload.file().map(|f| f.name.clone()),
            preview: upload.preview().map(|p| p.as_str().to_string()),
            dragging: upload.is_dragging(),
            uploading: upload.is_uploading(),
            result: upload.result().cloned(),
        }
    }
}

const fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "severity severity-low",
        Severity::Medium => "severity severity-medium",
        Severity::High => "severity severity-high",
    }
}

#[component]
fn ResultCard(result: DetectionResult) -> impl IntoView {
    view! {
        <div class="detection">
            <div class="detection-header">
                <span class="kind">{result.kind.label()}</span>
                <span class="confidence">{result.confidence} "% Confidence"</span>
            </div>
            <h3>{result.name}</h3>
            <span class=severity_class(result.severity)>{result.severity.label()}</span>
            <h4>"Description"</h4>
            <p>{result.description}</p>
            <h4>"Recommended Treatment"</h4>
            <p>{result.treatment}</p>
        </div>
    }
}

#[component]
pub fn PestDetection(advisor: StoredValue<Rc<Advisor>, LocalStorage>, toasts: Toasts) -> impl IntoView {
    let upload = StoredValue::new_local(Rc::new(RefCell::new(PestUpload::new(BrowserPreviews))));
    let state = RwSignal::new(PanelState::default());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let apply = move |change: &dyn Fn(&mut PestUpload) -> Result<(), AdvisorError>| {
        let Some(upload) = upload.try_get_value() else {
            return;
        };
        let outcome = change(&mut *upload.borrow_mut());
        state.set(PanelState::of(&upload.borrow()));
        if let Err(e) = outcome {
            toasts.push(Notice::destructive("Image not accepted", e.user_message()));
        }
    };

    let choose = move |files: Vec<web_sys::File>| {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        leptos::task::spawn_local(async move {
            match read_file(file).await {
                Ok(handle) => apply(&move |u: &mut PestUpload| u.select(handle.clone())),
                Err(e) => toasts.push(Notice::destructive("Could not read file", e)),
            }
        });
    };

    let analyze = move |_| {
        let Some(upload) = upload.try_get_value() else {
            return;
        };
        let begun: Result<FileHandle, AdvisorError> = upload.borrow_mut().begin();
        state.set(PanelState::of(&upload.borrow()));
        let file = match begun {
            Ok(file) => file,
            Err(e) => {
                toasts.push(Notice::destructive("Nothing to analyze", e.user_message()));
                return;
            }
        };
        let advisor = advisor.get_value();
        leptos::task::spawn_local(async move {
            let detected = advisor.detect_pests(&file).await;
            match detected {
                Ok(result) => upload.borrow_mut().finish(result),
                Err(e) => {
                    upload.borrow_mut().fail();
                    toasts.push(Notice::destructive("Analysis failed", e.user_message()));
                }
            }
            state.set(PanelState::of(&upload.borrow()));
        });
    };

    let reset = move |_| {
        apply(&|u: &mut PestUpload| {
            u.reset();
            Ok(())
        });
    };

    let dragging = move || state.with(|s| s.dragging);
    let uploading = move || state.with(|s| s.uploading);

    view! {
        <section id="pest-detection" class="pest">
            <span class="badge">"Pest & Disease Detection"</span>
            <h2>"Identify Plant Problems Instantly"</h2>
            <p>
                "Upload an image of your plants and our AI will quickly detect pests or diseases affecting them, along with providing eco-friendly treatment recommendations."
            </p>

            <div
                class="dropzone"
                class:dragging=dragging
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    apply(&|u: &mut PestUpload| {
                        u.set_dragging(true);
                        Ok(())
                    });
                }
                on:dragleave=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    apply(&|u: &mut PestUpload| {
                        u.set_dragging(false);
                        Ok(())
                    });
                }
                on:drop=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    apply(&|u: &mut PestUpload| {
                        u.set_dragging(false);
                        Ok(())
                    });
                    choose(file_list(ev.data_transfer().and_then(|dt| dt.files())));
                }
            >
                <Show
                    when=move || state.with(|s| s.preview.is_some())
                    fallback=move || {
                        view! {
                            <h3>"Upload Plant Image"</h3>
                            <p class="muted">"Drag and drop an image here, or click to browse"</p>
                            <button
                                class="btn"
                                on:click=move |_| {
                                    if let Some(input) = input_ref.get() {
                                        input.click();
                                    }
                                }
                            >
                                "Select Image"
                            </button>
                        }
                    }
                >
                    <img class="preview" src=move || state.with(|s| s.preview.clone().unwrap_or_default()) alt="Plant preview" />
                    <p class="muted">{move || state.with(|s| s.file_name.clone().unwrap_or_default())}</p>
                    <div class="actions">
                        <button class="btn" on:click=reset disabled=uploading>"Reset"</button>
                        <button class="btn btn-primary" on:click=analyze disabled=uploading>
                            {move || if uploading() { "Analyzing..." } else { "Analyze Image" }}
                        </button>
                    </div>
                </Show>
                <input
                    node_ref=input_ref
                    type="file"
                    accept="image/*"
                    class="hidden"
                    on:change=move |ev| {
                        let input: web_sys::HtmlInputElement = event_target(&ev);
                        choose(file_list(input.files()));
                        input.set_value("");
                    }
                />
            </div>

            <div class="results">
                {move || {
                    if uploading() {
                        view! { <p class="muted">"Analyzing your plant image..."</p> }.into_any()
                    } else if let Some(result) = state.with(|s| s.result.clone()) {
                        view! { <ResultCard result /> }.into_any()
                    } else {
                        view! {
                            <p class="muted">
                                "Upload and analyze a plant image to receive pest and disease detection results."
                            </p>
                        }
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}
