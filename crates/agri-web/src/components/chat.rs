//! Chat assistant
//!
//! Thin view over `ChatController`: every handler forwards to the
//! controller and the listener mirrors each snapshot into a signal.

use std::rc::Rc;
use std::sync::Arc;

use agri_core::{
    i18n, Attachment, AttachmentId, AttachmentKind, CannedResponder, ChatConfig, ChatController, ChatEvent,
    ChatSnapshot, Language, Message, Sender,
};
use leptos::logging;
use leptos::prelude::*;

use super::Toasts;
use crate::platform::{detect_language, file_list, read_file, BrowserPreviews, BrowserSpeech, BrowserTimer};

#[component]
fn AttachmentView(attachment: Attachment) -> impl IntoView {
    match attachment.kind {
        AttachmentKind::Image => view! {
            <img class="attachment-image" src=attachment.preview.as_str().to_string() alt=attachment.display_name />
        }
        .into_any(),
        AttachmentKind::Document => view! {
            <span class="attachment-doc">"📄 " {attachment.display_name}</span>
        }
        .into_any(),
    }
}

#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let (class, avatar) = match message.sender {
        Sender::User => ("message message-user", "You"),
        Sender::Assistant => ("message message-assistant", "🌱"),
    };
    let time = message.timestamp.format("%H:%M").to_string();
    let content = (!message.content.is_empty()).then(|| view! { <p class="content">{message.content.clone()}</p> });

    view! {
        <div class=class>
            <span class="avatar">{avatar}</span>
            <div class="bubble">
                {content}
                <div class="attachments">
                    {message
                        .attachments
                        .iter()
                        .cloned()
                        .map(|attachment| view! { <AttachmentView attachment /> })
                        .collect_view()}
                </div>
                <time>{time}</time>
            </div>
        </div>
    }
}

#[component]
pub fn Chatbot(toasts: Toasts) -> impl IntoView {
    let config = ChatConfig {
        language: detect_language(),
        ..ChatConfig::default()
    };
    let controller = ChatController::build(
        &config,
        Arc::new(CannedResponder::new()),
        BrowserTimer,
        BrowserPreviews,
        BrowserSpeech::boxed(),
    );
    let snapshot = RwSignal::new(controller.snapshot());
    let controller = controller.with_listener(move |event| match event {
        ChatEvent::Changed(next) => {
            snapshot.try_set(next);
        }
        ChatEvent::Notice(notice) => toasts.push(notice),
    });
    let chat = StoredValue::new_local(Rc::new(controller));
    on_cleanup(move || {
        chat.try_with_value(|c| c.teardown());
    });

    let text = move |key: &'static str| move || i18n::text(snapshot.with(|s| s.language), key);
    let list_ref = NodeRef::<leptos::html::Div>::new();
    let file_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        snapshot.with(|s| (s.messages.len(), s.pending));
        if let Some(list) = list_ref.get() {
            list.set_scroll_top(list.scroll_height());
        }
    });

    let send = move || {
        let Some(c) = chat.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            c.send().await;
        });
    };

    let on_key = move |ev: leptos::ev::KeyboardEvent| {
        let Some(c) = chat.try_get_value() else {
            return;
        };
        let key = ev.key();
        leptos::task::spawn_local(async move {
            c.handle_key(&key).await;
        });
    };

    let toggle_voice = move |_| {
        let Some(c) = chat.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            if let Err(e) = c.toggle_voice().await {
                logging::warn!("Voice input: {e}");
            }
        });
    };

    let attach = move |files: Vec<web_sys::File>| {
        let Some(c) = chat.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let mut handles = Vec::with_capacity(files.len());
            for file in files {
                match read_file(file).await {
                    Ok(handle) => handles.push(handle),
                    Err(e) => logging::warn!("Could not read attachment: {e}"),
                }
            }
            c.stage(handles);
        });
    };

    let remove = move |id: AttachmentId| {
        chat.try_with_value(|c| c.remove_attachment(&id));
    };

    let listening = move || snapshot.with(|s| s.listening);
    let pending = move || snapshot.with(|s| s.pending);

    view! {
        <section id="chatbot" class="chatbot">
            <span class="badge">"AI Assistant"</span>
            <h2>"Your 24/7 Farming Expert"</h2>
            <p>
                "Ask any agricultural questions and get personalized advice based on cutting-edge AI technology and agricultural expertise."
            </p>

            <div class="chat-card">
                <header class="chat-header">
                    <div>
                        <h3>"AgriGenius Assistant"</h3>
                        <p class="muted">"Agricultural AI expert"</p>
                    </div>
                    <select
                        class="language"
                        on:change=move |ev| {
                            if let Some(language) = Language::from_tag(&event_target_value(&ev)) {
                                chat.try_with_value(|c| c.set_language(language));
                            }
                        }
                    >
                        {Language::ALL
                            .into_iter()
                            .map(|language| {
                                view! {
                                    <option
                                        value=language.tag()
                                        selected=move || snapshot.with(|s| s.language == language)
                                    >
                                        {language.display_name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <span class="status">"● Online"</span>
                </header>

                <div class="messages" node_ref=list_ref>
                    <For
                        each=move || snapshot.with(|s| s.messages.clone())
                        key=|message| message.id.as_str().to_string()
                        children=|message| view! { <MessageBubble message /> }
                    />
                    <Show when=pending>
                        <div class="message message-assistant loading">
                            <span class="avatar">"🌱"</span>
                            <div class="bubble">{text("chatbot.thinking")}</div>
                        </div>
                    </Show>
                </div>

                <Show when=move || snapshot.with(|s| !s.staged.is_empty())>
                    <ul class="staged">
                        <For
                            each=move || snapshot.with(|s| s.staged.clone())
                            key=|attachment| attachment.id.as_str().to_string()
                            children=move |attachment| {
                                let id = attachment.id.clone();
                                view! {
                                    <li>
                                        <AttachmentView attachment />
                                        <button class="remove" on:click=move |_| remove(id.clone())>"✕"</button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>

                <div class="input-area">
                    <button
                        class="btn attach"
                        title="Attach files"
                        disabled=move || !snapshot.with(ChatSnapshot::input_enabled)
                        on:click=move |_| {
                            if let Some(input) = file_ref.get() {
                                input.click();
                            }
                        }
                    >
                        "📎"
                    </button>
                    <input
                        node_ref=file_ref
                        type="file"
                        multiple=true
                        class="hidden"
                        on:change=move |ev| {
                            let input: web_sys::HtmlInputElement = event_target(&ev);
                            attach(file_list(input.files()));
                            input.set_value("");
                        }
                    />
                    <input
                        class="draft"
                        placeholder=text("chatbot.placeholder")
                        prop:value=move || snapshot.with(|s| s.draft.clone())
                        disabled=move || !snapshot.with(ChatSnapshot::input_enabled)
                        on:input=move |ev| {
                            chat.try_with_value(|c| c.set_draft(event_target_value(&ev)));
                        }
                        on:keydown=on_key
                    />
                    <button
                        class="btn mic"
                        class:listening=listening
                        disabled=pending
                        title=move || {
                            let key = if listening() { "chatbot.voice.stop" } else { "chatbot.voice.start" };
                            i18n::text(snapshot.with(|s| s.language), key)
                        }
                        on:click=toggle_voice
                    >
                        {move || if listening() { "🔇" } else { "🎤" }}
                    </button>
                    <button
                        class="btn btn-primary send"
                        disabled=move || !snapshot.with(ChatSnapshot::can_send)
                        on:click=move |_| send()
                    >
                        {move || if pending() { "…" } else { "➤" }}
                    </button>
                </div>
            </div>
        </section>
    }
}
