//! Browser Adapters
//!
//! Web API implementations of the platform seams in `agri-core`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use agri_core::{
    FileHandle, Language, PreviewHandle, PreviewUrls, RecognitionCompleter, RecognitionHandle,
    RecognitionOutcome, SpeechRecognizer, Timer,
};
use futures::future::LocalBoxFuture;
use leptos::logging;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, SpeechRecognition, SpeechRecognitionEvent, Url};

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Browser language, falling back to English
pub fn detect_language() -> Language {
    web_sys::window()
        .and_then(|w| w.navigator().language())
        .and_then(|tag| Language::from_tag(&tag))
        .unwrap_or_default()
}

type Slot = Rc<RefCell<Option<RecognitionCompleter>>>;

fn complete(slot: &Slot, outcome: RecognitionOutcome) {
    if let Some(completer) = slot.borrow_mut().as_mut() {
        completer.complete(outcome);
    }
}

/// `SpeechRecognition` (or the `webkit` prefixed constructor)
///
/// Non-continuous, final results only. The first of result, error or end
/// resolves the session.
pub struct BrowserSpeech {
    recognition: SpeechRecognition,
    slot: Slot,
    _on_result: Closure<dyn FnMut(SpeechRecognitionEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
    _on_end: Closure<dyn FnMut(web_sys::Event)>,
}

impl BrowserSpeech {
    /// `None` when the browser has no recognition capability
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let constructor = ["SpeechRecognition", "webkitSpeechRecognition"]
            .into_iter()
            .filter_map(|name| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find(JsValue::is_function)?;

        let recognition: SpeechRecognition =
            js_sys::Reflect::construct::<fn() -> JsValue>(constructor.unchecked_ref(), &js_sys::Array::new())
                .map_err(|e| logging::warn!("Speech recognition unavailable: {}", js_error(&e)))
                .ok()?
                .unchecked_into();
        recognition.set_continuous(false);
        recognition.set_interim_results(false);

        let slot: Slot = Rc::default();

        let on_result = {
            let slot = slot.clone();
            Closure::<dyn FnMut(SpeechRecognitionEvent)>::new(move |event: SpeechRecognitionEvent| {
                let transcript = event
                    .results()
                    .and_then(|results| results.get(0))
                    .and_then(|result| result.get(0))
                    .map(|alternative| alternative.transcript());
                match transcript {
                    Some(text) => complete(&slot, RecognitionOutcome::Transcript(text)),
                    None => complete(&slot, RecognitionOutcome::Ended),
                }
            })
        };
        let on_error = {
            let slot = slot.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                let code = js_sys::Reflect::get(&event, &JsValue::from_str("error"))
                    .ok()
                    .and_then(|code| code.as_string())
                    .unwrap_or_else(|| "unknown".into());
                logging::warn!("Speech recognition error: {code}");
                complete(&slot, RecognitionOutcome::Error(code));
            })
        };
        let on_end = {
            let slot = slot.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                complete(&slot, RecognitionOutcome::Ended);
            })
        };

        recognition.set_onresult(Some(on_result.as_ref().unchecked_ref()));
        recognition.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        recognition.set_onend(Some(on_end.as_ref().unchecked_ref()));

        Some(Self {
            recognition,
            slot,
            _on_result: on_result,
            _on_error: on_error,
            _on_end: on_end,
        })
    }

    /// Boxed for `ChatSession`, `None` without capability
    pub fn boxed() -> Option<Box<dyn SpeechRecognizer>> {
        Self::detect().map(|speech| Box::new(speech) as Box<dyn SpeechRecognizer>)
    }
}

impl SpeechRecognizer for BrowserSpeech {
    fn start(&mut self, locale: &str) -> Result<RecognitionHandle, String> {
        self.recognition.set_lang(locale);
        let (completer, handle) = RecognitionHandle::channel();
        self.slot.replace(Some(completer));
        self.recognition.start().map_err(|e| {
            self.slot.replace(None);
            js_error(&e)
        })?;
        Ok(handle)
    }

    fn stop(&mut self) {
        self.recognition.stop();
    }

    fn abort(&mut self) {
        complete(&self.slot, RecognitionOutcome::Error("aborted".into()));
        self.recognition.abort();
    }
}

impl Drop for BrowserSpeech {
    fn drop(&mut self) {
        self.recognition.set_onresult(None);
        self.recognition.set_onerror(None);
        self.recognition.set_onend(None);
        self.recognition.abort();
    }
}

/// Object URLs (`URL.createObjectURL` / `URL.revokeObjectURL`)
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPreviews;

impl PreviewUrls for BrowserPreviews {
    fn create(&self, file: &FileHandle) -> PreviewHandle {
        let bytes = js_sys::Uint8Array::from(&file.data[..]);
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime);

        let url = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .and_then(|blob| Url::create_object_url_with_blob(&blob));
        match url {
            Ok(url) => PreviewHandle::new(url),
            Err(e) => {
                logging::warn!("Could not create preview for {}: {}", file.name, js_error(&e));
                PreviewHandle::new(String::new())
            }
        }
    }

    fn revoke(&self, handle: &PreviewHandle) {
        if handle.as_str().is_empty() {
            return;
        }
        if let Err(e) = Url::revoke_object_url(handle.as_str()) {
            logging::warn!("Could not revoke preview: {}", js_error(&e));
        }
    }
}

/// `setTimeout`-backed timer
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        leptos::prelude::set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

/// Read a picked or dropped file into memory
pub async fn read_file(file: web_sys::File) -> Result<FileHandle, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error(&e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileHandle::new(file.name(), file.type_(), bytes))
}

/// Files from a `FileList`, in order
pub fn file_list(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}
