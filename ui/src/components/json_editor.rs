//! Schema editor pane
//!
//! A JSON editor with:
//! - Syntax highlighting
//! - Line numbers
//! - Validation on every keystroke
//! - "Format JSON" and "Copy JSON" actions

use formcraft_core::{ClipboardError, Session, COPY_FEEDBACK};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn is_json_whitespace(c: &char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Split JSON text into (text, css class) runs for highlighting. Broken input
/// still tokenizes; unknown characters get the `json-error` class.
pub fn tokenize_json(json: &str) -> Vec<(String, &'static str)> {
    let mut tokens = Vec::new();
    let mut chars = json.chars().peekable();

    while let Some(ch) = chars.next() {
        let mut text = ch.to_string();
        let class = match ch {
            ' ' | '\t' | '\n' | '\r' => {
                while let Some(c) = chars.next_if(is_json_whitespace) {
                    text.push(c);
                }
                ""
            }
            '"' => {
                let mut escaped = false;
                for c in chars.by_ref() {
                    text.push(c);
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break;
                    }
                }
                // A string followed by a colon is an object key
                let next_meaningful = chars.clone().find(|c| !matches!(c, ' ' | '\t'));
                if next_meaningful == Some(':') {
                    "json-key"
                } else {
                    "json-string"
                }
            }
            '0'..='9' | '-' => {
                while let Some(c) =
                    chars.next_if(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
                {
                    text.push(c);
                }
                "json-number"
            }
            'a'..='z' | 'A'..='Z' => {
                while let Some(c) = chars.next_if(char::is_ascii_alphabetic) {
                    text.push(c);
                }
                match text.as_str() {
                    "true" | "false" => "json-boolean",
                    "null" => "json-null",
                    _ => "json-error",
                }
            }
            '{' | '}' => "json-brace",
            '[' | ']' => "json-bracket",
            ':' => "json-colon",
            ',' => "json-comma",
            _ => "json-error",
        };
        tokens.push((text, class));
    }

    tokens
}

/// Generate syntax-highlighted HTML from JSON
pub fn highlight_json(json: &str) -> String {
    let mut html = String::new();

    for (text, class) in tokenize_json(json) {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");

        if class.is_empty() {
            html.push_str(&escaped);
        } else {
            html.push_str(&format!(r#"<span class="{}">{}</span>"#, class, escaped));
        }
    }

    // A trailing newline needs content after it or the overlay loses a line
    if json.ends_with('\n') {
        html.push(' ');
    }

    html
}

fn describe_js_error(value: &wasm_bindgen::JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Hand `text` to the system clipboard
async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError("no window available".to_string()))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError(describe_js_error(&e)))
}

/// Editor pane bound to the authoring session
#[component]
pub fn JsonEditor(session: RwSignal<Session>) -> impl IntoView {
    let text = Memo::new(move |_| session.with(|s| s.editor().text().to_string()));
    let error = Memo::new(move |_| session.with(|s| s.editor().error_message().map(String::from)));
    let copied = Memo::new(move |_| session.with(|s| s.editor().is_copied()));
    let line_count = Memo::new(move |_| session.with(|s| s.editor().line_count()));

    let handle_input = move |ev: web_sys::Event| {
        let new_value = event_target_value(&ev);
        session.update(|s| s.edit(new_value));
    };

    let on_format = move |_| {
        session.update(|s| {
            s.format();
        });
    };

    let on_copy = move |_| {
        let contents = session.with_untracked(|s| s.editor().copy_text().to_string());
        spawn_local(async move {
            let result = write_clipboard(&contents).await;
            let ticket = session.try_update(|s| s.copy_finished(result)).flatten();
            if let Some(ticket) = ticket {
                gloo_timers::future::sleep(COPY_FEEDBACK).await;
                session.try_update(|s| s.copy_expired(ticket));
            }
        });
    };

    // Sync scroll between textarea and highlighted overlay
    let handle_scroll = move |ev: web_sys::Event| {
        let Some(textarea) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        else {
            return;
        };

        if let Some(parent) = textarea.parent_element() {
            if let Some(highlight) = parent
                .query_selector(".json-highlight")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            {
                highlight.set_scroll_top(textarea.scroll_top());
                highlight.set_scroll_left(textarea.scroll_left());
            }
        }
    };

    view! {
        <div class="flex flex-col h-screen rounded-lg shadow-lg bg-white">
            <div class="bg-gray-50 p-4 border-b flex justify-between items-center">
                <div>
                    <h2 class="text-lg font-semibold text-gray-700">"Form Schema Editor"</h2>
                    <p class="text-sm text-gray-500 mt-1">
                        "Edit the JSON schema to customize your form"
                    </p>
                </div>
                <div class="flex gap-2">
                    <button
                        type="button"
                        class=move || {
                            if copied.get() {
                                "px-3 py-1 rounded transition-colors text-white bg-green-500 hover:bg-green-600"
                            } else {
                                "px-3 py-1 rounded transition-colors text-white bg-gray-500 hover:bg-gray-600"
                            }
                        }
                        on:click=on_copy
                    >
                        {move || if copied.get() { "Copied!" } else { "Copy JSON" }}
                    </button>
                    <button
                        type="button"
                        class="px-3 py-1 bg-blue-500 text-white rounded hover:bg-blue-600 transition-colors"
                        on:click=on_format
                    >
                        "Format JSON"
                    </button>
                </div>
            </div>

            {move || error.get().map(|message| view! {
                <div class="editor-error p-4 bg-red-50 border-t border-red-200 text-red-600 text-sm">
                    {message}
                </div>
            })}

            <div class="json-editor-wrapper flex-grow">
                <div class="json-line-numbers" aria-hidden="true">
                    {move || {
                        (1..=line_count.get())
                            .map(|n| view! { <div class="json-line-number">{n}</div> })
                            .collect_view()
                    }}
                </div>

                <div class="json-editor-area">
                    // Syntax highlighted overlay (visual only)
                    <pre
                        class="json-highlight"
                        aria-hidden="true"
                        inner_html=move || highlight_json(&text.get())
                    />

                    <textarea
                        class="json-textarea"
                        spellcheck="false"
                        autocomplete="off"
                        prop:value=move || text.get()
                        on:input=handle_input
                        on:scroll=handle_scroll
                    />
                </div>
            </div>
        </div>
    }
}
