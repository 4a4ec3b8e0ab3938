use formcraft_core::{Session, FAULT_TITLE};
use leptos::prelude::*;

mod components;

use components::form_preview::FormPreview;
use components::json_editor::JsonEditor;

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new());
    let fault = Memo::new(move |_| session.with(|s| s.fault().map(String::from)));

    move || match fault.get() {
        Some(message) => view! { <FaultPanel message=message /> }.into_any(),
        None => view! { <Workspace session=session /> }.into_any(),
    }
}

/// Editor and preview side by side; on small screens one pane at a time
#[component]
fn Workspace(session: RwSignal<Session>) -> impl IntoView {
    let show_preview = RwSignal::new(false);

    view! {
        <div class="min-h-screen bg-gray-50">
            // Mobile Header
            <div class="md:hidden bg-white border-b border-gray-200 px-4 py-2 sticky top-0 z-10">
                <div class="flex justify-between items-center">
                    <h1 class="text-lg font-semibold">"Form Generator"</h1>
                    <button
                        class="px-3 py-1 bg-blue-500 text-white rounded-md text-sm"
                        on:click=move |_| show_preview.update(|v| *v = !*v)
                    >
                        {move || if show_preview.get() { "Show Editor" } else { "Show Preview" }}
                    </button>
                </div>
            </div>

            <div class="flex flex-col md:flex-row min-h-screen">
                <div class=move || {
                    format!("w-full md:w-1/2 {} md:block", if show_preview.get() { "hidden" } else { "block" })
                }>
                    <div class="h-full p-4">
                        <JsonEditor session=session />
                    </div>
                </div>

                <div class=move || {
                    format!(
                        "w-full md:w-1/2 {} md:block bg-white border-l border-gray-200",
                        if show_preview.get() { "block" } else { "hidden" }
                    )
                }>
                    <div class="h-full p-4">
                        <FormPreview session=session />
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Replaces the whole app once rendering failed
#[component]
fn FaultPanel(message: String) -> impl IntoView {
    view! {
        <div class="p-6 bg-red-50 rounded-lg">
            <h2 class="text-xl font-bold text-red-700">{FAULT_TITLE}</h2>
            <p class="text-red-600 mt-2">{message}</p>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Core tracing events arrive here through their `log` records
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("Console logger unavailable: {}", e);
    }
    leptos::mount::mount_to_body(App);
}
