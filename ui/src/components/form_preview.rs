//! Live Form Preview
//!
//! Renders the session's validated schema as an interactive form. The form
//! structure is rebuilt only when the schema changes; values and errors are
//! read per field so typing never re-creates the inputs.

use formcraft_core::{
    Choice, FieldControl, FieldView, FormState, InputType, Session, SubmitPhase,
    EMPTY_MESSAGE,
};
use leptos::prelude::*;
use leptos::web_sys;

const BASE_INPUT_CLASS: &str =
    "w-full px-3 py-2 border rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

/// The parts of a form that decide its DOM structure
#[derive(Clone, Debug, PartialEq)]
struct FormLayout {
    title: String,
    description: String,
    fields: Vec<FieldView>,
}

impl FormLayout {
    fn of(form: &FormState) -> Self {
        Self {
            title: form.title().to_string(),
            description: form.description().to_string(),
            fields: form
                .fields()
                .into_iter()
                .map(|field| FieldView {
                    value: None,
                    error: None,
                    ..field
                })
                .collect(),
        }
    }
}

// ============================================================================
// Session access helpers
// ============================================================================

fn field_value(session: RwSignal<Session>, id: &str) -> String {
    session.with(|s| {
        s.preview()
            .form()
            .and_then(|form| form.value(id))
            .unwrap_or_default()
            .to_string()
    })
}

fn field_error(session: RwSignal<Session>, id: &str) -> Option<String> {
    session.with(|s| {
        s.preview()
            .form()
            .and_then(|form| form.error(id))
            .map(|e| e.message().to_string())
    })
}

fn set_field(session: RwSignal<Session>, id: &str, value: String) {
    session.update(|s| {
        if let Err(e) = s.form_mut().and_then(|form| form.set_value(id, value)) {
            log::warn!("Ignoring input for {}: {}", id, e);
        }
    });
}

fn input_class(session: RwSignal<Session>, id: &str, extra: &str) -> String {
    let border = if field_error(session, id).is_some() {
        "border-red-500"
    } else {
        "border-gray-300"
    };
    format!("{} {} {}", BASE_INPUT_CLASS, border, extra)
}

// ============================================================================
// Form Preview
// ============================================================================

/// Preview pane: the empty message or the rendered form
#[component]
pub fn FormPreview(session: RwSignal<Session>) -> impl IntoView {
    let layout = Memo::new(move |_| session.with(|s| s.preview().form().map(FormLayout::of)));

    move || match layout.get() {
        None => view! {
            <div class="p-6 bg-gray-50 rounded-lg text-center">
                <p class="text-gray-500">{EMPTY_MESSAGE}</p>
            </div>
        }
        .into_any(),
        Some(layout) => view! { <PreviewForm session=session layout=layout /> }.into_any(),
    }
}

#[component]
fn PreviewForm(session: RwSignal<Session>, layout: FormLayout) -> impl IntoView {
    let button = Memo::new(move |_| {
        session.with(|s| {
            s.preview()
                .form()
                .map(FormState::submit_button)
                .unwrap_or_else(|| SubmitPhase::Idle.button())
        })
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        session.update(|s| match s.form_mut() {
            Ok(form) => {
                let outcome = form.submit();
                log::debug!("Submit accepted: {}", outcome.is_accepted());
            }
            Err(e) => log::warn!("Submit ignored: {}", e),
        });
    };

    let on_reset = move |_| {
        session.update(|s| {
            if let Ok(form) = s.form_mut() {
                form.reset();
            }
        });
    };

    view! {
        <div class="bg-white rounded-lg shadow-lg p-4">
            <form on:submit=on_submit class="space-y-4 md:space-y-6" novalidate=true>
                <div class="border-b pb-3 md:pb-4">
                    <h1 class="text-xl md:text-2xl font-bold text-gray-900">{layout.title}</h1>
                    <p class="mt-1 md:mt-2 text-sm md:text-base text-gray-600">
                        {layout.description}
                    </p>
                </div>

                {layout
                    .fields
                    .into_iter()
                    .map(|field| view! { <FieldBlock session=session field=field /> })
                    .collect_view()}

                <div class="pt-4 flex flex-col sm:flex-row gap-2">
                    <button
                        type="submit"
                        disabled=move || button.get().disabled
                        class="w-full sm:w-auto bg-blue-600 text-white py-2 px-4 rounded-md hover:bg-blue-700 disabled:opacity-50"
                    >
                        {move || button.get().label}
                    </button>
                    <button
                        type="button"
                        on:click=on_reset
                        class="w-full sm:w-auto bg-gray-200 text-gray-700 py-2 px-4 rounded-md hover:bg-gray-300"
                    >
                        "Reset"
                    </button>
                </div>
            </form>
        </div>
    }
}

// ============================================================================
// Field Block
// ============================================================================

/// Label, control and inline error for one field
#[component]
fn FieldBlock(session: RwSignal<Session>, field: FieldView) -> impl IntoView {
    let id = field.id.clone();

    view! {
        <div class="space-y-1 md:space-y-2">
            <label class="block text-sm font-medium text-gray-700" for=field.id.clone()>
                {field.label}
                {field.required.then(|| view! { <span class="text-red-500 ml-1">"*"</span> })}
            </label>
            <FieldInput session=session id=field.id control=field.control />
            {move || field_error(session, &id).map(|message| view! {
                <p class="text-xs md:text-sm text-red-600">{message}</p>
            })}
        </div>
    }
}

/// The interactive control for a field
#[component]
fn FieldInput(session: RwSignal<Session>, id: String, control: FieldControl) -> impl IntoView {
    match control {
        FieldControl::Input {
            input_type,
            placeholder,
        } => view! {
            <TextInput session=session id=id input_type=input_type placeholder=placeholder />
        }
        .into_any(),
        FieldControl::TextArea { placeholder } => view! {
            <TextAreaInput session=session id=id placeholder=placeholder />
        }
        .into_any(),
        FieldControl::Select { choices } => view! {
            <SelectInput session=session id=id choices=choices />
        }
        .into_any(),
        FieldControl::RadioGroup { group, choices } => view! {
            <RadioInput session=session id=id group=group choices=choices />
        }
        .into_any(),
        FieldControl::Unsupported { kind } => {
            log::debug!("Field {} has unsupported type {}", id, kind);
            ().into_any()
        }
    }
}

// ============================================================================
// Controls
// ============================================================================

#[component]
fn TextInput(
    session: RwSignal<Session>,
    id: String,
    input_type: InputType,
    placeholder: Option<String>,
) -> impl IntoView {
    let id_for_value = id.clone();
    let id_for_class = id.clone();
    let id_for_change = id.clone();

    let on_input = move |ev: web_sys::Event| {
        set_field(session, &id_for_change, event_target_value(&ev));
    };

    view! {
        <input
            id=id
            type=input_type.as_str()
            class=move || input_class(session, &id_for_class, "")
            placeholder=placeholder.unwrap_or_default()
            prop:value=move || field_value(session, &id_for_value)
            on:input=on_input
        />
    }
}

#[component]
fn TextAreaInput(
    session: RwSignal<Session>,
    id: String,
    placeholder: Option<String>,
) -> impl IntoView {
    let id_for_value = id.clone();
    let id_for_class = id.clone();
    let id_for_change = id.clone();

    let on_input = move |ev: web_sys::Event| {
        set_field(session, &id_for_change, event_target_value(&ev));
    };

    view! {
        <textarea
            id=id
            class=move || input_class(session, &id_for_class, "min-h-[100px]")
            placeholder=placeholder.unwrap_or_default()
            prop:value=move || field_value(session, &id_for_value)
            on:input=on_input
        />
    }
}

#[component]
fn SelectInput(session: RwSignal<Session>, id: String, choices: Vec<Choice>) -> impl IntoView {
    let id_for_value = id.clone();
    let id_for_class = id.clone();
    let id_for_change = id.clone();

    let on_change = move |ev: web_sys::Event| {
        set_field(session, &id_for_change, event_target_value(&ev));
    };

    view! {
        <select
            id=id
            class=move || input_class(session, &id_for_class, "")
            prop:value=move || field_value(session, &id_for_value)
            on:change=on_change
        >
            {choices
                .into_iter()
                .map(|choice| view! { <option value=choice.value>{choice.label}</option> })
                .collect_view()}
        </select>
    }
}

#[component]
fn RadioInput(
    session: RwSignal<Session>,
    id: String,
    group: String,
    choices: Vec<Choice>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {choices
                .into_iter()
                .map(|choice| {
                    let id_for_checked = id.clone();
                    let id_for_change = id.clone();
                    let selected = choice.value.clone();
                    let value = choice.value.clone();
                    view! {
                        <label class="flex items-center space-x-3 cursor-pointer">
                            <input
                                type="radio"
                                name=group.clone()
                                value=choice.value
                                class="w-4 h-4 text-blue-600"
                                prop:checked=move || field_value(session, &id_for_checked) == selected
                                on:change=move |_| set_field(session, &id_for_change, value.clone())
                            />
                            <span class="text-gray-700">{choice.label}</span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}
