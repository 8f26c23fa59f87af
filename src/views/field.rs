use dioxus::prelude::*;

/// Labelled text input bound to a form field.
#[component]
pub fn Field(
    #[props(into)] id: String,
    #[props(into)] label: String,
    #[props(into, default = "text".to_string())] kind: String,
    #[props(default)] required: bool,
    value: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label { r#for: "{id}", "{label}" }
        input {
            r#type: "{kind}",
            id: "{id}",
            required: required,
            value: "{value}",
            oninput: move |event| oninput.call(event.value()),
        }
    }
}
