use crate::Route;
use crate::forms::RegisterForm;
use crate::session::RegistrationError;
use crate::views::{AuthContext, Field};
use dioxus::prelude::*;

#[component]
pub fn Register() -> Element {
    let auth = use_context::<AuthContext>();
    let mut form = use_signal(RegisterForm::default);
    let mut mismatch = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *busy.read() {
            return;
        }
        let submitted = form.read().clone();
        let auth = auth.clone();
        mismatch.set(None);
        busy.set(true);
        spawn(async move {
            match auth.register(&submitted).await {
                Ok(()) => {}
                Err(RegistrationError::Form(e)) => mismatch.set(Some(e.to_string())),
                Err(RegistrationError::Session(e)) => {
                    log::debug!("Registration rejected: {}", e.source);
                }
            }
            busy.set(false);
        });
    };

    let current = form.read().clone();

    rsx! {
        div { id: "register-page", class: "page auth-page",
            form { class: "auth-card", onsubmit: handle_submit,
                h1 { "Create account" }
                Field {
                    id: "register-username",
                    label: "Username",
                    required: true,
                    value: current.username,
                    oninput: move |v| form.write().username = v,
                }
                Field {
                    id: "register-email",
                    label: "Email",
                    kind: "email",
                    required: true,
                    value: current.email,
                    oninput: move |v| form.write().email = v,
                }
                div { class: "field-row",
                    Field {
                        id: "register-first-name",
                        label: "First name",
                        value: current.first_name,
                        oninput: move |v| form.write().first_name = v,
                    }
                    Field {
                        id: "register-last-name",
                        label: "Last name",
                        value: current.last_name,
                        oninput: move |v| form.write().last_name = v,
                    }
                }
                Field {
                    id: "register-phone",
                    label: "Phone number",
                    kind: "tel",
                    value: current.phone_number,
                    oninput: move |v| form.write().phone_number = v,
                }
                Field {
                    id: "register-upi",
                    label: "UPI ID",
                    value: current.upi_id,
                    oninput: move |v| form.write().upi_id = v,
                }
                Field {
                    id: "register-password",
                    label: "Password",
                    kind: "password",
                    required: true,
                    value: current.password,
                    oninput: move |v| form.write().password = v,
                }
                Field {
                    id: "register-password2",
                    label: "Confirm password",
                    kind: "password",
                    required: true,
                    value: current.password2,
                    oninput: move |v| form.write().password2 = v,
                }
                if let Some(message) = mismatch() {
                    p { class: "error-message", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "button primary",
                    disabled: busy(),
                    if busy() {
                        "Creating account..."
                    } else {
                        "Create account"
                    }
                }
                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
