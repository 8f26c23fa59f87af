use crate::Route;
use crate::views::AuthContext;
use dioxus::prelude::*;

#[component]
pub fn Login() -> Element {
    let auth = use_context::<AuthContext>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *busy.read() {
            return;
        }
        let auth = auth.clone();
        let (user, pass) = (username(), password());
        busy.set(true);
        spawn(async move {
            // Navigation and the toast are handled by the session.
            if auth.login(&user, &pass).await.is_err() {
                password.set(String::new());
            }
            busy.set(false);
        });
    };

    rsx! {
        div { id: "login-page", class: "page auth-page",
            form { class: "auth-card", onsubmit: handle_submit,
                h1 { "Sign in" }
                label { r#for: "login-username", "Username" }
                input {
                    r#type: "text",
                    id: "login-username",
                    required: true,
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |event| username.set(event.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    r#type: "password",
                    id: "login-password",
                    required: true,
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |event| password.set(event.value()),
                }
                button {
                    r#type: "submit",
                    class: "button primary",
                    disabled: busy(),
                    if busy() {
                        "Signing in..."
                    } else {
                        "Sign in"
                    }
                }
                p { class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
