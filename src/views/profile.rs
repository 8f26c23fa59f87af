use crate::Route;
use crate::forms::ProfileForm;
use crate::models::User;
use crate::notice::Notice;
use crate::services::Services;
use crate::views::{Field, Spinner, Toaster, use_require_auth};
use dioxus::prelude::*;

#[component]
fn ProfileEditor(user: User) -> Element {
    let auth = use_require_auth();
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let original = user.clone();
    let mut form = use_signal(|| ProfileForm::from_user(&user));
    let mut busy = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *busy.read() {
            return;
        }
        let update = form.read().changes(&original);
        let services = services.clone();
        let auth = auth.clone();
        busy.set(true);
        spawn(async move {
            match services.auth.update_profile(&update).await {
                Ok(_) => {
                    toaster.push(Notice::success("Profile updated"));
                    auth.refresh_user().await;
                }
                Err(e) => {
                    log::error!("Profile update failed: {}", e);
                    let message = e
                        .first_field_message(&["email", "upi_id", "phone_number"])
                        .or(e.detail())
                        .unwrap_or("Failed to update profile");
                    toaster.push(Notice::error(message));
                }
            }
            busy.set(false);
        });
    };

    let current = form.read().clone();

    rsx! {
        form { class: "profile-form", onsubmit: handle_submit,
            Field {
                id: "profile-email",
                label: "Email",
                kind: "email",
                required: true,
                value: current.email,
                oninput: move |v| form.write().email = v,
            }
            div { class: "field-row",
                Field {
                    id: "profile-first-name",
                    label: "First name",
                    value: current.first_name,
                    oninput: move |v| form.write().first_name = v,
                }
                Field {
                    id: "profile-last-name",
                    label: "Last name",
                    value: current.last_name,
                    oninput: move |v| form.write().last_name = v,
                }
            }
            Field {
                id: "profile-phone",
                label: "Phone number",
                kind: "tel",
                value: current.phone_number,
                oninput: move |v| form.write().phone_number = v,
            }
            Field {
                id: "profile-upi",
                label: "UPI ID",
                value: current.upi_id,
                oninput: move |v| form.write().upi_id = v,
            }
            button {
                r#type: "submit",
                class: "button primary",
                disabled: busy(),
                if busy() {
                    "Saving..."
                } else {
                    "Save changes"
                }
            }
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let auth = use_require_auth();

    let Some(user) = auth.user() else {
        return rsx! {
            Spinner {}
        };
    };

    rsx! {
        div { id: "profile-page", class: "page",
            header { class: "page-header",
                Link { to: Route::Dashboard {}, "← Dashboard" }
                h1 { "Profile" }
            }
            section { class: "identity",
                p {
                    strong { "Username: " }
                    "{user.username}"
                }
                p {
                    strong { "Name: " }
                    {user.display_name()}
                }
            }
            ProfileEditor { key: "{user.id}", user: user.clone() }
        }
    }
}
