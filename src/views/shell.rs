use crate::Route;
use crate::views::Toaster;
use dioxus::prelude::*;

/// Page frame shared by every route: the toast stack above the routed page.
#[component]
pub fn Shell() -> Element {
    let toaster = use_context::<Toaster>();

    rsx! {
        div { id: "toasts",
            for toast in toaster.toasts() {
                div {
                    key: "{toast.id}",
                    class: toast.notice.level.css_class(),
                    role: "status",
                    onclick: move |_| toaster.dismiss(toast.id),
                    "{toast.notice.message}"
                }
            }
        }
        Outlet::<Route> {}
    }
}
