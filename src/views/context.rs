//! Shared UI state handed down through Dioxus contexts: the auth session and
//! the toast stack.

use crate::Route;
use crate::forms::RegisterForm;
use crate::models::User;
use crate::notice::{Notice, Toast, ToastQueue};
use crate::session::{
    Destination, RegistrationError, Session, SessionError, SessionState, Transition,
};
use dioxus::prelude::*;
use std::time::Duration;

/// Notice stack shared by every page. Each toast expires on its own after
/// [`NoticeLevel::lifetime`](crate::notice::NoticeLevel::lifetime).
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            queue: Signal::new(ToastQueue::default()),
        }
    }

    pub fn push(&self, notice: Notice) {
        let lifetime = notice.level.lifetime();
        let mut queue = self.queue;
        let id = queue.write().push(notice);

        let toaster = *self;
        // Root scope: the page that raised the notice may be gone by then.
        spawn_forever(async move {
            sleep(lifetime).await;
            toaster.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.read().toasts().to_vec()
    }
}

#[cfg(feature = "web")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(all(feature = "desktop", not(feature = "web")))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Without a platform there is no timer; toasts wait for a click.
#[cfg(not(any(feature = "web", feature = "desktop")))]
async fn sleep(_duration: Duration) {
    std::future::pending::<()>().await;
}

fn route_for(destination: Destination) -> Route {
    match destination {
        Destination::Dashboard => Route::Dashboard {},
        Destination::Login => Route::Login {},
    }
}

/// Owner of the session state. Only this type writes the `state` signal.
#[derive(Clone)]
pub struct AuthContext {
    pub state: Signal<SessionState>,
    session: Session,
    toaster: Toaster,
}

impl AuthContext {
    pub fn new(session: Session, toaster: Toaster) -> Self {
        Self {
            state: Signal::new(SessionState::Unknown),
            session,
            toaster,
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    /// True until the stored credentials have been checked.
    pub fn loading(&self) -> bool {
        !self.state.read().is_resolved()
    }

    pub async fn bootstrap(&self) {
        let resolved = self.session.bootstrap().await;
        let mut state = self.state;
        state.set(resolved);
    }

    fn apply(&self, transition: Transition) {
        let mut state = self.state;
        state.set(transition.state);
        if let Some(notice) = transition.notice {
            self.toaster.push(notice);
        }
        if let Some(destination) = transition.redirect {
            navigator().push(route_for(destination));
        }
    }

    fn surface(&self, result: Result<Transition, SessionError>) -> Result<(), SessionError> {
        match result {
            Ok(transition) => {
                self.apply(transition);
                Ok(())
            }
            Err(e) => {
                self.toaster.push(e.notice.clone());
                Err(e)
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let result = self.session.login(username, password).await;
        self.surface(result)
    }

    /// Form errors are handed back without a toast; the page shows them inline.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), RegistrationError> {
        match self.session.register_form(form).await {
            Ok(transition) => {
                self.apply(transition);
                Ok(())
            }
            Err(RegistrationError::Session(e)) => {
                self.toaster.push(e.notice.clone());
                Err(e.into())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn logout(&self) {
        let transition = self.session.logout().await;
        self.apply(transition);
    }

    pub async fn refresh_user(&self) {
        let current = self.state.peek().clone();
        let refreshed = self.session.refresh_user(&current).await;
        let mut state = self.state;
        state.set(refreshed);
    }
}

/// Sends anonymous visitors to the login page once the session is resolved.
pub fn use_require_auth() -> AuthContext {
    let auth = use_context::<AuthContext>();
    let state = auth.state;
    use_effect(move || {
        if *state.read() == SessionState::Anonymous {
            navigator().push(Route::Login {});
        }
    });
    auth
}

/// True once the session is authenticated. Data resources wait on this so
/// nothing is requested while the session is unknown or anonymous.
pub fn use_signed_in(auth: &AuthContext) -> Memo<bool> {
    let state = auth.state;
    use_memo(move || state.read().is_authenticated())
}
