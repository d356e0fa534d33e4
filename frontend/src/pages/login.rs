use crate::pages::auth::{AuthKind, AuthPage};
use crate::router::use_router;
use crate::session::{SessionAction, use_session};
use shared::session::StorageError;
use shared::{AuthResponse, Route};
use yew::prelude::*;

/// Stores the session from a successful auth response and moves on to the
/// dashboard. A storage failure is handed back and nothing navigates.
#[hook]
pub fn use_sign_in() -> Callback<AuthResponse, Result<(), StorageError>> {
    let session = use_session();
    let router = use_router();

    Callback::from(move |response: AuthResponse| -> Result<(), StorageError> {
        let next = session.sign_in(&response.access_token, &response.user)?;
        session.dispatch(SessionAction::SignedIn(next));
        router.navigate.emit(Route::Dashboard);
        Ok(())
    })
}

#[function_component(Login)]
pub fn login() -> Html {
    let on_success = use_sign_in();
    let router = use_router();

    html! {
        <AuthPage kind={AuthKind::Login} {on_success} on_switch={router.navigate.clone()} />
    }
}
