use crate::pages::auth::{AuthKind, AuthPage};
use crate::pages::login::use_sign_in;
use crate::router::use_router;
use yew::prelude::*;

#[function_component(Signup)]
pub fn signup() -> Html {
    let on_success = use_sign_in();
    let router = use_router();

    html! {
        <AuthPage kind={AuthKind::Signup} {on_success} on_switch={router.navigate.clone()} />
    }
}
