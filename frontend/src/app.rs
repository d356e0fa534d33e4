use crate::components::sidebar::Sidebar;
use crate::pages::dashboard::Dashboard;
use crate::pages::disease::DiseasePage;
use crate::pages::login::Login;
use crate::pages::not_found::NotFound;
use crate::pages::signup::Signup;
use crate::pages::yield_forecast::YieldPage;
use crate::router::{Router, use_router};
use crate::session::{AppSession, SessionAction, SessionContext, use_session};
use shared::{Access, Route, authorize};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(AppSession::restore);

    html! {
        <ContextProvider<SessionContext> context={session}>
            <Router>
                <Shell />
            </Router>
        </ContextProvider<SessionContext>>
    }
}

/// Applies the access rules to the current route, then lays out the side
/// panel next to the page.
#[function_component(Shell)]
fn shell() -> Html {
    let session = use_session();
    let router = use_router();
    let access = authorize(router.route, session.session().is_authenticated());

    {
        let replace = router.replace.clone();
        use_effect_with(access, move |access| {
            if let Access::Redirect(target) = *access {
                log::info!("Redirecting to {}", target.path());
                replace.emit(target);
            }
        });
    }

    let route = match access {
        Access::Render(route) => route,
        Access::Redirect(_) => return html! {},
    };

    let page = match (route, session.token()) {
        (Route::Login, _) => html! { <Login /> },
        (Route::Signup, _) => html! { <Signup /> },
        (Route::NotFound, _) => html! { <NotFound /> },
        (Route::Dashboard, Some(_)) => html! { <Dashboard /> },
        (Route::Disease, Some(token)) => {
            html! { <DiseasePage {token} on_unauthorized={sign_out(&session)} /> }
        }
        (Route::Yield, Some(token)) => {
            html! { <YieldPage {token} on_unauthorized={sign_out(&session)} /> }
        }
        // authorize never renders these without a session
        (Route::Root | Route::Dashboard | Route::Disease | Route::Yield, _) => html! {},
    };

    html! {
        <div class={classes!("app-shell", session.session().is_authenticated().then_some("with-sidebar"))}>
            <Sidebar />
            <main class="app-main">{ page }</main>
        </div>
    }
}

fn sign_out(session: &SessionContext) -> Callback<()> {
    let session = session.clone();
    Callback::from(move |_| {
        log::warn!("Session rejected by the server");
        session.dispatch(SessionAction::SignOut);
    })
}
