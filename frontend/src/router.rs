use gloo_history::{BrowserHistory, History};
use shared::Route;
use yew::prelude::*;

/// Current route plus the means to change it.
#[derive(Clone, PartialEq)]
pub struct RouterContext {
    pub route: Route,
    pub navigate: Callback<Route>,
    pub replace: Callback<Route>,
}

#[derive(Properties, PartialEq)]
pub struct RouterProps {
    #[prop_or_default]
    pub children: Html,
}

/// Tracks the browser location and exposes it as a [`Route`].
#[function_component(Router)]
pub fn router(props: &RouterProps) -> Html {
    let history = use_memo((), |_| BrowserHistory::new());
    let route = {
        let history = history.clone();
        use_state(move || Route::from_path(history.location().path()))
    };

    {
        let history = history.clone();
        let route = route.clone();
        use_effect_with((), move |_| {
            let listened = history.clone();
            let listener = history.listen(move || {
                let next = Route::from_path(listened.location().path());
                log::debug!("Location changed: {:?}", next);
                route.set(next);
            });
            move || drop(listener)
        });
    }

    let navigate = {
        let history = history.clone();
        Callback::from(move |target: Route| history.push(target.path()))
    };
    let replace = {
        let history = history.clone();
        Callback::from(move |target: Route| history.replace(target.path()))
    };

    let context = RouterContext {
        route: *route,
        navigate,
        replace,
    };

    html! {
        <ContextProvider<RouterContext> {context}>
            { props.children.clone() }
        </ContextProvider<RouterContext>>
    }
}

#[hook]
pub fn use_router() -> RouterContext {
    use_context::<RouterContext>().expect("use_router called outside <Router>")
}
