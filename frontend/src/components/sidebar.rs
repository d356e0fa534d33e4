use crate::components::utils::viewport_width;
use crate::router::use_router;
use crate::session::{SessionAction, use_session};
use gloo_events::EventListener;
use shared::Route;
use shared::nav::{DRAWER_WIDTH_PX, MENU_ITEMS, NavState};
use std::rc::Rc;
use yew::prelude::*;

enum NavAction {
    Toggle,
    Close,
    AfterAction,
    Resized(f64),
}

#[derive(PartialEq)]
struct Nav(NavState);

impl Reducible for Nav {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            NavAction::Toggle => self.0.toggle(),
            NavAction::Close => self.0.close(),
            NavAction::AfterAction => self.0.after_action(),
            NavAction::Resized(width) => self.0.resized(width),
        };
        if next == self.0 { self } else { Rc::new(Nav(next)) }
    }
}

/// Side navigation. Permanent on desktop, an overlay drawer opened from the
/// top bar on narrow screens, and absent without a session.
#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let session = use_session();
    let router = use_router();
    let nav = use_reducer_eq(|| Nav(NavState::new(viewport_width())));

    {
        let nav = nav.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    nav.dispatch(NavAction::Resized(viewport_width()));
                })
            });
            move || drop(listener)
        });
    }

    let Some(identity) = session.session().identity().cloned() else {
        return html! {};
    };

    let toggle = {
        let nav = nav.clone();
        Callback::from(move |_: MouseEvent| nav.dispatch(NavAction::Toggle))
    };
    let close = {
        let nav = nav.clone();
        Callback::from(move |_: MouseEvent| nav.dispatch(NavAction::Close))
    };

    let select = {
        let nav = nav.clone();
        let navigate = router.navigate.clone();
        move |target: Route| {
            let nav = nav.clone();
            let navigate = navigate.clone();
            Callback::from(move |_: MouseEvent| {
                navigate.emit(target);
                nav.dispatch(NavAction::AfterAction);
            })
        }
    };

    let logout = {
        let nav = nav.clone();
        let session = session.clone();
        let navigate = router.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            session.dispatch(SessionAction::SignOut);
            navigate.emit(Route::Login);
            nav.dispatch(NavAction::AfterAction);
        })
    };

    let panel = html! {
        <aside class="sidebar" style={format!("width: {}px", DRAWER_WIDTH_PX)}>
            <div class="sidebar-header">
                <i class="fa-solid fa-seedling"></i>
                <h2 class="sidebar-title">{"Tomato AI"}</h2>
                if nav.0.is_mobile() {
                    <button class="icon-button" aria-label="Close menu" onclick={close.clone()}>
                        <i class="fa-solid fa-xmark"></i>
                    </button>
                }
            </div>
            <div class="sidebar-user">
                <span class="muted">{"Welcome,"}</span>
                <span class="user-name">{ identity.display_name() }</span>
            </div>
            <ul class="nav-list">
                { for MENU_ITEMS.iter().map(|item| html! {
                    <li key={item.route.path()}
                        class={classes!("nav-item", (router.route == item.route).then_some("active"))}>
                        <button class="nav-link" onclick={select(item.route)}>
                            <i class={item.icon}></i>{ format!(" {}", item.label) }
                        </button>
                    </li>
                })}
            </ul>
            <div class="sidebar-footer">
                <button class="logout-button" onclick={logout}>
                    <i class="fa-solid fa-right-from-bracket"></i>{" Logout"}
                </button>
            </div>
        </aside>
    };

    html! {
        <>
            if nav.0.is_mobile() {
                <header class="mobile-top-bar">
                    <button class="icon-button" aria-label="Open menu" onclick={toggle}>
                        <i class="fa-solid fa-bars"></i>
                    </button>
                    <span class="top-bar-title">{"Tomato AI"}</span>
                </header>
            }
            if nav.0.is_drawer_open() {
                <div class="drawer-backdrop" onclick={close}></div>
            }
            if nav.0.is_panel_visible() {
                { panel }
            }
        </>
    }
}
