use crate::router::use_router;
use shared::Route;
use yew::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let router = use_router();
    let go_home = {
        let navigate = router.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(Route::Root))
    };

    html! {
        <div class="page not-found">
            <h1>{"Page not found"}</h1>
            <p class="muted">{"The page you are looking for does not exist."}</p>
            <button class="analyze-btn" onclick={go_home}>
                <i class="fa-solid fa-house"></i>{" Back to start"}
            </button>
        </div>
    }
}
