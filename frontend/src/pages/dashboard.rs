use crate::router::use_router;
use crate::session::use_session;
use shared::Route;
use yew::prelude::*;

struct Card {
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
    target: Option<Route>,
}

const CARDS: [Card; 3] = [
    Card {
        icon: "fa-solid fa-bug",
        title: "Disease Detection",
        blurb: "Upload leaf images to detect diseases with AI",
        target: Some(Route::Disease),
    },
    Card {
        icon: "fa-solid fa-tractor",
        title: "Yield Prediction",
        blurb: "Get yield forecasts based on soil and weather",
        target: Some(Route::Yield),
    },
    Card {
        icon: "fa-solid fa-flask",
        title: "Fertilizer Advice",
        blurb: "Get personalized fertilizer recommendations",
        target: None,
    },
];

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_session();
    let router = use_router();
    let name = session
        .session()
        .identity()
        .map(|identity| identity.greeting_name().to_string())
        .unwrap_or_else(|| "Farmer".to_string());

    html! {
        <div class="page dashboard">
            <h1 class="page-title">{ format!("Welcome, {}!", name) }</h1>
            <p class="subtitle">{"Your AI-powered tomato farming assistant"}</p>

            <div class="card-grid">
                { for CARDS.iter().map(|card| {
                    let onclick = card.target.map(|target| {
                        let navigate = router.navigate.clone();
                        Callback::from(move |_: MouseEvent| navigate.emit(target))
                    });
                    html! {
                        <div key={card.title}
                             class={classes!("feature-card", card.target.is_some().then_some("clickable"))}
                             {onclick}>
                            <i class={card.icon}></i>
                            <h2>{ card.title }</h2>
                            <p class="muted">{ card.blurb }</p>
                        </div>
                    }
                })}
            </div>

            <section class="panel quick-stats">
                <h3>{"Quick Stats"}</h3>
                <ul>
                    <li>{"3 ML models ready for predictions"}</li>
                    <li>{"Disease detection accuracy: ~92%"}</li>
                    <li>{"Yield forecasts with recommendations"}</li>
                </ul>
            </section>
        </div>
    }
}
