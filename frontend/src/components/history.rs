use crate::components::utils::render_spinner;
use shared::format::{confidence_percent, disease_label, short_date, yield_amount};
use shared::{DiseaseHistoryEntry, RequestState, YieldHistoryEntry};
use yew::prelude::*;

fn render_history_shell(title: &str, body: Html) -> Html {
    html! {
        <section class="panel history-panel">
            <h2><i class="fa-solid fa-clock-rotate-left"></i>{ format!(" {}", title) }</h2>
            { body }
        </section>
    }
}

fn render_pending_or_notice<T>(state: &RequestState<Vec<T>>) -> Option<Html> {
    match state {
        RequestState::Idle => Some(html! {}),
        RequestState::Submitting => Some(html! { <p class="muted">{ render_spinner("Loading...") }</p> }),
        RequestState::Failed(notice) => Some(html! { <p class="muted">{ notice }</p> }),
        RequestState::Succeeded(entries) if entries.is_empty() => {
            Some(html! { <p class="muted">{"No predictions yet."}</p> })
        }
        RequestState::Succeeded(_) => None,
    }
}

pub fn render_disease_history(state: &RequestState<Vec<DiseaseHistoryEntry>>) -> Html {
    let body = render_pending_or_notice(state).unwrap_or_else(|| {
        let entries = state.value().map(Vec::as_slice).unwrap_or_default();
        html! {
            <table class="history-table">
                <thead>
                    <tr><th>{"Date"}</th><th>{"Disease"}</th><th>{"Confidence"}</th><th>{"Model"}</th></tr>
                </thead>
                <tbody>
                    { for entries.iter().map(|entry| html! {
                        <tr key={entry.id}>
                            <td>{ short_date(&entry.date) }</td>
                            <td>{ disease_label(&entry.disease) }</td>
                            <td>{ confidence_percent(entry.confidence) }</td>
                            <td>{ &entry.model_type }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        }
    });

    render_history_shell("Recent Detections", body)
}

pub fn render_yield_history(state: &RequestState<Vec<YieldHistoryEntry>>) -> Html {
    let body = render_pending_or_notice(state).unwrap_or_else(|| {
        let entries = state.value().map(Vec::as_slice).unwrap_or_default();
        html! {
            <table class="history-table">
                <thead>
                    <tr><th>{"Date"}</th><th>{"Season"}</th><th>{"Yield"}</th><th>{"Model"}</th></tr>
                </thead>
                <tbody>
                    { for entries.iter().map(|entry| html! {
                        <tr key={entry.id}>
                            <td>{ short_date(&entry.date) }</td>
                            <td>{ &entry.season }</td>
                            <td>{ yield_amount(entry.predicted_yield) }</td>
                            <td>{ entry.prediction_type.label() }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        }
    });

    render_history_shell("Recent Forecasts", body)
}
