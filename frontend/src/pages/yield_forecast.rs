use crate::api;
use crate::components::history::render_yield_history;
use crate::components::results::render_yield_result;
use crate::components::utils::{input_value, render_error_message, render_spinner, select_value};
use crate::pages::WorkflowProps;
use shared::forms::YieldField;
use shared::workflow::YieldWorkflow;
use shared::{ApiError, RequestState, Season, ValidationError, Variety, YieldHistoryEntry, YieldResponse};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const HISTORY_UNAVAILABLE: &str = "Recent forecasts are unavailable right now.";

pub enum Msg {
    Edit(YieldField, String),
    Submit,
    PredictionDone(Result<YieldResponse, ApiError>),
    HistoryLoaded(Result<Vec<YieldHistoryEntry>, ApiError>),
}

pub struct YieldPage {
    workflow: YieldWorkflow,
    history: RequestState<Vec<YieldHistoryEntry>>,
}

impl YieldPage {
    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let request = match self.workflow.begin_submit() {
            Ok(request) => request,
            Err(ValidationError::RequestInFlight) => return false,
            Err(e) => {
                log::warn!("Forecast blocked: {}", e);
                return true;
            }
        };

        spawn_local({
            let link = ctx.link().clone();
            let token = ctx.props().token.clone();
            async move {
                let outcome = api::predict_yield(&token, &request).await;
                link.send_message(Msg::PredictionDone(outcome));
            }
        });
        true
    }

    fn refresh_history(&mut self, ctx: &Context<Self>) {
        if self.history.begin().is_err() {
            return;
        }

        spawn_local({
            let link = ctx.link().clone();
            let token = ctx.props().token.clone();
            async move {
                let outcome = api::yield_history(&token).await;
                link.send_message(Msg::HistoryLoaded(outcome));
            }
        });
    }

    fn render_field(&self, ctx: &Context<Self>, field: YieldField) -> Html {
        let value = self.workflow.form().get(field).to_string();
        let disabled = self.workflow.state().is_submitting();

        let control = if field.is_choice() {
            let options: Vec<&'static str> = match field {
                YieldField::Season => Season::iter().map(Into::into).collect(),
                _ => Variety::iter().map(Into::into).collect(),
            };
            let onchange = ctx
                .link()
                .callback(move |e: Event| Msg::Edit(field, select_value(&e)));
            html! {
                <select name={field.as_ref().to_string()} {disabled} {onchange}>
                    { for options.into_iter().map(|option| html! {
                        <option key={option} value={option} selected={option == value}>{ option }</option>
                    })}
                </select>
            }
        } else {
            let oninput = ctx
                .link()
                .callback(move |e: InputEvent| Msg::Edit(field, input_value(&e)));
            html! {
                <input type="number"
                       name={field.as_ref().to_string()}
                       step={field.step()}
                       {value}
                       {disabled}
                       {oninput} />
            }
        };

        html! {
            <label class="form-field" key={field.as_ref()}>
                <span>{ field.label() }</span>
                { control }
            </label>
        }
    }
}

impl Component for YieldPage {
    type Message = Msg;
    type Properties = WorkflowProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            workflow: YieldWorkflow::default(),
            history: RequestState::Idle,
        };
        page.refresh_history(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(field, value) => {
                self.workflow.edit(field, value);
                true
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::PredictionDone(outcome) => {
                match &outcome {
                    Ok(result) => log::info!(
                        "Forecast {:.2} t/ha from {} model",
                        result.predicted_yield,
                        result.prediction_type.label()
                    ),
                    Err(e) => {
                        log::error!("Yield prediction failed: {}", e);
                        if e.is_unauthorized() {
                            ctx.props().on_unauthorized.emit(());
                        }
                    }
                }
                let succeeded = outcome.is_ok();
                self.workflow.finish(outcome);
                if succeeded {
                    self.refresh_history(ctx);
                }
                true
            }
            Msg::HistoryLoaded(outcome) => {
                if let Err(e) = &outcome {
                    log::warn!("Could not load yield history: {}", e);
                    if e.is_unauthorized() {
                        ctx.props().on_unauthorized.emit(());
                    }
                }
                self.history
                    .resolve(outcome.map_err(|_| HISTORY_UNAVAILABLE.to_string()))
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let submitting = self.workflow.state().is_submitting();
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class="page yield-page">
                <h1 class="page-title">{"Yield Prediction"}</h1>
                <section class="panel">
                    <form class="yield-form" {onsubmit}>
                        <div class="form-grid">
                            { for YieldField::iter().map(|field| self.render_field(ctx, field)) }
                        </div>
                        <button type="submit" class="analyze-btn primary" disabled={submitting}>
                            if submitting {
                                { render_spinner("Predicting...") }
                            } else {
                                <i class="fa-solid fa-chart-line"></i>{" Predict Yield"}
                            }
                        </button>
                    </form>
                    { render_error_message(self.workflow.state().error()) }
                    { render_yield_result(self.workflow.state()) }
                </section>
                { render_yield_history(&self.history) }
            </div>
        }
    }
}
