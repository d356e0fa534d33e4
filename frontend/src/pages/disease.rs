use crate::components::handlers;
use crate::components::history::render_disease_history;
use crate::components::preview_area::render_preview_area;
use crate::components::results::render_disease_result;
use crate::components::upload_section::render_upload_section;
use crate::components::utils::render_error_message;
use crate::pages::WorkflowProps;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::workflow::DiseaseWorkflow;
use shared::{ApiError, DiseaseHistoryEntry, DiseaseResponse, ModelVariant, RequestState};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub enum Msg {
    // Image intake
    FileSelected(GlooFile),
    FilesRejected(Vec<String>),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
    SetDragging(bool),

    // Analysis
    SetVariant(ModelVariant),
    Analyze,
    PredictionDone(Result<DiseaseResponse, ApiError>),
    HistoryLoaded(Result<Vec<DiseaseHistoryEntry>, ApiError>),
}

pub struct DiseasePage {
    pub(crate) workflow: DiseaseWorkflow<GlooFile>,
    /// Object URL of the selected leaf; revoked when replaced or dropped.
    pub(crate) preview_url: Option<ObjectUrl>,
    pub(crate) is_dragging: bool,
    pub(crate) history: RequestState<Vec<DiseaseHistoryEntry>>,
    _paste_listener: Option<EventListener>,
}

impl Component for DiseasePage {
    type Message = Msg;
    type Properties = WorkflowProps;

    fn create(ctx: &Context<Self>) -> Self {
        let paste_listener = web_sys::window().map(|window| {
            let link = ctx.link().clone();
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        let mut page = Self {
            workflow: DiseaseWorkflow::default(),
            preview_url: None,
            is_dragging: false,
            history: RequestState::Idle,
            _paste_listener: paste_listener,
        };
        handlers::refresh_disease_history(&mut page, ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, file),
            Msg::FilesRejected(names) => handlers::handle_files_rejected(self, names),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::SetVariant(variant) => {
                self.workflow.set_variant(variant);
                true
            }
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::PredictionDone(outcome) => handlers::handle_prediction_done(self, ctx, outcome),
            Msg::HistoryLoaded(outcome) => handlers::handle_disease_history(self, ctx, outcome),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="page disease-page">
                <h1 class="page-title">{"Disease Detection"}</h1>
                <section class="panel">
                    { render_upload_section(self, ctx) }
                    { render_preview_area(self, ctx) }
                    { render_error_message(self.workflow.state().error()) }
                    { render_disease_result(self.workflow.state()) }
                </section>
                { render_disease_history(&self.history) }
            </div>
        }
    }
}
