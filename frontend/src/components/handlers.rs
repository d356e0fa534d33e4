use crate::api;
use crate::components::utils::partition_image_files;
use crate::pages::disease::{DiseasePage, Msg};
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ApiError, DiseaseHistoryEntry, DiseaseResponse, ModelVariant, ValidationError};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub const HISTORY_UNAVAILABLE: &str = "Recent predictions are unavailable right now.";

pub fn handle_file_selected(page: &mut DiseasePage, file: GlooFile) -> bool {
    let preview = ObjectUrl::from(file.clone());
    let name = file.name();
    let size = file.size();
    match page.workflow.select_file(file) {
        Ok(_) => {
            log::info!("Selected {} ({} bytes)", name, size);
            // the previous preview URL is revoked when it drops here
            page.preview_url = Some(preview);
            true
        }
        Err(e) => {
            log::warn!("Ignoring {} while analysis runs: {}", name, e);
            false
        }
    }
}

pub fn handle_files_rejected(page: &mut DiseasePage, names: Vec<String>) -> bool {
    page.workflow
        .reject(ValidationError::NotAnImage(names.join(", ")))
}

pub fn handle_drop(page: &mut DiseasePage, ctx: &Context<DiseasePage>, event: DragEvent) -> bool {
    event.prevent_default();
    page.is_dragging = false;
    if page.workflow.state().is_submitting() {
        return true;
    }

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(page: &DiseasePage, ctx: &Context<DiseasePage>, event: ClipboardEvent) -> bool {
    if page.workflow.state().is_submitting() {
        return false;
    }
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

/// Only one leaf is analyzed at a time; the first image in the list wins.
pub fn process_file_list(ctx: &Context<DiseasePage>, file_list: FileList) {
    let (images, rejected) = partition_image_files(&file_list);

    if let Some(first) = images.into_iter().next() {
        ctx.link().send_message(Msg::FileSelected(first));
    } else if !rejected.is_empty() {
        ctx.link().send_message(Msg::FilesRejected(rejected));
    }
}

pub fn handle_analyze(page: &mut DiseasePage, ctx: &Context<DiseasePage>) -> bool {
    match page.workflow.begin_submit() {
        Ok((file, variant)) => {
            send_prediction_request(ctx, file, variant);
            true
        }
        Err(ValidationError::RequestInFlight) => false,
        Err(e) => {
            log::warn!("Analysis blocked: {}", e);
            true
        }
    }
}

pub fn send_prediction_request(ctx: &Context<DiseasePage>, file: GlooFile, variant: ModelVariant) {
    spawn_local({
        let link = ctx.link().clone();
        let token = ctx.props().token.clone();

        async move {
            let outcome = api::predict_disease(&token, &file, variant).await;
            link.send_message(Msg::PredictionDone(outcome));
        }
    });
}

pub fn handle_prediction_done(
    page: &mut DiseasePage,
    ctx: &Context<DiseasePage>,
    outcome: Result<DiseaseResponse, ApiError>,
) -> bool {
    match &outcome {
        Ok(result) => log::info!(
            "Detected {} ({:.3})",
            result.disease,
            result.confidence
        ),
        Err(e) => {
            log::error!("Disease prediction failed: {}", e);
            if e.is_unauthorized() {
                ctx.props().on_unauthorized.emit(());
            }
        }
    }

    let succeeded = outcome.is_ok();
    page.workflow.finish(outcome);
    if succeeded {
        refresh_disease_history(page, ctx);
    }
    true
}

pub fn refresh_disease_history(page: &mut DiseasePage, ctx: &Context<DiseasePage>) {
    if page.history.begin().is_err() {
        return;
    }

    spawn_local({
        let link = ctx.link().clone();
        let token = ctx.props().token.clone();

        async move {
            let outcome = api::disease_history(&token).await;
            link.send_message(Msg::HistoryLoaded(outcome));
        }
    });
}

pub fn handle_disease_history(
    page: &mut DiseasePage,
    ctx: &Context<DiseasePage>,
    outcome: Result<Vec<DiseaseHistoryEntry>, ApiError>,
) -> bool {
    if let Err(e) = &outcome {
        log::warn!("Could not load disease history: {}", e);
        if e.is_unauthorized() {
            ctx.props().on_unauthorized.emit(());
        }
    }
    page.history
        .resolve(outcome.map_err(|_| HISTORY_UNAVAILABLE.to_string()))
}
