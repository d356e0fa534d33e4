use crate::config::app_config;
use futures::future::{Either, select};
use gloo_console::error;
use gloo_file::File as GlooFile;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde_json::to_string_pretty;
use shared::api::{
    DISEASE_HISTORY_PATH, DISEASE_PREDICT_PATH, IMAGE_FIELD, LOGIN_PATH, SIGNUP_PATH,
    YIELD_HISTORY_PATH, YIELD_PREDICT_PATH,
};
use shared::{
    ApiError, AuthResponse, DiseaseHistoryEntry, DiseaseResponse, LoginRequest, ModelVariant,
    SignupRequest, YieldHistoryEntry, YieldRequest, YieldResponse,
};
use web_sys::{AbortController, FormData};

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{} returned {}: {}", response.url(), status, body);
        Err(ApiError::from_response(status, &body))
    }
}

/// Sends the request built by `finish`, aborting it if no response arrives
/// within the configured timeout.
async fn dispatch<T, F>(builder: RequestBuilder, finish: F) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    F: FnOnce(RequestBuilder) -> Result<Request, gloo_net::Error>,
{
    let timeout_ms = app_config().request_timeout_ms;
    let controller =
        AbortController::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let signal = controller.signal();
    let request = finish(builder.abort_signal(Some(&signal)))
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let send = Box::pin(request.send());
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));
    match select(send, timer).await {
        Either::Left((Ok(response), _)) => read_json(response).await,
        Either::Left((Err(e), _)) => {
            error!(format!("Fetch error: {:?}", e));
            Err(ApiError::Network(e.to_string()))
        }
        Either::Right(_) => {
            log::error!("Request timed out after {} ms", timeout_ms);
            controller.abort();
            Err(ApiError::Timeout(timeout_ms))
        }
    }
}

pub async fn login(body: &LoginRequest) -> Result<AuthResponse, ApiError> {
    log::info!("Logging in as {}", body.username);
    dispatch(Request::post(&app_config().url(LOGIN_PATH)), |b| b.json(body)).await
}

pub async fn signup(body: &SignupRequest) -> Result<AuthResponse, ApiError> {
    log::info!("Creating account {}", body.username);
    dispatch(Request::post(&app_config().url(SIGNUP_PATH)), |b| b.json(body)).await
}

pub async fn predict_disease(
    token: &str,
    file: &GlooFile,
    variant: ModelVariant,
) -> Result<DiseaseResponse, ApiError> {
    let form_data = FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    form_data
        .append_with_blob_and_filename(IMAGE_FIELD, file.as_ref(), &file.name())
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    log::info!(
        "Analyzing {} ({} bytes) with {}",
        file.name(),
        file.size(),
        variant
    );
    let builder = Request::post(&app_config().url(DISEASE_PREDICT_PATH))
        .query([("model_type", variant.as_ref())])
        .header("Authorization", &bearer(token));
    dispatch(builder, move |b| b.body(form_data)).await
}

pub async fn predict_yield(token: &str, body: &YieldRequest) -> Result<YieldResponse, ApiError> {
    log::info!("Requesting yield forecast for {} / {}", body.season, body.variety);
    log::debug!("{}", to_string_pretty(body).unwrap_or_default());
    let builder = Request::post(&app_config().url(YIELD_PREDICT_PATH))
        .header("Authorization", &bearer(token));
    dispatch(builder, |b| b.json(body)).await
}

pub async fn disease_history(token: &str) -> Result<Vec<DiseaseHistoryEntry>, ApiError> {
    history(token, DISEASE_HISTORY_PATH).await
}

pub async fn yield_history(token: &str) -> Result<Vec<YieldHistoryEntry>, ApiError> {
    history(token, YIELD_HISTORY_PATH).await
}

async fn history<T: DeserializeOwned>(token: &str, path: &str) -> Result<Vec<T>, ApiError> {
    let config = app_config();
    let limit = config.history_limit.to_string();
    let builder = Request::get(&config.url(path))
        .query([("limit", limit.as_str())])
        .header("Authorization", &bearer(token));
    dispatch(builder, RequestBuilder::build).await
}
