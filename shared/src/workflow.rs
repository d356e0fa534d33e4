//! Form-to-request state for the four user workflows. The view layer owns
//! one of these per page and only issues a request when `begin_*` says so.

use crate::api::{AuthResponse, DiseaseResponse, ModelVariant, YieldRequest, YieldResponse};
use crate::error::{ApiError, ValidationError};
use crate::forms::{LoginForm, SignupForm, YieldField, YieldForm};
use crate::request::RequestState;
use std::fmt::Display;

pub const DISEASE_FALLBACK: &str = "Prediction failed";
pub const YIELD_FALLBACK: &str = "Prediction failed";
pub const LOGIN_FALLBACK: &str = "Login failed";
pub const SIGNUP_FALLBACK: &str = "Signup failed";
pub const SESSION_NOT_SAVED: &str = "Signed in, but the session could not be saved in this browser";

/// Leaf image selection plus the disease request. `F` is the platform's
/// file handle.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseWorkflow<F> {
    selected: Option<F>,
    variant: ModelVariant,
    state: RequestState<DiseaseResponse>,
}

impl<F> Default for DiseaseWorkflow<F> {
    fn default() -> Self {
        Self {
            selected: None,
            variant: ModelVariant::default(),
            state: RequestState::Idle,
        }
    }
}

impl<F: Clone> DiseaseWorkflow<F> {
    /// Replaces the selection and discards any previous result or error.
    /// Returns the file that was replaced. The selection is frozen while a
    /// request is in flight, so its outcome always belongs to the file shown.
    pub fn select_file(&mut self, file: F) -> Result<Option<F>, ValidationError> {
        if self.state.is_submitting() {
            return Err(ValidationError::RequestInFlight);
        }
        self.state.reset();
        Ok(self.selected.replace(file))
    }

    pub fn set_variant(&mut self, variant: ModelVariant) {
        self.variant = variant;
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn selected(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &RequestState<DiseaseResponse> {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.state.is_submitting()
    }

    /// Starts a submission. Without a selected file the inline validation
    /// message is set and nothing is returned to send.
    pub fn begin_submit(&mut self) -> Result<(F, ModelVariant), ValidationError> {
        if self.state.is_submitting() {
            return Err(ValidationError::RequestInFlight);
        }
        let Some(file) = self.selected.clone() else {
            let err = ValidationError::NoImageSelected;
            self.state.reject(err.to_string());
            return Err(err);
        };
        self.state.begin()?;
        Ok((file, self.variant))
    }

    pub fn finish(&mut self, outcome: Result<DiseaseResponse, ApiError>) -> bool {
        self.state
            .resolve(outcome.map_err(|e| e.user_message(DISEASE_FALLBACK)))
    }

    /// Shows a message (e.g. a rejected drop) without touching the selection.
    /// Ignored while a request is in flight.
    pub fn reject(&mut self, err: ValidationError) -> bool {
        if self.state.is_submitting() {
            return false;
        }
        self.state.reject(err.to_string());
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YieldWorkflow {
    form: YieldForm,
    state: RequestState<YieldResponse>,
}

impl YieldWorkflow {
    pub fn form(&self) -> &YieldForm {
        &self.form
    }

    pub fn state(&self) -> &RequestState<YieldResponse> {
        &self.state
    }

    pub fn edit(&mut self, field: YieldField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn begin_submit(&mut self) -> Result<YieldRequest, ValidationError> {
        if self.state.is_submitting() {
            return Err(ValidationError::RequestInFlight);
        }
        let request = self.form.to_request().inspect_err(|e| {
            self.state.reject(e.to_string());
        })?;
        self.state.begin()?;
        Ok(request)
    }

    pub fn finish(&mut self, outcome: Result<YieldResponse, ApiError>) -> bool {
        self.state
            .resolve(outcome.map_err(|e| e.user_message(YIELD_FALLBACK)))
    }
}

/// Which auth form a workflow drives.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthForm {
    Login(LoginForm),
    Signup(SignupForm),
}

/// Validated body ready to post.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Login(crate::api::LoginRequest),
    Signup(crate::api::SignupRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthWorkflow {
    form: AuthForm,
    state: RequestState<()>,
}

impl AuthWorkflow {
    pub fn login() -> Self {
        Self {
            form: AuthForm::Login(LoginForm::default()),
            state: RequestState::Idle,
        }
    }

    pub fn signup() -> Self {
        Self {
            form: AuthForm::Signup(SignupForm::default()),
            state: RequestState::Idle,
        }
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    pub fn state(&self) -> &RequestState<()> {
        &self.state
    }

    fn fallback(&self) -> &'static str {
        match self.form {
            AuthForm::Login(_) => LOGIN_FALLBACK,
            AuthForm::Signup(_) => SIGNUP_FALLBACK,
        }
    }

    pub fn begin_submit(&mut self) -> Result<AuthRequest, ValidationError> {
        if self.state.is_submitting() {
            return Err(ValidationError::RequestInFlight);
        }
        let request = match &self.form {
            AuthForm::Login(form) => form.to_request().map(AuthRequest::Login),
            AuthForm::Signup(form) => form.to_request().map(AuthRequest::Signup),
        }
        .inspect_err(|e| self.state.reject(e.to_string()))?;
        self.state.begin()?;
        Ok(request)
    }

    /// Records the outcome. A successful response is handed to `sign_in`,
    /// which stores the session; if that fails the form shows why and stays
    /// filled in, as it does for a server error. Returns true only when the
    /// user ended up signed in.
    pub fn finish<E: Display>(
        &mut self,
        outcome: Result<AuthResponse, ApiError>,
        sign_in: impl FnOnce(AuthResponse) -> Result<(), E>,
    ) -> bool {
        if !self.state.is_submitting() {
            return false;
        }
        let fallback = self.fallback();
        let result = outcome
            .map_err(|e| e.user_message(fallback))
            .and_then(|response| {
                sign_in(response).map_err(|e| {
                    log::error!("Could not store session: {}", e);
                    SESSION_NOT_SAVED.to_string()
                })
            });
        let signed_in = result.is_ok();
        self.state.resolve(result);
        signed_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserPayload;
    use crate::session::StorageError;

    fn early_blight() -> DiseaseResponse {
        DiseaseResponse {
            disease: "Early Blight".into(),
            confidence: 0.873,
            treatment_advice: "Apply chlorothalonil.".into(),
            all_predictions: Default::default(),
            model_used: None,
        }
    }

    #[test]
    fn test_disease_submit_without_file_sets_inline_error() {
        let mut workflow: DiseaseWorkflow<&str> = DiseaseWorkflow::default();
        assert!(!workflow.can_submit());

        for _ in 0..2 {
            assert_eq!(workflow.begin_submit(), Err(ValidationError::NoImageSelected));
            assert_eq!(workflow.state().error(), Some("Please select an image first"));
            assert!(!workflow.state().is_submitting());
        }
    }

    #[test]
    fn test_disease_happy_path() {
        let mut workflow = DiseaseWorkflow::default();
        assert_eq!(workflow.select_file("leaf.jpg"), Ok(None));
        workflow.set_variant(ModelVariant::Vit);
        assert!(workflow.can_submit());

        let (file, variant) = workflow.begin_submit().unwrap();
        assert_eq!((file, variant), ("leaf.jpg", ModelVariant::Vit));
        assert!(!workflow.can_submit());
        assert_eq!(workflow.begin_submit(), Err(ValidationError::RequestInFlight));

        assert!(workflow.finish(Ok(early_blight())));
        assert_eq!(workflow.state().value().unwrap().disease, "Early Blight");
    }

    #[test]
    fn test_new_selection_discards_result() {
        let mut workflow = DiseaseWorkflow::default();
        workflow.select_file("a.jpg").unwrap();
        workflow.begin_submit().unwrap();
        workflow.finish(Ok(early_blight()));

        assert_eq!(workflow.select_file("b.jpg"), Ok(Some("a.jpg")));
        assert_eq!(workflow.state(), &RequestState::Idle);
        assert_eq!(workflow.selected(), Some(&"b.jpg"));
    }

    #[test]
    fn test_selection_frozen_while_in_flight() {
        let mut workflow = DiseaseWorkflow::default();
        workflow.select_file("a.jpg").unwrap();
        workflow.begin_submit().unwrap();

        assert_eq!(workflow.select_file("b.jpg"), Err(ValidationError::RequestInFlight));
        assert_eq!(workflow.selected(), Some(&"a.jpg"));
        assert!(workflow.state().is_submitting());
        assert_eq!(workflow.begin_submit(), Err(ValidationError::RequestInFlight));

        // the response lands on the file that was sent
        assert!(workflow.finish(Ok(early_blight())));
        assert_eq!(workflow.selected(), Some(&"a.jpg"));
        assert_eq!(workflow.state().value().unwrap().disease, "Early Blight");

        assert_eq!(workflow.select_file("b.jpg"), Ok(Some("a.jpg")));
        assert_eq!(workflow.state(), &RequestState::Idle);
    }

    #[test]
    fn test_rejected_drop_while_in_flight_keeps_submitting() {
        let mut workflow = DiseaseWorkflow::default();
        workflow.select_file("a.jpg").unwrap();
        workflow.begin_submit().unwrap();

        assert!(!workflow.reject(ValidationError::NotAnImage("notes.pdf".into())));
        assert_eq!(workflow.state(), &RequestState::Submitting);
        assert!(workflow.finish(Ok(early_blight())));

        assert!(workflow.reject(ValidationError::NotAnImage("notes.pdf".into())));
        assert!(workflow.state().error().is_some());
        assert_eq!(workflow.selected(), Some(&"a.jpg"));
    }

    #[test]
    fn test_disease_failure_uses_detail_or_fallback() {
        let mut workflow = DiseaseWorkflow::default();
        workflow.select_file("a.jpg").unwrap();
        workflow.begin_submit().unwrap();
        workflow.finish(Err(ApiError::from_response(
            500,
            r#"{"detail":"Prediction failed: cannot identify image file"}"#,
        )));
        assert_eq!(
            workflow.state().error(),
            Some("Prediction failed: cannot identify image file")
        );

        workflow.begin_submit().unwrap();
        workflow.finish(Err(ApiError::Timeout(30_000)));
        assert_eq!(workflow.state().error(), Some(DISEASE_FALLBACK));
        // selection survives for a retry
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_yield_invalid_form_blocks_request() {
        let mut workflow = YieldWorkflow::default();
        workflow.edit(YieldField::Rainfall, "lots");
        assert_eq!(
            workflow.begin_submit(),
            Err(ValidationError::InvalidNumber("Rainfall (mm)"))
        );
        assert_eq!(workflow.state().error(), Some("Rainfall (mm) must be a number"));
        assert_eq!(workflow.form().get(YieldField::Rainfall), "lots");
    }

    #[test]
    fn test_yield_round() {
        let mut workflow = YieldWorkflow::default();
        workflow.edit(YieldField::Temperature, "33");
        let req = workflow.begin_submit().unwrap();
        assert_eq!(req.temperature, 33.0);
        assert_eq!(req.rainfall, 150.0);

        workflow.finish(Ok(YieldResponse {
            predicted_yield: 16.4,
            prediction_type: crate::api::PredictionType::Ml,
            recommendations: vec!["first".into(), "second".into()],
        }));
        let value = workflow.state().value().unwrap();
        assert_eq!(value.recommendations, vec!["first", "second"]);
    }

    #[test]
    fn test_login_failure_keeps_form_and_does_not_hand_back_response() {
        let mut workflow = AuthWorkflow::login();
        if let AuthForm::Login(form) = workflow.form_mut() {
            form.username = "alice".into();
            form.password = "wrong".into();
        }
        workflow.begin_submit().unwrap();
        let mut stored = false;
        let signed_in = workflow.finish(
            Err(ApiError::from_response(401, r#"{"detail":"Invalid credentials"}"#)),
            |_| {
                stored = true;
                Ok::<(), StorageError>(())
            },
        );
        assert!(!signed_in);
        assert!(!stored);
        assert_eq!(workflow.state().error(), Some("Invalid credentials"));
        assert_eq!(
            workflow.form(),
            &AuthForm::Login(LoginForm {
                username: "alice".into(),
                password: "wrong".into()
            })
        );
    }

    #[test]
    fn test_login_success_hands_back_response() {
        let mut workflow = AuthWorkflow::login();
        if let AuthForm::Login(form) = workflow.form_mut() {
            form.username = "alice".into();
            form.password = "pw".into();
        }
        assert!(matches!(workflow.begin_submit(), Ok(AuthRequest::Login(_))));
        let response = AuthResponse {
            access_token: "T".into(),
            token_type: Some("bearer".into()),
            user: UserPayload {
                sub: Some("alice".into()),
                ..Default::default()
            },
        };
        let mut stored = None;
        let signed_in = workflow.finish(Ok(response.clone()), |r| {
            stored = Some(r);
            Ok::<(), StorageError>(())
        });
        assert!(signed_in);
        assert_eq!(stored, Some(response));
        assert_eq!(workflow.state(), &RequestState::Succeeded(()));
    }

    #[test]
    fn test_login_storage_failure_stays_on_form() {
        let mut workflow = AuthWorkflow::login();
        if let AuthForm::Login(form) = workflow.form_mut() {
            form.username = "alice".into();
            form.password = "pw".into();
        }
        workflow.begin_submit().unwrap();
        let response = AuthResponse {
            access_token: "T".into(),
            token_type: None,
            user: UserPayload::default(),
        };
        let signed_in = workflow.finish(Ok(response), |_| {
            Err(StorageError("QuotaExceededError".into()))
        });
        assert!(!signed_in);
        assert_eq!(workflow.state().error(), Some(SESSION_NOT_SAVED));
        assert!(matches!(workflow.form(), AuthForm::Login(f) if f.username == "alice"));
        // the form can be retried
        assert!(workflow.begin_submit().is_ok());
    }

    #[test]
    fn test_signup_network_error_fallback() {
        let mut workflow = AuthWorkflow::signup();
        if let AuthForm::Signup(form) = workflow.form_mut() {
            form.username = "ravi".into();
            form.email = "ravi@farm.in".into();
            form.password = "pw".into();
        }
        workflow.begin_submit().unwrap();
        let signed_in = workflow.finish(Err(ApiError::Network("offline".into())), |_| {
            Ok::<(), StorageError>(())
        });
        assert!(!signed_in);
        assert_eq!(workflow.state().error(), Some(SIGNUP_FALLBACK));
    }

    #[test]
    fn test_missing_credentials_never_begin() {
        let mut workflow = AuthWorkflow::login();
        assert_eq!(
            workflow.begin_submit(),
            Err(ValidationError::MissingField("Username"))
        );
        assert!(!workflow.state().is_submitting());
    }
}
