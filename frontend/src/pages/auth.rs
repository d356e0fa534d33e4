use crate::api;
use crate::components::utils::{input_value, render_error_message, render_spinner};
use shared::workflow::{AuthForm, AuthRequest, AuthWorkflow};
use shared::session::StorageError;
use shared::{ApiError, AuthResponse, Route, ValidationError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthKind {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthField {
    Username,
    Email,
    FullName,
    Phone,
    Password,
}

impl AuthField {
    fn input_type(self) -> &'static str {
        match self {
            AuthField::Email => "email",
            AuthField::Phone => "tel",
            AuthField::Password => "password",
            _ => "text",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AuthField::Username => "Username",
            AuthField::Email => "Email",
            AuthField::FullName => "Full Name",
            AuthField::Phone => "Phone",
            AuthField::Password => "Password",
        }
    }

    fn is_required(self) -> bool {
        !matches!(self, AuthField::FullName | AuthField::Phone)
    }

    fn read(self, form: &AuthForm) -> &str {
        match (form, self) {
            (AuthForm::Login(f), AuthField::Username) => &f.username,
            (AuthForm::Login(f), AuthField::Password) => &f.password,
            (AuthForm::Signup(f), AuthField::Username) => &f.username,
            (AuthForm::Signup(f), AuthField::Email) => &f.email,
            (AuthForm::Signup(f), AuthField::FullName) => &f.full_name,
            (AuthForm::Signup(f), AuthField::Phone) => &f.phone,
            (AuthForm::Signup(f), AuthField::Password) => &f.password,
            _ => "",
        }
    }

    fn slot(self, form: &mut AuthForm) -> Option<&mut String> {
        match (form, self) {
            (AuthForm::Login(f), AuthField::Username) => Some(&mut f.username),
            (AuthForm::Login(f), AuthField::Password) => Some(&mut f.password),
            (AuthForm::Signup(f), AuthField::Username) => Some(&mut f.username),
            (AuthForm::Signup(f), AuthField::Email) => Some(&mut f.email),
            (AuthForm::Signup(f), AuthField::FullName) => Some(&mut f.full_name),
            (AuthForm::Signup(f), AuthField::Phone) => Some(&mut f.phone),
            (AuthForm::Signup(f), AuthField::Password) => Some(&mut f.password),
            _ => None,
        }
    }
}

impl AuthKind {
    fn fields(self) -> &'static [AuthField] {
        match self {
            AuthKind::Login => &[AuthField::Username, AuthField::Password],
            AuthKind::Signup => &[
                AuthField::Username,
                AuthField::Email,
                AuthField::FullName,
                AuthField::Phone,
                AuthField::Password,
            ],
        }
    }
}

pub enum Msg {
    Edit(AuthField, String),
    Submit,
    Done(Result<AuthResponse, ApiError>),
}

#[derive(Properties, PartialEq)]
pub struct AuthProps {
    pub kind: AuthKind,
    /// Stores the session from a successful submit.
    pub on_success: Callback<AuthResponse, Result<(), StorageError>>,
    pub on_switch: Callback<Route>,
}

/// Login and signup forms share one workflow; only the fields differ.
pub struct AuthPage {
    workflow: AuthWorkflow,
}

impl AuthPage {
    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let request = match self.workflow.begin_submit() {
            Ok(request) => request,
            Err(ValidationError::RequestInFlight) => return false,
            Err(e) => {
                log::warn!("Form rejected: {}", e);
                return true;
            }
        };

        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = match request {
                AuthRequest::Login(body) => api::login(&body).await,
                AuthRequest::Signup(body) => api::signup(&body).await,
            };
            link.send_message(Msg::Done(outcome));
        });
        true
    }
}

impl Component for AuthPage {
    type Message = Msg;
    type Properties = AuthProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            workflow: match ctx.props().kind {
                AuthKind::Login => AuthWorkflow::login(),
                AuthKind::Signup => AuthWorkflow::signup(),
            },
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(field, value) => {
                match field.slot(self.workflow.form_mut()) {
                    Some(slot) => {
                        *slot = value;
                        true
                    }
                    None => false,
                }
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::Done(outcome) => {
                if let Err(e) = &outcome {
                    log::error!("Authentication failed: {}", e);
                }
                let on_success = ctx.props().on_success.clone();
                self.workflow
                    .finish(outcome, move |response| on_success.emit(response));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let kind = ctx.props().kind;
        let submitting = self.workflow.state().is_submitting();
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        let (title, action, busy, prompt, other, other_label) = match kind {
            AuthKind::Login => (
                "Sign In",
                "Login",
                "Signing in...",
                "Don't have an account?",
                Route::Signup,
                "Sign up",
            ),
            AuthKind::Signup => (
                "Create Account",
                "Sign Up",
                "Creating account...",
                "Already have an account?",
                Route::Login,
                "Log in",
            ),
        };

        let switch = {
            let on_switch = ctx.props().on_switch.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                on_switch.emit(other);
            })
        };

        html! {
            <div class="auth-page">
                <form class="panel auth-card" {onsubmit}>
                    <div class="auth-brand">
                        <i class="fa-solid fa-seedling"></i>
                        <h1>{"Tomato AI Guidance"}</h1>
                    </div>
                    <h2>{ title }</h2>
                    { render_error_message(self.workflow.state().error()) }
                    { for kind.fields().iter().map(|&field| {
                        let oninput = ctx.link().callback(move |e: InputEvent| {
                            Msg::Edit(field, input_value(&e))
                        });
                        html! {
                            <label class="form-field" key={field.label()}>
                                <span>{ field.label() }</span>
                                <input
                                    type={field.input_type()}
                                    value={field.read(self.workflow.form()).to_string()}
                                    required={field.is_required()}
                                    disabled={submitting}
                                    {oninput}
                                />
                            </label>
                        }
                    })}
                    <button type="submit" class="analyze-btn primary" disabled={submitting}>
                        if submitting {
                            { render_spinner(busy) }
                        } else {
                            { action }
                        }
                    </button>
                    <p class="auth-switch">
                        { format!("{} ", prompt) }
                        <a href={other.path()} onclick={switch}>{ other_label }</a>
                    </p>
                </form>
            </div>
        }
    }
}
