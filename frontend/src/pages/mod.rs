pub mod auth;
pub mod dashboard;
pub mod disease;
pub mod login;
pub mod not_found;
pub mod signup;
pub mod yield_forecast;

use yew::prelude::*;

/// What every authenticated workflow page receives from the shell.
#[derive(Properties, PartialEq)]
pub struct WorkflowProps {
    pub token: String,
    pub on_unauthorized: Callback<()>,
}
