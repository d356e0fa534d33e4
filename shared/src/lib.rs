//! Browser-independent core of the Tomato AI Guidance client: wire types,
//! session handling, route access rules and workflow state.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod nav;
pub mod request;
pub mod routes;
pub mod session;
pub mod workflow;

pub use api::{
    AuthResponse, DiseaseHistoryEntry, DiseaseResponse, LoginRequest, ModelVariant,
    PredictionType, Season, SignupRequest, UserPayload, Variety, YieldHistoryEntry,
    YieldRequest, YieldResponse,
};
pub use error::{ApiError, ValidationError};
pub use request::RequestState;
pub use routes::{Access, Route, authorize};
pub use session::{Identity, Session, SessionStore, TokenStore};
