use crate::api::UserPayload;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Local storage key holding the raw access token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Malformed,
    #[error("Token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Token expired")]
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

/// Persistent home of the access token (browser local storage in the app,
/// memory in tests).
pub trait TokenStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str) -> Result<(), StorageError>;
    fn remove(&self);
}

/// Claims carried in the payload segment of the access token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claims {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub exp: Option<u64>,
}

impl Claims {
    pub fn is_expired(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Decodes the claims segment of a `header.payload.signature` token. The
/// signature is not checked here; that is the API's job.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(TokenError::Malformed);
    }

    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decodes the claims and rejects tokens whose `exp` has passed.
pub fn validate_token(token: &str, now_secs: u64) -> Result<Claims, TokenError> {
    let claims = decode_claims(token)?;
    if claims.is_expired(now_secs) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

/// Who is signed in, as far as the client can tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            full_name: claims.name,
        }
    }
}

impl From<&UserPayload> for Identity {
    fn from(user: &UserPayload) -> Self {
        Self {
            subject: user.sub.clone().or_else(|| user.username.clone()),
            email: user.email.clone(),
            full_name: user.full_name.clone().or_else(|| user.name.clone()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Identity {
    /// Name for the navigation panel.
    pub fn display_name(&self) -> &str {
        non_empty(&self.full_name)
            .or_else(|| non_empty(&self.subject))
            .or_else(|| non_empty(&self.email))
            .unwrap_or("User")
    }

    /// Name for the dashboard greeting.
    pub fn greeting_name(&self) -> &str {
        non_empty(&self.subject).unwrap_or("Farmer")
    }
}

/// Token plus derived identity. Both are present or both are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    credentials: Option<(String, Identity)>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(token, _)| token.as_str())
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.credentials.as_ref().map(|(_, identity)| identity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Owns the session and keeps it in step with persistent storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: TokenStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::default(),
        }
    }

    /// Restores the session from storage. A token that does not decode, or
    /// has expired, is wiped and leaves the session empty.
    pub fn load(&mut self, now_secs: u64) -> &Session {
        self.session = match self.storage.read() {
            None => Session::default(),
            Some(token) => match validate_token(&token, now_secs) {
                Ok(claims) => Session {
                    credentials: Some((token, Identity::from(claims))),
                },
                Err(e) => {
                    log::warn!("Discarding stored token: {}", e);
                    self.storage.remove();
                    Session::default()
                }
            },
        };
        &self.session
    }

    /// Persists a freshly issued token. The identity comes from the token's
    /// own claims when they decode, so a later `load` rebuilds the same
    /// identity; otherwise the user object from the response is used.
    pub fn set(&mut self, token: &str, user: &UserPayload) -> Result<&Session, StorageError> {
        self.storage.write(token)?;
        let identity = decode_claims(token)
            .map(Identity::from)
            .unwrap_or_else(|_| Identity::from(user));
        self.session = Session {
            credentials: Some((token.to_string(), identity)),
        };
        Ok(&self.session)
    }

    pub fn clear(&mut self) {
        self.storage.remove();
        self.session = Session::default();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
