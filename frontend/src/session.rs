use gloo_storage::{LocalStorage, Storage};
use shared::api::UserPayload;
use shared::session::{StorageError, TOKEN_KEY};
use shared::{Session, SessionStore, TokenStore};
use std::rc::Rc;
use yew::prelude::*;

/// Browser local storage. The token is kept as the raw string (not JSON
/// encoded) so it stays readable by anything else sharing the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStorage;

impl TokenStore for BrowserStorage {
    fn read(&self) -> Option<String> {
        LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten()
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }

    fn remove(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

pub fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

/// The app's one session store, shared through [`SessionContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppSession(SessionStore<BrowserStorage>);

impl AppSession {
    pub fn restore() -> Self {
        let mut store = SessionStore::new(BrowserStorage);
        let session = store.load(now_secs());
        match session.identity() {
            Some(identity) => log::info!("Restored session for {}", identity.display_name()),
            None => log::info!("No stored session"),
        }
        Self(store)
    }

    pub fn session(&self) -> &Session {
        self.0.session()
    }

    pub fn token(&self) -> Option<String> {
        self.session().token().map(str::to_string)
    }

    /// Persists a freshly issued token. Nothing changes if storage refuses it.
    pub fn sign_in(&self, token: &str, user: &UserPayload) -> Result<Self, StorageError> {
        log::info!("Signing in (token length: {})", token.len());
        let mut store = self.0.clone();
        store.set(token, user)?;
        Ok(Self(store))
    }
}

pub enum SessionAction {
    /// A session already persisted by [`AppSession::sign_in`].
    SignedIn(AppSession),
    SignOut,
}

impl Reducible for AppSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::SignedIn(next) => Rc::new(next),
            SessionAction::SignOut => {
                log::info!("Signing out");
                let mut store = self.0.clone();
                store.clear();
                Rc::new(Self(store))
            }
        }
    }
}

pub type SessionContext = UseReducerHandle<AppSession>;

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("use_session called outside the session provider")
}
