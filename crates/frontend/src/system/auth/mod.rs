pub mod api;
pub mod context;
pub mod guard;
pub mod state;
pub mod storage;

pub use context::{use_auth, use_auth_store, AuthService, AuthStore};
pub use state::AuthState;
