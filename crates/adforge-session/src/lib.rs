//! The campaign wizard session: screen state machine, ad selection and the
//! two webhook round trips that move it forward.

pub mod error;
pub mod generation;
pub mod session;
pub mod state;
pub mod validator;

pub use error::SessionError;
pub use generation::{build_generation_request, generated_content, DEFAULT_FEEDBACK};
pub use session::{Session, SessionConfig, NO_CONTENT_MESSAGE};
pub use state::{Screen, SessionState};
pub use validator::{filter_renderable, has_identity_and_format, is_renderable};
