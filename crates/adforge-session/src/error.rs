use thiserror::Error;

use crate::state::Screen;

/// An action was requested that the current screen does not allow.
///
/// Webhook failures never appear here; they are recorded on the session
/// state as a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition { action: &'static str, screen: Screen },

    #[error("no campaign has been submitted in this session")]
    MissingCampaign,
}
