//! # Session Commands
//!
//! Navigation between storefront views.

use tracing::debug;

use crate::state::{SessionState, View};

pub fn current_view(session: &SessionState) -> View {
    session.current()
}

pub fn navigate(session: &SessionState, view: View) -> View {
    debug!(title = view.title(), "navigate command");
    session.navigate(view)
}

/// The header back button.
pub fn go_back(session: &SessionState) -> View {
    debug!("go_back command");
    session.back()
}
