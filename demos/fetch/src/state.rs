//! Application state and reducer

use async_actions::{AsyncAction, DefaultAsyncAction};
use serde::Serialize;

use crate::api::User;

/// Meta attached to every action of one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestMeta {
    pub user_id: u64,
}

pub type UserAction = DefaultAsyncAction<User, RequestMeta>;

#[derive(Debug, Default, Serialize)]
pub struct AppState {
    pub is_loading: bool,
    pub user: Option<User>,
    pub error: Option<String>,
    /// Action types in the order the reducer saw them
    pub history: Vec<String>,
}

pub fn reducer(state: &mut AppState, action: UserAction) {
    state.history.push(action.action_type().to_string());

    match action {
        AsyncAction::Start(_) => {
            state.is_loading = true;
            state.error = None;
        }
        AsyncAction::Success(action) => {
            state.is_loading = false;
            state.user = Some(action.into_payload());
        }
        AsyncAction::Failure(action) => {
            state.is_loading = false;
            state.error = Some(action.payload().to_string());
        }
    }
}
