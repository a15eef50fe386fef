//! Core types for async-actions
//!
//! Typed, serializable action records and the creators that build them,
//! following the Redux "flux standard action" shape: every action carries an
//! `id`, a [`ActionStatus`], a payload and a meta value, plus a derived
//! `type` string (`"{id}/{status}"`) and `error` flag.
//!
//! # Core Concepts
//!
//! - **Action**: an immutable record produced by a creator
//! - **ActionCreator**: builds actions for one `id` and `status`
//! - **AsyncActionCreator**: a start/success/failure triple sharing one `id`
//! - **TryCatchDispatch**: runs an async handler, dispatching the triple
//!   around it
//!
//! # Basic Example
//!
//! ```
//! use async_actions_core::{action_creator, is_action, ActionCreator, ActionStatus};
//!
//! let rename: ActionCreator<String> = action_creator("todos/rename");
//! let action = rename.create("groceries".to_string());
//!
//! assert_eq!(action.action_type(), "todos/rename/SUCCESS");
//! assert_eq!(action.status(), ActionStatus::Success);
//! assert!(!action.is_error());
//! assert!(is_action(&action, &rename));
//! ```
//!
//! # Async Handler Pattern
//!
//! Long-running work is bracketed by a `START` action before it begins and
//! exactly one `SUCCESS` or `FAILURE` action once it settles:
//!
//! ```ignore
//! let load = DefaultAsyncActionCreator::<Vec<Todo>>::namespaced("todos", "load");
//! let runner = try_catch_dispatch(move |action| store.lock().unwrap().reduce(action));
//!
//! // dispatches todos/load/START, then todos/load/SUCCESS or todos/load/FAILURE
//! let todos = runner.run(&load, || api.load_todos()).await?;
//! ```

pub mod action;
pub mod async_action;
pub mod creator;
pub mod default;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod logger;
pub mod testing;

// Action records
pub use action::{
    Action, ActionId, ActionStatus, ActionSummary, ActionType, AnyAction, DEFAULT_ACTION_STATUS,
};

// Creators
pub use async_action::{
    async_action_creator, async_action_creator_with_meta, is_async_action, AsyncAction,
    AsyncActionCreator, AsyncActionCreatorWithMeta, AsyncActionFamily,
};
pub use creator::{action_creator, is_action, ActionCreator};
pub use default::{
    default_async_action_creator, default_async_action_creator_with, resolve_action_id,
    DefaultAsyncAction, DefaultAsyncActionCreator, DefaultAsyncActionCreatorWithMeta,
};
pub use ids::{IdGenerator, SequentialIds};

// Dispatch
pub use dispatch::{try_catch_dispatch, Dispatch, ErasingDispatch, TryCatchDispatch};
pub use logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig, LoggingDispatcher,
};

// Errors
pub use error::{ActionError, NarrowError, ParseActionTypeError, ParseStatusError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        action_creator, async_action_creator, async_action_creator_with_meta,
        default_async_action_creator, is_action, is_async_action, try_catch_dispatch, Action,
        ActionCreator, ActionError, ActionId, ActionStatus, ActionSummary, AnyAction, AsyncAction,
        AsyncActionCreator, AsyncActionCreatorWithMeta, AsyncActionFamily, DefaultAsyncAction,
        DefaultAsyncActionCreator, DefaultAsyncActionCreatorWithMeta, Dispatch, ErasingDispatch,
        TryCatchDispatch,
    };
    pub use crate::{ActionLoggerConfig, LoggingDispatcher};
}
