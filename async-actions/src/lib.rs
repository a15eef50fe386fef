//! async-actions: typed action creators for async workflows
//!
//! Every async operation gets a start/success/failure triple of creators
//! that share one id. [`try_catch_dispatch`] brackets a handler with those
//! actions so reducers always see `START` first and exactly one outcome.
//!
//! # Example
//! ```
//! use async_actions::prelude::*;
//!
//! let fetch = DefaultAsyncActionCreator::<u64, &str>::namespaced("users", "fetch")
//!     .with_meta("profile-page");
//!
//! let start = fetch.start.create_empty();
//! assert_eq!(start.action_type(), "users/fetch/START");
//! assert_eq!(*start.meta(), "profile-page");
//!
//! let failed = fetch.failure.create(ActionError::msg("timeout"));
//! assert!(failed.is_error());
//! assert!(is_async_action(&failed, &fetch));
//! ```

// Re-export everything from core
pub use async_actions_core::*;

/// Prelude for convenient imports
pub mod prelude {
    // Records and creators
    pub use async_actions_core::{
        action_creator, async_action_creator, async_action_creator_with_meta,
        default_async_action_creator, is_action, is_async_action, Action, ActionCreator, ActionId,
        ActionStatus, ActionSummary, AnyAction, AsyncAction, AsyncActionCreator,
        AsyncActionCreatorWithMeta, AsyncActionFamily, DefaultAsyncAction,
        DefaultAsyncActionCreator, DefaultAsyncActionCreatorWithMeta,
    };

    // Dispatch
    pub use async_actions_core::{
        try_catch_dispatch, Dispatch, ErasingDispatch, TryCatchDispatch,
    };

    // Logging
    pub use async_actions_core::{ActionLoggerConfig, LoggingDispatcher};

    // Errors
    pub use async_actions_core::{ActionError, NarrowError};
}
