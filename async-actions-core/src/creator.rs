//! Action creators bound to one `(id, status)` pair

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::action::{Action, ActionId, ActionStatus, ActionType, AnyAction, DEFAULT_ACTION_STATUS};
use crate::error::NarrowError;

/// Builds actions of one id and status.
///
/// A creator is immutable once built and can be reused to make any number of
/// actions. It may carry a default meta that is used whenever an action is
/// created without one; otherwise the meta falls back to `M::default()`.
///
/// # Example
///
/// ```
/// use async_actions_core::{ActionCreator, ActionStatus};
///
/// let add = ActionCreator::<String, u32>::new("todos/add", ActionStatus::Success);
///
/// let action = add.create("write docs".to_string());
/// assert_eq!(action.action_type(), "todos/add/SUCCESS");
/// assert_eq!(*action.meta(), 0);
///
/// let action = add.create_with_meta("ship it".to_string(), 7);
/// assert_eq!(*action.meta(), 7);
/// ```
pub struct ActionCreator<P = (), M = ()> {
    id: ActionId,
    status: ActionStatus,
    meta: Option<M>,
    _payload: PhantomData<fn() -> P>,
}

/// Create an action creator with the default status (`SUCCESS`).
pub fn action_creator<P, M>(id: impl Into<ActionId>) -> ActionCreator<P, M> {
    ActionCreator::new(id, DEFAULT_ACTION_STATUS)
}

impl<P, M> ActionCreator<P, M> {
    pub fn new(id: impl Into<ActionId>, status: ActionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            meta: None,
            _payload: PhantomData,
        }
    }

    /// Create a creator with `meta` pre-bound as the default meta.
    pub fn with_default_meta(id: impl Into<ActionId>, status: ActionStatus, meta: M) -> Self {
        Self {
            id: id.into(),
            status,
            meta: Some(meta),
            _payload: PhantomData,
        }
    }

    /// A fresh copy of this creator with `meta` bound. `self` is unchanged.
    pub fn bind_meta(&self, meta: M) -> Self {
        Self::with_default_meta(self.id.clone(), self.status, meta)
    }

    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    /// The pre-bound default meta, if any.
    pub fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    pub fn action_type(&self) -> ActionType {
        ActionType::new(self.id.clone(), self.status)
    }

    /// Build an action using the bound meta, or `M::default()` if none is bound.
    pub fn create(&self, payload: P) -> Action<P, M>
    where
        M: Clone + Default,
    {
        let meta = self.meta.clone().unwrap_or_default();
        Action::new(self.id.clone(), self.status, payload, meta)
    }

    /// Build an action with an explicit meta.
    pub fn create_with_meta(&self, payload: P, meta: M) -> Action<P, M> {
        Action::new(self.id.clone(), self.status, payload, meta)
    }

    /// Build an action with an empty payload.
    pub fn create_empty(&self) -> Action<P, M>
    where
        P: Default,
        M: Clone + Default,
    {
        self.create(P::default())
    }

    /// Whether `action` was made by a creator with this id and status.
    pub fn matches<Q, N>(&self, action: &Action<Q, N>) -> bool {
        is_action(action, self)
    }

    /// Recover a typed action from an erased one.
    ///
    /// Fails with [`NarrowError::Mismatch`] if the action has a different id or
    /// status, and with [`NarrowError::Decode`] if payload or meta don't decode.
    pub fn narrow(&self, action: AnyAction) -> Result<Action<P, M>, NarrowError>
    where
        P: DeserializeOwned,
        M: DeserializeOwned,
    {
        if !self.matches(&action) {
            return Err(NarrowError::Mismatch {
                expected: self.action_type().to_string(),
                found: action.action_type().to_string(),
            });
        }
        Ok(action.decode()?)
    }
}

impl<P, M: Clone> Clone for ActionCreator<P, M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            status: self.status,
            meta: self.meta.clone(),
            _payload: PhantomData,
        }
    }
}

impl<P, M: fmt::Debug> fmt::Debug for ActionCreator<P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Whether `action` was made by `creator`: same id and same status.
///
/// ```
/// use async_actions_core::{is_action, ActionCreator, ActionStatus};
///
/// let started = ActionCreator::<(), ()>::new("load", ActionStatus::Start);
/// let done = ActionCreator::<u32, ()>::new("load", ActionStatus::Success);
///
/// let action = started.create_empty();
/// assert!(is_action(&action, &started));
/// assert!(!is_action(&action, &done));
/// ```
pub fn is_action<P, M, Q, N>(action: &Action<Q, N>, creator: &ActionCreator<P, M>) -> bool {
    action.id() == creator.id() && action.status() == creator.status()
}
