//! Start/success/failure triples sharing one id
//!
//! An async workflow is described by three actions with the same id:
//! a `START` action when the work begins, then exactly one of `SUCCESS` or
//! `FAILURE` when it settles. [`AsyncActionCreator`] bundles the three
//! creators; [`AsyncAction`] is the tagged union of the three actions.
//!
//! # Example
//!
//! ```
//! use async_actions_core::{async_action_creator, is_async_action, AsyncAction};
//!
//! let fetch = async_action_creator::<(), Vec<String>, String, ()>("users/fetch");
//!
//! let started = fetch.start.create_empty();
//! assert_eq!(started.action_type(), "users/fetch/START");
//! assert!(is_async_action(&started, &fetch));
//!
//! let done: AsyncAction<(), Vec<String>, String, ()> =
//!     AsyncAction::Success(fetch.success.create(vec!["ada".into()]));
//! assert!(!done.is_error());
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::action::{Action, ActionId, ActionStatus, ActionSummary, AnyAction};
use crate::creator::ActionCreator;
use crate::error::NarrowError;

/// One of the three actions of an async workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction<St = (), Su = (), F = (), M = ()> {
    Start(Action<St, M>),
    Success(Action<Su, M>),
    Failure(Action<F, M>),
}

impl<St, Su, F, M> AsyncAction<St, Su, F, M> {
    pub fn id(&self) -> &ActionId {
        match self {
            AsyncAction::Start(a) => a.id(),
            AsyncAction::Success(a) => a.id(),
            AsyncAction::Failure(a) => a.id(),
        }
    }

    pub fn status(&self) -> ActionStatus {
        match self {
            AsyncAction::Start(_) => ActionStatus::Start,
            AsyncAction::Success(_) => ActionStatus::Success,
            AsyncAction::Failure(_) => ActionStatus::Failure,
        }
    }

    pub fn action_type(&self) -> &str {
        match self {
            AsyncAction::Start(a) => a.action_type(),
            AsyncAction::Success(a) => a.action_type(),
            AsyncAction::Failure(a) => a.action_type(),
        }
    }

    pub fn meta(&self) -> &M {
        match self {
            AsyncAction::Start(a) => a.meta(),
            AsyncAction::Success(a) => a.meta(),
            AsyncAction::Failure(a) => a.meta(),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, AsyncAction::Failure(_))
    }

    /// Erase the variant payload and meta into JSON values.
    pub fn into_any(self) -> Result<AnyAction, serde_json::Error>
    where
        St: Serialize,
        Su: Serialize,
        F: Serialize,
        M: Serialize,
    {
        match self {
            AsyncAction::Start(a) => a.into_any(),
            AsyncAction::Success(a) => a.into_any(),
            AsyncAction::Failure(a) => a.into_any(),
        }
    }
}

impl<St, Su, F, M> ActionSummary for AsyncAction<St, Su, F, M>
where
    St: fmt::Debug,
    Su: fmt::Debug,
    F: fmt::Debug,
    M: fmt::Debug,
{
    fn action_type(&self) -> &str {
        AsyncAction::action_type(self)
    }

    fn is_error(&self) -> bool {
        AsyncAction::is_error(self)
    }
}

/// Anything exposing an id and a start/success/failure creator triple.
///
/// Implemented by both [`AsyncActionCreator`] and [`AsyncActionCreatorWithMeta`];
/// guards and [`TryCatchDispatch`](crate::TryCatchDispatch) accept either.
pub trait AsyncActionFamily {
    type Start;
    type Success;
    type Failure;
    type Meta;

    fn id(&self) -> &ActionId;
    fn start(&self) -> &ActionCreator<Self::Start, Self::Meta>;
    fn success(&self) -> &ActionCreator<Self::Success, Self::Meta>;
    fn failure(&self) -> &ActionCreator<Self::Failure, Self::Meta>;

    /// Whether `action` belongs to this family. Status is not checked.
    fn matches<P, M>(&self, action: &Action<P, M>) -> bool {
        action.id() == self.id()
    }

    /// Recover the typed union from an erased action of this family.
    ///
    /// The variant is chosen by the action's own status.
    #[allow(clippy::type_complexity)]
    fn narrow(
        &self,
        action: AnyAction,
    ) -> Result<AsyncAction<Self::Start, Self::Success, Self::Failure, Self::Meta>, NarrowError>
    where
        Self::Start: DeserializeOwned,
        Self::Success: DeserializeOwned,
        Self::Failure: DeserializeOwned,
        Self::Meta: DeserializeOwned,
    {
        if !self.matches(&action) {
            return Err(NarrowError::Mismatch {
                expected: self.id().to_string(),
                found: action.action_type().to_string(),
            });
        }
        Ok(match action.status() {
            ActionStatus::Start => AsyncAction::Start(action.decode()?),
            ActionStatus::Success => AsyncAction::Success(action.decode()?),
            ActionStatus::Failure => AsyncAction::Failure(action.decode()?),
        })
    }
}

/// Three creators sharing one id, without bound meta.
///
/// Use [`with_meta`](Self::with_meta) to get a bundle whose creators default to
/// a given meta.
pub struct AsyncActionCreator<St = (), Su = (), F = (), M = ()> {
    pub start: ActionCreator<St, M>,
    pub success: ActionCreator<Su, M>,
    pub failure: ActionCreator<F, M>,
    id: ActionId,
}

/// Create an async action creator for `id`.
pub fn async_action_creator<St, Su, F, M>(
    id: impl Into<ActionId>,
) -> AsyncActionCreator<St, Su, F, M> {
    AsyncActionCreator::new(id)
}

impl<St, Su, F, M> AsyncActionCreator<St, Su, F, M> {
    pub fn new(id: impl Into<ActionId>) -> Self {
        let id = id.into();
        Self {
            start: ActionCreator::new(id.clone(), ActionStatus::Start),
            success: ActionCreator::new(id.clone(), ActionStatus::Success),
            failure: ActionCreator::new(id.clone(), ActionStatus::Failure),
            id,
        }
    }

    pub fn id(&self) -> &ActionId {
        &self.id
    }

    /// A new bundle with `meta` bound to all three creators.
    ///
    /// ```
    /// use async_actions_core::async_action_creator;
    ///
    /// let save = async_action_creator::<(), (), (), &str>("save");
    /// let tagged = save.with_meta("autosave");
    ///
    /// assert_eq!(*tagged.start.create_empty().meta(), "autosave");
    /// assert_eq!(*save.start.create_empty().meta(), "");
    /// ```
    pub fn with_meta(&self, meta: M) -> AsyncActionCreatorWithMeta<St, Su, F, M>
    where
        M: Clone,
    {
        AsyncActionCreatorWithMeta::new(self.id.clone(), meta)
    }
}

impl<St, Su, F, M> AsyncActionFamily for AsyncActionCreator<St, Su, F, M> {
    type Start = St;
    type Success = Su;
    type Failure = F;
    type Meta = M;

    fn id(&self) -> &ActionId {
        &self.id
    }

    fn start(&self) -> &ActionCreator<St, M> {
        &self.start
    }

    fn success(&self) -> &ActionCreator<Su, M> {
        &self.success
    }

    fn failure(&self) -> &ActionCreator<F, M> {
        &self.failure
    }
}

impl<St, Su, F, M: Clone> Clone for AsyncActionCreator<St, Su, F, M> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            success: self.success.clone(),
            failure: self.failure.clone(),
            id: self.id.clone(),
        }
    }
}

impl<St, Su, F, M> fmt::Debug for AsyncActionCreator<St, Su, F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncActionCreator")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Three creators sharing one id, each with `meta` bound as default.
pub struct AsyncActionCreatorWithMeta<St = (), Su = (), F = (), M = ()> {
    pub start: ActionCreator<St, M>,
    pub success: ActionCreator<Su, M>,
    pub failure: ActionCreator<F, M>,
    id: ActionId,
    meta: M,
}

/// Create an async action creator for `id` with `meta` bound.
pub fn async_action_creator_with_meta<St, Su, F, M: Clone>(
    id: impl Into<ActionId>,
    meta: M,
) -> AsyncActionCreatorWithMeta<St, Su, F, M> {
    AsyncActionCreatorWithMeta::new(id, meta)
}

impl<St, Su, F, M: Clone> AsyncActionCreatorWithMeta<St, Su, F, M> {
    pub fn new(id: impl Into<ActionId>, meta: M) -> Self {
        let id = id.into();
        Self {
            start: ActionCreator::with_default_meta(id.clone(), ActionStatus::Start, meta.clone()),
            success: ActionCreator::with_default_meta(
                id.clone(),
                ActionStatus::Success,
                meta.clone(),
            ),
            failure: ActionCreator::with_default_meta(
                id.clone(),
                ActionStatus::Failure,
                meta.clone(),
            ),
            id,
            meta,
        }
    }
}

impl<St, Su, F, M> AsyncActionCreatorWithMeta<St, Su, F, M> {
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    /// The meta bound to all three creators.
    pub fn meta(&self) -> &M {
        &self.meta
    }
}

impl<St, Su, F, M> AsyncActionFamily for AsyncActionCreatorWithMeta<St, Su, F, M> {
    type Start = St;
    type Success = Su;
    type Failure = F;
    type Meta = M;

    fn id(&self) -> &ActionId {
        &self.id
    }

    fn start(&self) -> &ActionCreator<St, M> {
        &self.start
    }

    fn success(&self) -> &ActionCreator<Su, M> {
        &self.success
    }

    fn failure(&self) -> &ActionCreator<F, M> {
        &self.failure
    }
}

impl<St, Su, F, M: Clone> Clone for AsyncActionCreatorWithMeta<St, Su, F, M> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            success: self.success.clone(),
            failure: self.failure.clone(),
            id: self.id.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<St, Su, F, M: fmt::Debug> fmt::Debug for AsyncActionCreatorWithMeta<St, Su, F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncActionCreatorWithMeta")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Whether `action` belongs to the family of `creator`.
///
/// Only the id is compared: any of the start, success or failure actions
/// matches, and the caller then discriminates on the action's status.
pub fn is_async_action<C, P, M>(action: &Action<P, M>, creator: &C) -> bool
where
    C: AsyncActionFamily + ?Sized,
{
    creator.matches(action)
}
