//! Dispatching actions around an async handler
//!
//! [`TryCatchDispatch`] wraps a dispatcher and runs handlers so that a `START`
//! action goes out before the handler begins, and exactly one `SUCCESS` or
//! `FAILURE` action goes out once it settles. Handler errors are dispatched
//! and then returned to the caller; they are never swallowed.
//!
//! # Example
//!
//! ```ignore
//! use async_actions::prelude::*;
//!
//! let fetch = DefaultAsyncActionCreator::<User, RequestMeta>::namespaced("users", "fetch")
//!     .with_meta(RequestMeta::default());
//!
//! let actions = try_catch_dispatch(move |action: DefaultAsyncAction<User, RequestMeta>| {
//!     store.lock().unwrap().reduce(action);
//! });
//!
//! let user = actions.run(&fetch, || api.fetch_user(id)).await?;
//! ```

use std::future::Future;

use serde::Serialize;

use crate::action::{Action, AnyAction};
use crate::async_action::{AsyncAction, AsyncActionFamily};
use crate::error::ActionError;

/// Receives dispatched actions.
///
/// Implemented for any `Fn(A)` closure.
pub trait Dispatch<A> {
    fn dispatch(&self, action: A);
}

impl<A, F> Dispatch<A> for F
where
    F: Fn(A),
{
    fn dispatch(&self, action: A) {
        self(action)
    }
}

/// Feeds typed actions to a dispatcher that takes [`AnyAction`].
///
/// Payload and meta are converted to JSON values on the way through. An action
/// whose payload or meta cannot be represented as JSON is logged at `error`
/// and not forwarded.
///
/// ```
/// use std::cell::RefCell;
/// use async_actions_core::{
///     try_catch_dispatch, ActionError, AnyAction, DefaultAsyncActionCreator, ErasingDispatch,
/// };
///
/// # tokio_test_block_on(async {
/// let store = RefCell::new(Vec::new());
/// let erasing = ErasingDispatch::new(|a: AnyAction| store.borrow_mut().push(a));
/// let runner = try_catch_dispatch(erasing);
/// let load = DefaultAsyncActionCreator::<u32>::namespaced("todos", "load");
///
/// runner.run(&load, || async { Ok::<_, ActionError>(3) }).await.unwrap();
///
/// let store = store.into_inner();
/// assert_eq!(store[1].action_type(), "todos/load/SUCCESS");
/// assert_eq!(store[1].payload(), &serde_json::json!(3));
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ErasingDispatch<D> {
    inner: D,
}

impl<D> ErasingDispatch<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Dispatch<AnyAction>> ErasingDispatch<D> {
    fn forward(&self, action_type: &str, erased: Result<AnyAction, serde_json::Error>) {
        match erased {
            Ok(action) => self.inner.dispatch(action),
            Err(error) => {
                tracing::error!(
                    action = %action_type,
                    error = %error,
                    "action not representable as JSON"
                );
            }
        }
    }
}

impl<D, P, M> Dispatch<Action<P, M>> for ErasingDispatch<D>
where
    D: Dispatch<AnyAction>,
    P: Serialize,
    M: Serialize,
{
    fn dispatch(&self, action: Action<P, M>) {
        let action_type = action.action_type().to_string();
        self.forward(&action_type, action.into_any());
    }
}

impl<D, St, Su, F, M> Dispatch<AsyncAction<St, Su, F, M>> for ErasingDispatch<D>
where
    D: Dispatch<AnyAction>,
    St: Serialize,
    Su: Serialize,
    F: Serialize,
    M: Serialize,
{
    fn dispatch(&self, action: AsyncAction<St, Su, F, M>) {
        let action_type = action.action_type().to_string();
        self.forward(&action_type, action.into_any());
    }
}

/// Runs handlers, dispatching start/success/failure actions around them.
///
/// Created with [`try_catch_dispatch`]. Runs share the dispatcher and may be
/// in flight concurrently; no ordering is imposed between different runs.
#[derive(Debug, Clone)]
pub struct TryCatchDispatch<D> {
    dispatcher: D,
}

/// Wrap `dispatcher` for use with async handlers.
pub fn try_catch_dispatch<D>(dispatcher: D) -> TryCatchDispatch<D> {
    TryCatchDispatch::new(dispatcher)
}

impl<D> TryCatchDispatch<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn into_inner(self) -> D {
        self.dispatcher
    }

    /// Run `handler` for the async family `creator`.
    ///
    /// The start action is dispatched and `handler` is invoked as soon as
    /// `run` is called. The returned future waits for the handler's future;
    /// on `Ok(data)` it dispatches a success action carrying a clone of
    /// `data` and yields `data`, on `Err(e)` it dispatches a failure action
    /// carrying `e` and yields that same error.
    ///
    /// If the returned future is dropped before the handler settles, neither
    /// success nor failure is dispatched.
    pub fn run<'a, C, S, H, Fut, E>(
        &'a self,
        creator: &C,
        handler: H,
    ) -> impl Future<Output = Result<S, ActionError>> + 'a
    where
        C: AsyncActionFamily<Start = (), Success = S, Failure = ActionError>,
        C::Meta: Clone + Default + 'a,
        S: Clone + 'a,
        D: Dispatch<AsyncAction<(), S, ActionError, C::Meta>>,
        H: FnOnce() -> Fut,
        Fut: Future<Output = Result<S, E>> + 'a,
        E: Into<ActionError>,
    {
        let start = creator.start().create_empty();
        tracing::debug!(action = %start.action_type(), "dispatching start");
        self.dispatcher.dispatch(AsyncAction::Start(start));

        let success = creator.success().clone();
        let failure = creator.failure().clone();
        let pending = handler();
        let dispatcher = &self.dispatcher;

        async move {
            match pending.await {
                Ok(data) => {
                    let action = success.create(data.clone());
                    tracing::debug!(action = %action.action_type(), "handler succeeded");
                    dispatcher.dispatch(AsyncAction::Success(action));
                    Ok(data)
                }
                Err(error) => {
                    let error: ActionError = error.into();
                    let action = failure.create(error.clone());
                    tracing::warn!(
                        action = %action.action_type(),
                        error = %error,
                        "handler failed"
                    );
                    dispatcher.dispatch(AsyncAction::Failure(action));
                    Err(error)
                }
            }
        }
    }
}
