//! Test utilities for code that dispatches actions
//!
//! - [`ActionRecorder`]: captures dispatched actions in order
//! - Assertion macros for verifying dispatched actions
//!
//! # Example
//!
//! ```
//! use async_actions_core::testing::ActionRecorder;
//! use async_actions_core::{assert_dispatched, assert_dispatched_types};
//! use async_actions_core::{try_catch_dispatch, ActionError, AsyncAction};
//! use async_actions_core::{DefaultAsyncAction, DefaultAsyncActionCreator};
//!
//! # tokio_test_block_on(async {
//! let mut recorder = ActionRecorder::<DefaultAsyncAction<u32>>::new();
//! let runner = try_catch_dispatch(recorder.dispatcher());
//! let load = DefaultAsyncActionCreator::<u32>::namespaced("todos", "load");
//!
//! runner.run(&load, || async { Ok::<_, ActionError>(3) }).await.unwrap();
//!
//! let actions = recorder.drain();
//! assert_dispatched_types!(actions, ["todos/load/START", "todos/load/SUCCESS"]);
//! assert_dispatched!(actions, AsyncAction::Success(a) if *a.payload() == 3);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use tokio::sync::mpsc;

use crate::dispatch::Dispatch;

/// Records dispatched actions in dispatch order.
///
/// Hand out [`dispatcher`](Self::dispatcher)s to the code under test, then
/// [`drain`](Self::drain) what they dispatched.
#[derive(Debug)]
pub struct ActionRecorder<A> {
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

/// Dispatcher half of an [`ActionRecorder`].
#[derive(Debug)]
pub struct RecordingDispatch<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A> Clone for RecordingDispatch<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> Dispatch<A> for RecordingDispatch<A> {
    fn dispatch(&self, action: A) {
        let _ = self.tx.send(action);
    }
}

impl<A> ActionRecorder<A> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a dispatcher that records into this recorder.
    pub fn dispatcher(&self) -> RecordingDispatch<A> {
        RecordingDispatch {
            tx: self.tx.clone(),
        }
    }

    /// Get a clone of the underlying sender.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Drain all recorded actions, oldest first.
    pub fn drain(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Check if any actions were recorded.
    ///
    /// This drains the recorder.
    pub fn has_recorded(&mut self) -> bool {
        !self.drain().is_empty()
    }
}

impl<A> Default for ActionRecorder<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that an action matching a pattern was dispatched.
///
/// ```ignore
/// let actions = recorder.drain();
/// assert_dispatched!(actions, AsyncAction::Failure(_));
/// assert_dispatched!(actions, AsyncAction::Success(a) if *a.payload() == 42);
/// ```
#[macro_export]
macro_rules! assert_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be dispatched, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was dispatched.
#[macro_export]
macro_rules! assert_not_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be dispatched, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find the first dispatched action matching a pattern.
#[macro_export]
macro_rules! find_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count dispatched actions matching a pattern.
#[macro_export]
macro_rules! count_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert the exact sequence of dispatched action types.
///
/// Requires the actions to implement [`ActionSummary`](crate::ActionSummary).
///
/// ```ignore
/// assert_dispatched_types!(actions, ["fetch/START", "fetch/FAILURE"]);
/// ```
#[macro_export]
macro_rules! assert_dispatched_types {
    ($actions:expr, [$($ty:expr),* $(,)?]) => {{
        let actual: ::std::vec::Vec<&str> = $actions
            .iter()
            .map(|a| $crate::ActionSummary::action_type(a))
            .collect();
        let expected: ::std::vec::Vec<&str> = ::std::vec![$($ty),*];
        assert_eq!(actual, expected, "dispatched action types differ");
    }};
}
