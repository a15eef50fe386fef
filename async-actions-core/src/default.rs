//! Default async creators: empty start payload, [`ActionError`] failure payload
//!
//! Only the success payload and the meta are chosen by the caller. Ids can be
//! given explicitly, namespaced, or generated.
//!
//! ```
//! use async_actions_core::{default_async_action_creator, DefaultAsyncActionCreator};
//!
//! let load: DefaultAsyncActionCreator<u32> = default_async_action_creator(Some("todos"), Some("load"));
//! assert_eq!(load.id().as_str(), "todos/load");
//!
//! let anon: DefaultAsyncActionCreator<u32> = default_async_action_creator(None, None);
//! assert!(anon.id().as_str().starts_with("ACTION_"));
//! ```

use crate::action::ActionId;
use crate::async_action::{AsyncAction, AsyncActionCreator, AsyncActionCreatorWithMeta};
use crate::error::ActionError;
use crate::ids::{IdGenerator, SequentialIds};

/// Async creator with `()` start payload and [`ActionError`] failure payload.
pub type DefaultAsyncActionCreator<S = (), M = ()> = AsyncActionCreator<(), S, ActionError, M>;

/// [`DefaultAsyncActionCreator`] with bound meta.
pub type DefaultAsyncActionCreatorWithMeta<S = (), M = ()> =
    AsyncActionCreatorWithMeta<(), S, ActionError, M>;

/// The actions produced by a default async creator.
pub type DefaultAsyncAction<S = (), M = ()> = AsyncAction<(), S, ActionError, M>;

/// Create a default async creator, generating ids from the process-wide sequence.
///
/// - no `id_or_namespace`: the id is `ACTION_{n}` and the sequence advances
///   (`id` is ignored in that case)
/// - both given: the id is `{id_or_namespace}/{id}`
/// - only `id_or_namespace`: used as the id
pub fn default_async_action_creator<S, M>(
    id_or_namespace: Option<&str>,
    id: Option<&str>,
) -> DefaultAsyncActionCreator<S, M> {
    default_async_action_creator_with(SequentialIds::global(), id_or_namespace, id)
}

/// Like [`default_async_action_creator`] but drawing generated ids from `ids`.
pub fn default_async_action_creator_with<S, M>(
    ids: &dyn IdGenerator,
    id_or_namespace: Option<&str>,
    id: Option<&str>,
) -> DefaultAsyncActionCreator<S, M> {
    AsyncActionCreator::new(resolve_action_id(ids, id_or_namespace, id))
}

/// Resolve the id a default creator will use.
pub fn resolve_action_id(
    ids: &dyn IdGenerator,
    id_or_namespace: Option<&str>,
    id: Option<&str>,
) -> ActionId {
    match (id_or_namespace, id) {
        (None, _) => ids.next_id(),
        (Some(namespace), Some(id)) => ActionId::namespaced(namespace, id),
        (Some(id), None) => ActionId::from(id),
    }
}

impl<S, M> AsyncActionCreator<(), S, ActionError, M> {
    /// A default creator with a generated id.
    pub fn generated() -> Self {
        default_async_action_creator(None, None)
    }

    /// A default creator with id `{namespace}/{id}`.
    pub fn namespaced(namespace: &str, id: &str) -> Self {
        default_async_action_creator(Some(namespace), Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionStatus;
    use crate::async_action::AsyncActionFamily;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a: DefaultAsyncActionCreator = default_async_action_creator(None, None);
        let b: DefaultAsyncActionCreator = default_async_action_creator(None, None);
        assert_ne!(a.id(), b.id());
        assert!(a.id().as_str().starts_with("ACTION_"));
        assert!(b.id().as_str().starts_with("ACTION_"));
    }

    #[test]
    fn test_generated_ids_follow_injected_sequence() {
        let ids = SequentialIds::new();
        let a: DefaultAsyncActionCreator = default_async_action_creator_with(&ids, None, None);
        let b: DefaultAsyncActionCreator =
            default_async_action_creator_with(&ids, None, Some("ignored"));
        assert_eq!(a.id(), "ACTION_0");
        assert_eq!(b.id(), "ACTION_1");
    }

    #[test]
    fn test_namespace_and_id() {
        let c: DefaultAsyncActionCreator<u32> = default_async_action_creator(Some("ns"), Some("x"));
        assert_eq!(c.id(), "ns/x");
        assert_eq!(c.success.create(1).action_type(), "ns/x/SUCCESS");

        let c = DefaultAsyncActionCreator::<u32>::namespaced("ns", "y");
        assert_eq!(c.id(), "ns/y");
    }

    #[test]
    fn test_plain_id_does_not_touch_sequence() {
        let ids = SequentialIds::new();
        let c: DefaultAsyncActionCreator = default_async_action_creator_with(&ids, Some("fetch"), None);
        assert_eq!(c.id(), "fetch");

        // only an absent value falls back to the sequence, an empty one is kept
        let empty: DefaultAsyncActionCreator =
            default_async_action_creator_with(&ids, Some(""), None);
        assert_eq!(empty.id(), "");
        let joined: DefaultAsyncActionCreator =
            default_async_action_creator_with(&ids, Some(""), Some("x"));
        assert_eq!(joined.id(), "/x");

        assert_eq!(ids.peek(), 0);
    }

    #[test]
    fn test_payload_types() {
        let c: DefaultAsyncActionCreator<Vec<u8>> = DefaultAsyncActionCreator::generated();

        let start = c.start().create_empty();
        assert_eq!(start.payload(), &());
        assert_eq!(start.status(), ActionStatus::Start);

        let err = ActionError::msg("nope");
        let failure = c.failure().create(err.clone());
        assert!(failure.is_error());
        assert!(failure.payload().ptr_eq(&err));
    }
}
