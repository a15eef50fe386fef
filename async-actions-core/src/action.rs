//! Action records, identifiers and the status tag

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use serde::de::{self, DeserializeOwned, Deserializer, IntoDeserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ParseActionTypeError, ParseStatusError};

/// Lifecycle stage carried by every action.
///
/// Serializes as `"START"`, `"SUCCESS"` or `"FAILURE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Start,
    Success,
    Failure,
}

/// Status used when a creator is built without one.
pub const DEFAULT_ACTION_STATUS: ActionStatus = ActionStatus::Success;

impl ActionStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ActionStatus; 3] = [
        ActionStatus::Start,
        ActionStatus::Success,
        ActionStatus::Failure,
    ];

    /// The string form used in action `type` strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Start => "START",
            ActionStatus::Success => "SUCCESS",
            ActionStatus::Failure => "FAILURE",
        }
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, ActionStatus::Failure)
    }
}

impl Default for ActionStatus {
    fn default() -> Self {
        DEFAULT_ACTION_STATUS
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START" => Ok(ActionStatus::Start),
            "SUCCESS" => Ok(ActionStatus::Success),
            "FAILURE" => Ok(ActionStatus::Failure),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Identifies a family of actions.
///
/// Cheap to clone; every action and creator of a family shares one allocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(Arc<str>);

impl ActionId {
    /// Create a new id.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Join a namespace and an id as `{namespace}/{id}`.
    ///
    /// ```
    /// use async_actions_core::ActionId;
    ///
    /// assert_eq!(ActionId::namespaced("user", "fetch").as_str(), "user/fetch");
    /// ```
    pub fn namespaced(namespace: &str, id: &str) -> Self {
        Self::new(format!("{namespace}/{id}"))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ActionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ActionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&String> for ActionId {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for ActionId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ActionId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for ActionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ActionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ActionId::from)
    }
}

/// The `(id, status)` pair encoded in an action's `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionType {
    id: ActionId,
    status: ActionStatus,
}

impl ActionType {
    pub fn new(id: impl Into<ActionId>, status: ActionStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    /// Split a `type` string back into id and status.
    ///
    /// The status is taken after the last `/`, so namespaced ids survive.
    ///
    /// ```
    /// use async_actions_core::{ActionStatus, ActionType};
    ///
    /// let kind = ActionType::parse("user/fetch/FAILURE").unwrap();
    /// assert_eq!(kind.id().as_str(), "user/fetch");
    /// assert_eq!(kind.status(), ActionStatus::Failure);
    /// ```
    pub fn parse(s: &str) -> Result<Self, ParseActionTypeError> {
        let (id, status) = s
            .rsplit_once('/')
            .ok_or_else(|| ParseActionTypeError::MissingSeparator(s.to_string()))?;
        if id.is_empty() {
            return Err(ParseActionTypeError::EmptyId(s.to_string()));
        }
        Ok(Self::new(id, status.parse()?))
    }

    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.status)
    }
}

impl FromStr for ActionType {
    type Err = ParseActionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An immutable action record.
///
/// The `type` string and the `error` flag are derived from `id` and `status`
/// when the action is built and cannot be changed afterwards.
///
/// Serializes as a plain record:
/// `{"type", "id", "status", "payload", "meta", "error"}`.
///
/// # Example
///
/// ```
/// use async_actions_core::{Action, ActionStatus};
///
/// let action = Action::new("todos/add", ActionStatus::Failure, "oops", ());
/// assert_eq!(action.action_type(), "todos/add/FAILURE");
/// assert!(action.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action<P = (), M = ()> {
    action_type: String,
    id: ActionId,
    status: ActionStatus,
    payload: P,
    meta: M,
}

/// An action whose payload and meta have been erased to JSON values.
pub type AnyAction = Action<serde_json::Value, serde_json::Value>;

impl<P, M> Action<P, M> {
    /// Build an action, deriving its `type` from `id` and `status`.
    pub fn new(id: impl Into<ActionId>, status: ActionStatus, payload: P, meta: M) -> Self {
        let id = id.into();
        Self {
            action_type: format!("{id}/{status}"),
            id,
            status,
            payload,
            meta,
        }
    }

    /// The `"{id}/{status}"` string.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }

    /// True iff this is a failure action.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.status.is_failure()
    }

    /// Replace the meta of this action.
    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = meta;
        self
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (P, M) {
        (self.payload, self.meta)
    }

    /// Transform the payload, keeping id, status and meta.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Action<Q, M> {
        Action {
            action_type: self.action_type,
            id: self.id,
            status: self.status,
            payload: f(self.payload),
            meta: self.meta,
        }
    }

    /// Erase payload and meta into JSON values.
    pub fn into_any(self) -> Result<AnyAction, serde_json::Error>
    where
        P: Serialize,
        M: Serialize,
    {
        Ok(Action {
            action_type: self.action_type,
            id: self.id,
            status: self.status,
            payload: serde_json::to_value(self.payload)?,
            meta: serde_json::to_value(self.meta)?,
        })
    }
}

impl AnyAction {
    /// Decode payload and meta into concrete types.
    ///
    /// This does not check the id or status; see
    /// [`ActionCreator::narrow`](crate::ActionCreator::narrow) for the guarded form.
    pub fn decode<P, M>(self) -> Result<Action<P, M>, serde_json::Error>
    where
        P: DeserializeOwned,
        M: DeserializeOwned,
    {
        Ok(Action {
            action_type: self.action_type,
            id: self.id,
            status: self.status,
            payload: serde_json::from_value(self.payload)?,
            meta: serde_json::from_value(self.meta)?,
        })
    }
}

impl<P: Serialize, M: Serialize> Serialize for Action<P, M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Action", 6)?;
        record.serialize_field("type", &self.action_type)?;
        record.serialize_field("id", &self.id)?;
        record.serialize_field("status", &self.status)?;
        record.serialize_field("payload", &self.payload)?;
        record.serialize_field("meta", &self.meta)?;
        record.serialize_field("error", &self.is_error())?;
        record.end()
    }
}

// `payload` and `meta` may be left out of a record entirely; `None` here
// means the field was absent, not that it was `null`.
#[derive(Deserialize)]
#[serde(bound = "P: Deserialize<'de>, M: Deserialize<'de>")]
struct RawAction<P, M> {
    #[serde(rename = "type")]
    action_type: String,
    id: ActionId,
    status: ActionStatus,
    #[serde(default, deserialize_with = "present")]
    payload: Option<P>,
    #[serde(default, deserialize_with = "present")]
    meta: Option<M>,
    error: bool,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The value an absent field stands for: whatever `T` makes of a unit,
/// so `()`, `Option` and JSON values come out as they would for `null`.
fn absent<'de, T, E>(field: &'static str) -> Result<T, E>
where
    T: Deserialize<'de>,
    E: de::Error,
{
    let unit = <() as IntoDeserializer<'de, E>>::into_deserializer(());
    T::deserialize(unit).map_err(|_| E::missing_field(field))
}

impl<'de, P, M> Deserialize<'de> for Action<P, M>
where
    P: Deserialize<'de>,
    M: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::<P, M>::deserialize(deserializer)?;
        let payload = match raw.payload {
            Some(payload) => payload,
            None => absent::<P, D::Error>("payload")?,
        };
        let meta = match raw.meta {
            Some(meta) => meta,
            None => absent::<M, D::Error>("meta")?,
        };
        let action = Action::new(raw.id, raw.status, payload, meta);

        if action.action_type != raw.action_type {
            return Err(de::Error::custom(format!(
                "action type {:?} does not match id and status ({:?})",
                raw.action_type, action.action_type
            )));
        }
        if action.is_error() != raw.error {
            return Err(de::Error::custom(format!(
                "error flag {} does not match status {}",
                raw.error, action.status
            )));
        }
        Ok(action)
    }
}

/// Common view over anything that can be dispatched.
///
/// Used by the logging dispatcher and the test assertions to inspect actions
/// without knowing their payload types.
pub trait ActionSummary: Debug {
    /// The `"{id}/{status}"` string.
    fn action_type(&self) -> &str;

    /// Whether this is a failure action.
    fn is_error(&self) -> bool;

    /// Human-readable summary for logs. Defaults to `Debug`.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

impl<P: Debug, M: Debug> ActionSummary for Action<P, M> {
    fn action_type(&self) -> &str {
        Action::action_type(self)
    }

    fn is_error(&self) -> bool {
        Action::is_error(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_strings() {
        for status in ActionStatus::ALL {
            assert_eq!(status.as_str().parse::<ActionStatus>(), Ok(status));
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(ActionStatus::default(), ActionStatus::Success);
        assert!("start".parse::<ActionStatus>().is_err());
    }

    #[test]
    fn test_type_is_id_and_status() {
        for status in ActionStatus::ALL {
            let action = Action::new("load", status, (), ());
            assert_eq!(action.action_type(), format!("load/{}", status));
            assert_eq!(action.is_error(), status == ActionStatus::Failure);
        }
    }

    #[test]
    fn test_with_meta_keeps_type() {
        let action = Action::new("load", ActionStatus::Start, 1, "a").with_meta("b");
        assert_eq!(action.action_type(), "load/START");
        assert_eq!(*action.meta(), "b");
        assert_eq!(action.into_parts(), (1, "b"));
    }

    #[test]
    fn test_action_type_parse() {
        let kind: ActionType = "a/b/c/SUCCESS".parse().unwrap();
        assert_eq!(kind.id(), &ActionId::from("a/b/c"));
        assert_eq!(kind.status(), ActionStatus::Success);
        assert_eq!(kind.to_string(), "a/b/c/SUCCESS");

        assert_eq!(
            ActionType::parse("fetch"),
            Err(ParseActionTypeError::MissingSeparator("fetch".into()))
        );
        assert_eq!(
            ActionType::parse("/START"),
            Err(ParseActionTypeError::EmptyId("/START".into()))
        );
        assert!(matches!(
            ActionType::parse("fetch/DONE"),
            Err(ParseActionTypeError::Status(_))
        ));
    }

    #[test]
    fn test_serialize_plain_record() {
        let action = Action::new("user/fetch", ActionStatus::Failure, "nope", json!({"page": 2}));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "user/fetch/FAILURE",
                "id": "user/fetch",
                "status": "FAILURE",
                "payload": "nope",
                "meta": {"page": 2},
                "error": true,
            })
        );

        let back: Action<String, serde_json::Value> = serde_json::from_value(value).unwrap();
        assert_eq!(back.payload(), "nope");
        assert_eq!(back.status(), ActionStatus::Failure);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_type() {
        let value = json!({
            "type": "other/START",
            "id": "user/fetch",
            "status": "START",
            "payload": null,
            "meta": null,
            "error": false,
        });
        let err = serde_json::from_value::<Action>(value).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_deserialize_absent_payload_and_meta() {
        let record = json!({
            "type": "fetch/START",
            "id": "fetch",
            "status": "START",
            "error": false,
        });

        let unit: Action = serde_json::from_value(record.clone()).unwrap();
        assert_eq!(unit.action_type(), "fetch/START");

        let any: AnyAction = serde_json::from_value(record.clone()).unwrap();
        assert_eq!(any.payload(), &serde_json::Value::Null);
        assert_eq!(any.meta(), &serde_json::Value::Null);

        let optional: Action<Option<u32>, Option<String>> =
            serde_json::from_value(record.clone()).unwrap();
        assert_eq!(optional.payload(), &None);
        assert_eq!(optional.meta(), &None);

        // a payload type with no empty form still requires the field
        let err = serde_json::from_value::<Action<String>>(record).unwrap_err();
        assert!(err.to_string().contains("missing field `payload`"));
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_error_flag() {
        let value = json!({
            "type": "user/fetch/SUCCESS",
            "id": "user/fetch",
            "status": "SUCCESS",
            "payload": null,
            "meta": null,
            "error": true,
        });
        assert!(serde_json::from_value::<Action>(value).is_err());
    }

    #[test]
    fn test_into_any_and_decode() {
        let action = Action::new("count", ActionStatus::Success, 42u32, "tag".to_string());
        let any = action.clone().into_any().unwrap();
        assert_eq!(any.payload(), &json!(42));
        assert_eq!(any.action_type(), "count/SUCCESS");

        let back: Action<u32, String> = any.decode().unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_unit_payload_is_null() {
        let any = Action::new("ping", ActionStatus::Start, (), ()).into_any().unwrap();
        assert_eq!(any.payload(), &serde_json::Value::Null);
        assert_eq!(any.meta(), &serde_json::Value::Null);
    }
}
