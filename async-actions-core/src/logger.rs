//! Action logging with pattern-based filtering and in-memory storage
//!
//! [`LoggingDispatcher`] wraps another dispatcher and logs every action it
//! forwards. Glob patterns over the action `type` decide which actions are
//! logged; the actions themselves are always forwarded.
//!
//! # Example
//!
//! ```
//! use async_actions_core::{
//!     Action, ActionLogConfig, ActionLoggerConfig, ActionStatus, Dispatch, LoggingDispatcher,
//! };
//!
//! // Only log failures, keep the last 50 in memory
//! let filter = ActionLoggerConfig::new(Some("*/FAILURE"), None);
//! let logger = LoggingDispatcher::with_log(|_: Action<&str>| {}, ActionLogConfig::new(50, filter));
//!
//! logger.dispatch(Action::new("save", ActionStatus::Start, "", ()));
//! logger.dispatch(Action::new("save", ActionStatus::Failure, "disk full", ()));
//!
//! let entries = logger.log_entries().unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].action_type, "save/FAILURE");
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::action::ActionSummary;
use crate::dispatch::Dispatch;

/// Configuration for action logging with glob pattern filtering.
///
/// Patterns are matched against the action `type` (`"{id}/{status}"`):
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `users/*` matches every action of ids under `users/`
/// - `*/FAILURE` matches every failure
/// - `*/START` matches every start
#[derive(Debug, Clone, Default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Example
    /// ```
    /// use async_actions_core::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("users/*, jobs/*"), Some("*/START"));
    /// assert!(config.should_log("users/fetch/SUCCESS"));
    /// assert!(config.should_log("jobs/run/FAILURE"));
    /// assert!(!config.should_log("users/fetch/START"));
    /// assert!(!config.should_log("todos/add/SUCCESS"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// Check if an action type should be logged based on include/exclude patterns
    pub fn should_log(&self, action_type: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_type))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_type))
    }
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// A logged action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLogEntry {
    /// The action `type` string
    pub action_type: String,
    /// Summary representation (from ActionSummary::summary())
    pub summary: String,
    /// Whether this was a failure action
    pub error: bool,
    /// Position among all logged actions, counting evicted ones
    pub sequence: u64,
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// Ring buffer of the most recently logged actions.
#[derive(Debug)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl ActionLog {
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Record `action` if its type passes the filter.
    pub fn log<A: ActionSummary + ?Sized>(&mut self, action: &A) -> Option<&ActionLogEntry> {
        let action_type = action.action_type();
        if self.config.capacity == 0 || !self.config.filter.should_log(action_type) {
            return None;
        }

        if self.entries.len() == self.config.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActionLogEntry {
            action_type: action_type.to_string(),
            summary: action.summary(),
            error: action.is_error(),
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.entries.back()
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dispatcher wrapper that logs actions with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only** (default): logs via `tracing::debug!()`
/// - **With storage**: also stores entries in an [`ActionLog`] ring buffer
///
/// Every action is forwarded to the inner dispatcher whether or not it is
/// logged.
#[derive(Debug)]
pub struct LoggingDispatcher<D> {
    inner: D,
    config: ActionLoggerConfig,
    log: Option<Mutex<ActionLog>>,
    active: bool,
}

impl<D> LoggingDispatcher<D> {
    /// Log through tracing only
    pub fn new(inner: D, config: ActionLoggerConfig) -> Self {
        Self {
            inner,
            config,
            log: None,
            active: true,
        }
    }

    /// Log through tracing and keep entries in memory
    pub fn with_log(inner: D, config: ActionLogConfig) -> Self {
        Self {
            inner,
            config: config.filter.clone(),
            log: Some(Mutex::new(ActionLog::new(config))),
            active: true,
        }
    }

    /// Set whether logging is active.
    ///
    /// When inactive, actions are forwarded without being logged.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Snapshot of the stored entries, oldest first (if storage is enabled)
    pub fn log_entries(&self) -> Option<Vec<ActionLogEntry>> {
        self.log.as_ref().map(|log| {
            log.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries()
                .cloned()
                .collect()
        })
    }
}

impl<A, D> Dispatch<A> for LoggingDispatcher<D>
where
    A: ActionSummary,
    D: Dispatch<A>,
{
    fn dispatch(&self, action: A) {
        if self.active {
            let action_type = action.action_type();
            if self.config.should_log(action_type) {
                tracing::debug!(action = %action_type, error = action.is_error(), "action");
            }
            if let Some(log) = &self.log {
                log.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .log(&action);
            }
        }
        self.inner.dispatch(action);
    }
}

/// Match an action `type` against a glob pattern.
///
/// `*` matches any run of characters, including `/`, and `?` matches one
/// character.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let mut tokens: Vec<char> = Vec::with_capacity(pattern.len());
    for c in pattern.chars() {
        // runs of `*` behave like a single one
        if !(c == '*' && tokens.last() == Some(&'*')) {
            tokens.push(c);
        }
    }
    let text: Vec<char> = text.chars().collect();
    match_tokens(&tokens, &text)
}

fn match_tokens(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| match_tokens(rest, &text[skip..])),
        Some((&expected, rest)) => match text.split_first() {
            Some((&c, tail)) if expected == '?' || expected == c => match_tokens(rest, tail),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn action(id: &str, status: ActionStatus) -> Action<&'static str> {
        Action::new(id, status, "payload", ())
    }

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("fetch/START", "fetch/START"));
        assert!(!glob_match("fetch/START", "fetch/SUCCESS"));
        assert!(!glob_match("fetch", "fetch/START"));
    }

    #[test]
    fn test_glob_match_star() {
        assert!(glob_match("users/*", "users/fetch/START"));
        assert!(glob_match("users/*", "users/"));
        assert!(!glob_match("users/*", "admin/users/fetch/START"));

        assert!(glob_match("*/FAILURE", "users/fetch/FAILURE"));
        assert!(glob_match("*/fetch/*", "users/fetch/START"));
    }

    #[test]
    fn test_glob_match_question() {
        assert!(glob_match("ACTION_?/START", "ACTION_7/START"));
        assert!(!glob_match("ACTION_?/START", "ACTION_12/START"));
    }

    #[test]
    fn test_config_include() {
        let config = ActionLoggerConfig::new(Some("users/*,jobs/run/SUCCESS"), None);
        assert!(config.should_log("users/fetch/START"));
        assert!(config.should_log("jobs/run/SUCCESS"));
        assert!(!config.should_log("jobs/run/FAILURE"));
    }

    #[test]
    fn test_config_exclude() {
        let config = ActionLoggerConfig::new(None, Some("*/START, tick/*"));
        assert!(!config.should_log("fetch/START"));
        assert!(!config.should_log("tick/SUCCESS"));
        assert!(config.should_log("fetch/SUCCESS"));
    }

    #[test]
    fn test_config_default_logs_everything() {
        let config = ActionLoggerConfig::default();
        assert!(config.should_log("anything/START"));
        assert!(ActionLoggerConfig::new(Some(""), Some(" , ")).should_log("x/SUCCESS"));
    }

    #[test]
    fn test_glob_match_collapses_stars() {
        assert!(glob_match("**/START", "jobs/run/START"));
        assert!(glob_match("*", ""));
        assert!(!glob_match("?*", ""));
    }

    #[test]
    fn test_action_log_capacity() {
        let mut log = ActionLog::new(ActionLogConfig::new(3, ActionLoggerConfig::default()));
        for status in [ActionStatus::Start, ActionStatus::Success, ActionStatus::Start] {
            log.log(&action("save", status));
        }
        log.log(&action("save", ActionStatus::Failure));

        assert_eq!(log.len(), 3);
        let kept: Vec<_> = log
            .entries()
            .map(|e| (e.sequence, e.action_type.as_str()))
            .collect();
        assert_eq!(
            kept,
            vec![(1, "save/SUCCESS"), (2, "save/START"), (3, "save/FAILURE")]
        );
    }

    #[test]
    fn test_action_log_entry_fields() {
        let mut log = ActionLog::new(ActionLogConfig::default());
        let entry = log.log(&action("save", ActionStatus::Failure)).unwrap();
        assert_eq!(entry.action_type, "save/FAILURE");
        assert!(entry.error);
        assert!(entry.summary.contains("payload"));
    }

    #[test]
    fn test_action_log_filter_and_zero_capacity() {
        let only_failures = ActionLoggerConfig::new(Some("*/FAILURE"), None);
        let mut log = ActionLog::new(ActionLogConfig::new(10, only_failures.clone()));
        assert!(log.log(&action("save", ActionStatus::Start)).is_none());
        assert!(log.log(&action("save", ActionStatus::Failure)).is_some());
        assert_eq!(log.len(), 1);

        let mut empty = ActionLog::new(ActionLogConfig::new(0, only_failures));
        assert!(empty.log(&action("save", ActionStatus::Failure)).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_dispatcher_forwards_filtered_actions() {
        let forwarded = AtomicUsize::new(0);
        let config = ActionLogConfig::new(10, ActionLoggerConfig::new(None, Some("*/START")));
        let logger = LoggingDispatcher::with_log(
            |_: Action<&'static str>| {
                forwarded.fetch_add(1, Ordering::SeqCst);
            },
            config,
        );

        logger.dispatch(action("save", ActionStatus::Start));
        logger.dispatch(action("save", ActionStatus::Success));

        assert_eq!(forwarded.load(Ordering::SeqCst), 2);
        let entries = logger.log_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, "save/SUCCESS");
    }

    #[test]
    fn test_inactive_dispatcher_still_forwards() {
        let forwarded = AtomicUsize::new(0);
        let logger = LoggingDispatcher::with_log(
            |_: Action<&'static str>| {
                forwarded.fetch_add(1, Ordering::SeqCst);
            },
            ActionLogConfig::default(),
        )
        .active(false);

        logger.dispatch(action("save", ActionStatus::Success));
        assert_eq!(forwarded.load(Ordering::SeqCst), 1);
        assert!(logger.log_entries().unwrap().is_empty());
        assert!(!logger.is_active());
    }

    #[test]
    fn test_tracing_only_has_no_entries() {
        let logger =
            LoggingDispatcher::new(|_: Action<&'static str>| {}, ActionLoggerConfig::default());
        logger.dispatch(action("save", ActionStatus::Success));
        assert!(logger.log_entries().is_none());
    }
}
