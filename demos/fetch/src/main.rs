//! Fetch demo - async-actions example
//!
//! Runs a simulated user request through `try_catch_dispatch`:
//! 1. `users/fetch/START` is dispatched and the request begins
//! 2. The request settles after the configured latency
//! 3. `users/fetch/SUCCESS` or `users/fetch/FAILURE` is dispatched
//! 4. The reducer folds each action into `AppState`
//!
//! Every action passes through a `LoggingDispatcher`, so with
//! `RUST_LOG=debug` the dispatched actions show up in the log.
//!
//! # Usage
//!
//! ```sh
//! # Successful request
//! RUST_LOG=debug cargo run -p fetch-demo
//!
//! # Failing request, only log failures
//! RUST_LOG=debug cargo run -p fetch-demo -- --fail --include '*/FAILURE'
//! ```

mod api;
mod state;

use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_actions::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::{fetch_user, FetchOptions, User};
use crate::state::{reducer, AppState, RequestMeta, UserAction};

/// Fetch demo - async-actions example
#[derive(Parser, Debug)]
#[command(name = "fetch")]
#[command(about = "Dispatch start/success/failure actions around a simulated request")]
struct Args {
    /// User id to fetch
    #[arg(long, default_value = "1")]
    user: u64,

    /// Namespace for the action ids
    #[arg(long, short, default_value = "users")]
    namespace: String,

    /// Make the request fail
    #[arg(long)]
    fail: bool,

    /// Simulated latency in milliseconds
    #[arg(long, default_value = "50")]
    latency_ms: u64,

    /// Comma-separated glob patterns of action types to log
    #[arg(long)]
    include: Option<String>,

    /// Comma-separated glob patterns of action types not to log
    #[arg(long)]
    exclude: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let store = Arc::new(Mutex::new(AppState::default()));
    let reducer_store = Arc::clone(&store);
    let reduce = move |action: UserAction| {
        let mut state = reducer_store.lock().unwrap_or_else(PoisonError::into_inner);
        reducer(&mut state, action);
    };

    let filter = ActionLoggerConfig::new(args.include.as_deref(), args.exclude.as_deref());
    let runner = try_catch_dispatch(LoggingDispatcher::new(reduce, filter));

    let fetch = DefaultAsyncActionCreator::<User, RequestMeta>::namespaced(&args.namespace, "fetch")
        .with_meta(RequestMeta { user_id: args.user });

    let options = FetchOptions {
        latency: Duration::from_millis(args.latency_ms),
        fail: args.fail,
    };
    let result = runner
        .run(&fetch, || fetch_user(args.user, options))
        .await;

    let state = store.lock().unwrap_or_else(PoisonError::into_inner);
    match serde_json::to_string_pretty(&*state) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: could not render state: {}", e),
    }

    match result {
        Ok(user) => {
            tracing::info!(user = %user.name, "request finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
