// Library target exists for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can drive the controller via `quizr::app::*` / `quizr::session::*`.
// Some helpers are only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod engine;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;

// Private: only the binary's event loop uses it
mod event;
