//! HTTP handler modules for the tracepad API.
//!
//! Each sub-module implements thin handlers that parse requests, delegate to
//! the [`crate::controller::ExecutionController`] or the editor buffer, and
//! return JSON responses. No business logic lives in handlers.

pub mod complexity;
pub mod inputs;
pub mod layout;
pub mod run;
pub mod source;
pub mod trace;
