//! HTTP/JSON front-end controller for the tracepad code playground.
//!
//! Owns the single-flight execution lifecycle on top of the
//! `tracepad-core` session record, talks to the remote execution service
//! over HTTP, and exposes the session (inputs, output, trace playback,
//! complexity projection, editor buffer) as a REST API.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
