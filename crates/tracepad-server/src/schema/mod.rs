//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for one area of the
//! playground. Types use serde derives for JSON serialization/deserialization.

pub mod complexity;
pub mod layout;
pub mod session;
pub mod source;
pub mod trace;
