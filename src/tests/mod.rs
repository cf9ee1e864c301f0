//! Internal test modules - whitebox tests with crate access
//!
//! Tests here exercise whole flows across modules (switch, queueing,
//! transitions against in-memory surfaces) with access to internal
//! details where needed.

mod acceptance_queueing;
