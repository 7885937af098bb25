//! Device implementations.
//!
//! Real transports (serial, radio bridge) live outside this crate; the
//! scripted devices here back tests and examples.

pub mod mock;
