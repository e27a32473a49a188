//! Test modules for check-in
//!
//! `controller` exercises the state machine directly; `session` drives the
//! spawned session against an in-memory attendance service on paused time.
