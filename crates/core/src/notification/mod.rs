//! Notification policy
//!
//! Decides whether a run notifies and composes the message. Everything here
//! is a pure function of its inputs; persistence and delivery happen in the
//! orchestrator after the decision is made.

pub mod body;
pub mod policy;

pub use body::compose_body;
pub use policy::{decide, PolicyInputs};
