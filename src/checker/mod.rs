//! Running a Flow check for one document.
//!
//! [`TypeChecker::check`] is the entry point for editor integrations: it
//! never fails, only logs and returns fewer diagnostics.
//! [`TypeChecker::try_check`] exposes the failure for callers that report it.

pub mod pipeline;
pub mod request;

pub use pipeline::{CheckOutcome, TypeChecker};
pub use request::CheckRequest;
