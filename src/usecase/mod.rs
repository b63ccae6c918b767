//! Usecase layer: application workflows + events.

pub mod analyze;
pub mod batch;
pub mod event;
pub mod stats;
pub mod validate;
