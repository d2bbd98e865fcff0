//! Orchestration services.
//!
//! Services sit between the interaction layer (`app`) and the
//! infrastructure boundary (`backend`): they talk to the backend, apply
//! confirmed results to the store, and surface failures as notices.

mod action_service;

pub use action_service::ActionService;
