//! Core domain types
//!
//! These types mirror the JSON documents served by a Jenkins controller.
//! The pollers never mutate them; they only observe successive snapshots.

pub mod build;
pub mod input;
pub mod job;
pub mod log;
pub mod queue;
