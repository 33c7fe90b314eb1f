//! Trestle Core
//!
//! Core types for the Trestle build trigger and poller.
//!
//! This crate contains the domain types shared between the HTTP client
//! (which decodes them) and the pollers (which observe them): queue items,
//! builds, pending input gates, log chunks and job paths.

pub mod domain;
