//! Core types shared across kubegraph facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility and by the structured error facility, so that both sides
//! agree on one vocabulary.

pub mod schema;
