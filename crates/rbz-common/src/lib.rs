//! Common types and utilities for the rbz type checker.
//!
//! This crate provides foundational types used across all rbz crates:
//! - String interning (`Atom`, `Interner`)
//! - Checker limits and thresholds
//! - Tracing subscriber configuration

// String interning for type, method and variable names
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;

// Opt-in tracing output for debugging subtype checks
pub mod tracing_config;
