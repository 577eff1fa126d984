//! Subtype rules for method tables, split out of `subtype.rs`.
//!
//! - `methods`: interface, overload, and per-signature checks
//! - `params`: parameter-list pairing and variance

mod methods;
mod params;
