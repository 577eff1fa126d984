//! Centralized limits and thresholds for the checker.
//!
//! Keeping the numbers here means the solver and any driver agree on the same
//! ceilings without duplicating magic constants at call sites.

/// Maximum number of nested type pairs before a subtype check gives up.
///
/// Coinductive assumptions stop cyclic expansions, but a generic interface
/// whose methods mention ever-larger instantiations of itself
/// (`List[T]#nest: () -> List[List[T]]`) produces a fresh constraint at every
/// level and never cycles. The ceiling turns that into a
/// `DepthExceeded` failure instead of a stack overflow.
pub const MAX_SUBTYPE_DEPTH: usize = 100;

/// Initial capacity of the subtype memo table.
pub const SUBTYPE_CACHE_CAPACITY: usize = 256;
