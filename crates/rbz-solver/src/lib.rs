//! Structural Subtyping Solver
//!
//! This crate decides structural subtyping between Ruby-style type
//! expressions and provides the algebra over method signatures that a
//! gradual type checker needs. It uses:
//!
//! - **Coinductive checking**: recursive interfaces terminate through
//!   per-path assumptions
//! - **Session memoization**: each distinct constraint is decided once per
//!   checker
//! - **Builder seam**: nominal names are expanded into method tables by an
//!   [`InterfaceBuilder`] supplied by the embedder
//!
//! Failures are plain data ([`Failure`]) carrying a reason and the path of
//! pairs that led to it; rendering them is left to the caller.
mod config;
mod constraint;
pub mod interface;
mod method_type;
mod params;
mod result;
pub mod store;
mod substitution;
mod subtype;
mod subtype_rules;
mod trace;
pub mod types;

pub use config::CheckerConfig;
pub use constraint::{Assumptions, Constraint};
pub use interface::{BuildError, Interface, InterfaceBuilder, InterfaceTemplate, Method};
pub use method_type::{Block, MethodDecl, MethodType};
pub use params::{ParamKind, Params};
pub use result::{CheckResult, Failure, FailureReason};
pub use store::InterfaceStore;
pub use substitution::{FreshVarGen, Substitution};
pub use subtype::SubtypeChecker;
pub use trace::{Trace, TraceEntry, TraceScope};
pub use types::{NameKind, NameType, ProcType, Type, TypeVar};

pub use rbz_common::interner::{Atom, Interner};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
mod test_fixtures;
#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
#[cfg(test)]
#[path = "../tests/params_tests.rs"]
mod params_tests;
#[cfg(test)]
#[path = "../tests/method_type_tests.rs"]
mod method_type_tests;
#[cfg(test)]
#[path = "../tests/trace_result_tests.rs"]
mod trace_result_tests;
#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod subtype_tests;
