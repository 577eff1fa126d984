//! Structural subtype checking.
//!
//! The checker answers "is `sub` usable where `super` is expected?" by
//! expanding nominal types into their method tables and comparing the
//! tables method by method. Recursive interfaces are handled coinductively:
//! a constraint already being checked further up the current path is assumed
//! to hold.
//!
//! ## Memoization
//!
//! Every completed check is cached for the lifetime of the checker. A cached
//! failure stores its trace relative to the point where the check started, so
//! replaying it from a different path yields the current path followed by the
//! cached suffix instead of the path of whoever computed it first.
//!
//! The depth ceiling counts nested type pairs only; method and overload
//! entries in the trace do not use it up. Results influenced by the ceiling are path dependent and are never
//! cached.
//!
//! ## Rule order
//!
//! | sub \ super         | rule                                       |
//! |---------------------|--------------------------------------------|
//! | `sub == super`      | success                                    |
//! | either is `Any`     | success                                    |
//! | Name / Name         | expand both, compare interfaces            |
//! | non-var / Var       | success                                    |
//! | Union / _           | success if ANY member is a subtype         |
//! | _ / Union           | success if sub is a subtype of ALL members |
//! | anything else       | `UnknownPair`                              |

use crate::config::CheckerConfig;
use crate::constraint::{Assumptions, Constraint};
use crate::interface::{BuildError, Interface, InterfaceBuilder};
use crate::result::{CheckResult, FailureReason};
use crate::substitution::FreshVarGen;
use crate::trace::{Trace, TraceEntry};
use crate::types::{NameType, Type};
use rbz_common::limits::SUBTYPE_CACHE_CAPACITY;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

/// Subtype checker for one checking session.
pub struct SubtypeChecker<'a, B: InterfaceBuilder + ?Sized> {
    pub(crate) builder: &'a B,
    pub(crate) fresh: &'a FreshVarGen,
    config: CheckerConfig,
    cache: FxHashMap<Constraint, CheckResult>,
    /// Number of type-pair checks currently open on this path.
    depth: usize,
    /// Bumped every time the depth ceiling is hit; a check that saw it move
    /// is not cached.
    depth_hits: u32,
}

impl<'a, B: InterfaceBuilder + ?Sized> SubtypeChecker<'a, B> {
    pub fn new(builder: &'a B, fresh: &'a FreshVarGen) -> Self {
        Self {
            builder,
            fresh,
            config: CheckerConfig::default(),
            cache: FxHashMap::with_capacity_and_hasher(SUBTYPE_CACHE_CAPACITY, Default::default()),
            depth: 0,
            depth_hits: 0,
        }
    }

    pub fn with_config(mut self, config: CheckerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Number of type-pair checks open on the current path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check `sub <: sup` from an empty path.
    pub fn is_subtype(&mut self, sub: &Type, sup: &Type) -> CheckResult {
        let mut trace = Trace::new();
        let constraint = Constraint::new(sub.clone(), sup.clone());
        self.check(&constraint, &Assumptions::root(), &mut trace)
    }

    /// Number of memoized constraints.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Check one constraint on the current path.
    pub fn check(
        &mut self,
        constraint: &Constraint,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        if let Some(cached) = self.cache.get(constraint) {
            trace!(
                sub = ?constraint.sub_type,
                sup = ?constraint.super_type,
                success = cached.is_success(),
                "subtype cache hit"
            );
            return cached.clone().merge_trace(trace);
        }

        if assumptions.contains(constraint) {
            trace!(
                sub = ?constraint.sub_type,
                sup = ?constraint.super_type,
                "assumed on current path"
            );
            return CheckResult::Success;
        }

        if self.depth >= self.config.max_depth {
            self.depth_hits += 1;
            debug!(
                depth = self.depth,
                max_depth = self.config.max_depth,
                "subtype check depth exceeded"
            );
            return CheckResult::failure(FailureReason::DepthExceeded, trace);
        }

        let prefix = trace.len();
        let depth_hits = self.depth_hits;
        let result = {
            let mut scope = trace.scope(TraceEntry::Type {
                sub: constraint.sub_type.clone(),
                sup: constraint.super_type.clone(),
            });
            let assumptions = Assumptions::with(assumptions, constraint.clone());
            self.depth += 1;
            let result = self.check0(constraint, &assumptions, &mut scope);
            self.depth -= 1;
            result
        };

        if let Some(failure) = result.as_failure() {
            debug!(
                sub = ?constraint.sub_type,
                sup = ?constraint.super_type,
                reason = ?failure.reason,
                "subtype check failed"
            );
        }

        if self.depth_hits == depth_hits {
            let relative = result.clone().map_failure(|failure| failure.drop_prefix(prefix));
            self.cache.insert(constraint.clone(), relative);
        }

        result
    }

    fn check0(
        &mut self,
        constraint: &Constraint,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        let sub = &constraint.sub_type;
        let sup = &constraint.super_type;

        if sub == sup {
            return CheckResult::Success;
        }
        if matches!(sub, Type::Any) || matches!(sup, Type::Any) {
            return CheckResult::Success;
        }

        match (sub, sup) {
            (Type::Name(sub_name), Type::Name(sup_name)) => {
                let sub_interface = match self.expand(sub_name) {
                    Ok(interface) => interface,
                    Err(err) => return self.build_failure(&err, constraint, trace),
                };
                let sup_interface = match self.expand(sup_name) {
                    Ok(interface) => interface,
                    Err(err) => return self.build_failure(&err, constraint, trace),
                };
                return self.check_interface(&sub_interface, &sup_interface, assumptions, trace);
            }
            (_, Type::Var(_)) if !sub.is_var() => return CheckResult::Success,
            _ => {}
        }

        if let Type::Union(members) = sub {
            let mut first_failure = None;
            for member in members {
                let result =
                    self.check(&Constraint::new(member.clone(), sup.clone()), assumptions, trace);
                if result.is_success() {
                    return result;
                }
                first_failure.get_or_insert(result);
            }
            return first_failure.unwrap_or_else(|| {
                CheckResult::failure(FailureReason::UnknownPair(constraint.clone()), trace)
            });
        }

        if let Type::Union(members) = sup {
            for member in members {
                let result =
                    self.check(&Constraint::new(sub.clone(), member.clone()), assumptions, trace);
                if result.is_failure() {
                    return result;
                }
            }
            return CheckResult::Success;
        }

        CheckResult::failure(FailureReason::UnknownPair(constraint.clone()), trace)
    }

    /// Expand a nominal type into its interface.
    fn expand(&self, name: &NameType) -> Result<Interface, BuildError> {
        let template = self.builder.build(name.name, name.kind)?;
        let self_type = Type::Name(name.clone());
        let instance_type = name.instance_type();
        let module_type = self.module_type(name);
        Ok(template.instantiate(&self_type, &name.args, &instance_type, module_type.as_ref()))
    }

    /// The singleton projection of `name`, if it is a class or a module.
    fn module_type(&self, name: &NameType) -> Option<Type> {
        if self.builder.is_class(name.name) {
            Some(name.class_type())
        } else if self.builder.is_module(name.name) {
            Some(name.module_type())
        } else {
            None
        }
    }

    fn build_failure(&self, err: &BuildError, constraint: &Constraint, trace: &Trace) -> CheckResult {
        warn!(error = %err, "cannot expand nominal type");
        CheckResult::failure(FailureReason::UnknownPair(constraint.clone()), trace)
    }
}
