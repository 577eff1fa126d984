//! Interface and method signature compatibility.
//!
//! An interface satisfies another when it has every method the other has and
//! each of those methods satisfies the other's overload set: every required
//! overload must be matched by at least one candidate overload.

use crate::constraint::{Assumptions, Constraint};
use crate::interface::{Interface, InterfaceBuilder, Method};
use crate::method_type::{Block, MethodType};
use crate::result::{CheckResult, FailureReason};
use crate::substitution::Substitution;
use crate::trace::{Trace, TraceEntry};
use crate::types::{Type, TypeVar};
use rbz_common::interner::Atom;
use std::borrow::Cow;

use super::super::SubtypeChecker;

impl<'a, B: InterfaceBuilder + ?Sized> SubtypeChecker<'a, B> {
    pub(crate) fn check_interface(
        &mut self,
        sub: &Interface,
        sup: &Interface,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        for (name, sup_method) in &sup.methods {
            let Some(sub_method) = sub.get(*name) else {
                return CheckResult::failure(FailureReason::MethodMissing(*name), trace);
            };
            let result = self.check_method(*name, sub_method, sup_method, assumptions, trace);
            if result.is_failure() {
                return result;
            }
        }
        CheckResult::Success
    }

    fn check_method(
        &mut self,
        name: Atom,
        sub: &Method,
        sup: &Method,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        let mut scope = trace.scope(TraceEntry::Method { name });

        if sub.types.is_empty() && !sup.types.is_empty() {
            return CheckResult::failure(FailureReason::MethodMissing(name), &scope);
        }

        for sup_type in &sup.types {
            let mut first_failure = None;
            for sub_type in &sub.types {
                let result =
                    self.check_overload_pair(name, sub_type, sup_type, assumptions, &mut scope);
                if result.is_success() {
                    first_failure = None;
                    break;
                }
                first_failure.get_or_insert(result);
            }
            if let Some(failure) = first_failure {
                return failure;
            }
        }
        CheckResult::Success
    }

    /// Instantiate both overloads with fresh variables and compare them.
    ///
    /// Corresponding fresh variables of the two sides are assumed equal.
    fn check_overload_pair(
        &mut self,
        name: Atom,
        sub: &MethodType,
        sup: &MethodType,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        let (sub_subst, sub_vars) = Substitution::fresh(sub.type_params(), self.fresh);
        let (sup_subst, sup_vars) = Substitution::fresh(sup.type_params(), self.fresh);

        let mut assumptions = Assumptions::new(assumptions);
        assumptions.extend(sub_vars.iter().zip(&sup_vars).flat_map(|(&a, &b)| {
            [
                Constraint::new(Type::Var(a), Type::Var(b)),
                Constraint::new(Type::Var(b), Type::Var(a)),
            ]
        }));

        let sub = instantiate(sub, &sub_subst, &sub_vars);
        let sup = instantiate(sup, &sup_subst, &sup_vars);

        let mut scope = trace.scope(TraceEntry::MethodType {
            name,
            sub: Box::new((*sub).clone()),
            sup: Box::new((*sup).clone()),
        });
        self.check_method_type(name, &sub, &sup, &assumptions, &mut scope)
    }

    /// Params, then block presence, then block shape, then return type.
    pub(crate) fn check_method_type(
        &mut self,
        name: Atom,
        sub: &MethodType,
        sup: &MethodType,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        self.check_method_params(name, sub.params(), sup.params(), assumptions, trace)
            .then(|| check_block_given(name, sub.block(), sup.block(), trace))
            .then(|| self.check_block(name, sub.block(), sup.block(), assumptions, trace))
            .then(|| {
                let constraint =
                    Constraint::new(sub.return_type().clone(), sup.return_type().clone());
                self.check(&constraint, assumptions, trace)
            })
    }

    /// Block parameters are compared with the roles swapped: the method's
    /// caller supplies the block, so the block the super signature promises
    /// to call must accept what the sub signature would pass.
    fn check_block(
        &mut self,
        name: Atom,
        sub: Option<&Block>,
        sup: Option<&Block>,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        let (Some(sub), Some(sup)) = (sub, sup) else {
            return CheckResult::Success;
        };
        self.check_method_params(name, sup.params(), sub.params(), assumptions, trace)
            .then(|| {
                let constraint =
                    Constraint::new(sub.return_type().clone(), sup.return_type().clone());
                self.check(&constraint, assumptions, trace)
            })
    }
}

fn check_block_given(
    name: Atom,
    sub: Option<&Block>,
    sup: Option<&Block>,
    trace: &Trace,
) -> CheckResult {
    if sub.is_some() == sup.is_some() {
        CheckResult::Success
    } else {
        CheckResult::failure(FailureReason::BlockMismatch(name), trace)
    }
}

fn instantiate<'m>(ty: &'m MethodType, s: &Substitution, vars: &[TypeVar]) -> Cow<'m, MethodType> {
    if vars.is_empty() {
        Cow::Borrowed(ty)
    } else {
        Cow::Owned(ty.instantiate(s))
    }
}
