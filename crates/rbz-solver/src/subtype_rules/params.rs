//! Parameter-list compatibility.
//!
//! The two lists are first lined up into `(sub slot, super slot)` pairs. Each
//! pair is then checked contravariantly: whatever a caller of the super
//! signature may pass in that slot must be accepted by the sub signature.
//!
//! | super shape                  | pairing                                           |
//! |------------------------------|---------------------------------------------------|
//! | has rest                     | sub needs rest; overflow on either side pairs     |
//! |                              | with the other side's rest; rests pair last       |
//! | no rest, sub has rest        | fixed slots pairwise, extra super slots vs rest   |
//! | no rest, sub fixed >= super  | pairwise; an extra required sub slot fails        |
//! | no rest, sub fixed < super   | fails                                             |

use crate::constraint::{Assumptions, Constraint};
use crate::interface::InterfaceBuilder;
use crate::params::{ParamKind, Params};
use crate::result::{CheckResult, Failure, FailureReason};
use crate::trace::Trace;
use crate::types::Type;
use rbz_common::interner::Atom;

use super::super::SubtypeChecker;

impl<'a, B: InterfaceBuilder + ?Sized> SubtypeChecker<'a, B> {
    pub(crate) fn check_method_params(
        &mut self,
        name: Atom,
        sub: &Params,
        sup: &Params,
        assumptions: &Assumptions<'_>,
        trace: &mut Trace,
    ) -> CheckResult {
        let Some(pairs) = param_pairs(sub, sup) else {
            return CheckResult::failure(FailureReason::ParameterMismatch(name), trace);
        };

        for (sub_type, sup_type) in pairs {
            let constraint = Constraint::new(sup_type.clone(), sub_type.clone());
            let result = self.check(&constraint, assumptions, trace);
            if result.is_failure() {
                return result.map_failure(|failure| match failure.reason {
                    FailureReason::DepthExceeded => failure,
                    _ => Failure {
                        reason: FailureReason::ParameterMismatch(name),
                        trace: failure.trace,
                    },
                });
            }
        }
        CheckResult::Success
    }
}

/// Line up the slots of `sub` and `sup`.
///
/// Returns `None` when the shapes cannot be reconciled at all.
fn param_pairs<'p>(sub: &'p Params, sup: &'p Params) -> Option<Vec<(&'p Type, &'p Type)>> {
    let sub_flat: Vec<(ParamKind, &Type)> = sub.flat_unnamed_params().collect();
    let sup_flat: Vec<(ParamKind, &Type)> = sup.flat_unnamed_params().collect();
    let mut pairs = Vec::with_capacity(sub_flat.len().max(sup_flat.len()) + 1);

    match (&sup.rest, &sub.rest) {
        (Some(sup_rest), sub_rest) => {
            let sub_rest = sub_rest.as_ref()?;
            for i in 0..sub_flat.len().max(sup_flat.len()) {
                match (sub_flat.get(i), sup_flat.get(i)) {
                    (Some(&(_, a)), Some(&(_, b))) => pairs.push((a, b)),
                    (Some(&(_, a)), None) => pairs.push((a, sup_rest)),
                    (None, Some(&(_, b))) => pairs.push((sub_rest, b)),
                    (None, None) => break,
                }
            }
            pairs.push((sub_rest, sup_rest));
        }
        (None, Some(sub_rest)) => {
            for (&(_, a), &(_, b)) in sub_flat.iter().zip(&sup_flat) {
                pairs.push((a, b));
            }
            for &(_, b) in sup_flat.iter().skip(sub_flat.len()) {
                pairs.push((sub_rest, b));
            }
        }
        (None, None) if sub_flat.len() >= sup_flat.len() => {
            for (i, &(kind, a)) in sub_flat.iter().enumerate() {
                match sup_flat.get(i) {
                    Some(&(_, b)) => pairs.push((a, b)),
                    None if kind == ParamKind::Required => return None,
                    None => break,
                }
            }
        }
        (None, None) => return None,
    }

    let sub_keywords = sub.flat_keywords();
    for (name, &b) in &sup.flat_keywords() {
        match sub_keywords.get(name) {
            Some(&a) => pairs.push((a, b)),
            None => pairs.push((sub.rest_keywords.as_ref()?, b)),
        }
    }

    if sub
        .required_keywords
        .keys()
        .any(|name| !sup.required_keywords.contains_key(name))
    {
        return None;
    }

    if let (Some(a), Some(b)) = (&sub.rest_keywords, &sup.rest_keywords) {
        pairs.push((a, b));
    }

    Some(pairs)
}
