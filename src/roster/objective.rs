//! Big-M lexicographic objective.
//!
//! Given cost terms `(C1, M1) … (Ck, Mk)` in list order, builds
//!
//! ```text
//! C1 + M1·C2 + M1·M2·C3 + … + (M1·…·M(k−1))·Ck
//! ```
//!
//! The weight of `Ci` is the product of the bounds before it, which equals
//! the largest weighted value `C(i−1)` can reach. Weights therefore grow
//! along the list: the *last* term carries the most weight and `C1` the
//! least, mostly separating solutions that tie elsewhere. The ordering is
//! not strict; earlier terms all sitting at their bounds can together
//! outweigh one unit of a later term.
//!
//! A bound of `0` belongs to a term that is identically zero; it enters the
//! products as `1` so it does not erase the terms that follow it.
//!
//! # Reference
//! Marler & Arora (2004), "Survey of multi-objective optimization methods
//! for engineering", §3.3 (weighted lexicographic method)

use super::fairness::CostTerm;
use super::ScheduleError;
use crate::cp::LinearExpr;
use crate::models::CostKind;

/// Weights for terms with the given bounds: `w1 = 1`, `wi = Π_{j<i} max(Mj, 1)`.
///
/// Returns `None` when a product does not fit in `i64`.
pub fn lexicographic_weights(bounds: &[i64]) -> Option<Vec<i64>> {
    let mut weights = Vec::with_capacity(bounds.len());
    let mut weight: i64 = 1;
    for (i, &bound) in bounds.iter().enumerate() {
        weights.push(weight);
        if i + 1 < bounds.len() {
            weight = weight.checked_mul(bound.max(1))?;
        }
    }
    Some(weights)
}

/// A cost term placed in the objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTerm {
    pub term: CostTerm,
    pub weight: i64,
}

/// The composed objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    /// Terms in list order; the last one weighs most.
    pub terms: Vec<WeightedTerm>,
    pub expr: LinearExpr,
}

impl Objective {
    /// The entry for `kind`.
    pub fn get(&self, kind: CostKind) -> Option<&WeightedTerm> {
        self.terms.iter().find(|t| t.term.kind == kind)
    }

    /// Largest value the objective can take.
    pub fn upper_bound(&self) -> Option<i64> {
        self.terms.iter().try_fold(0i64, |acc, t| {
            t.term
                .upper_bound
                .checked_mul(t.weight)
                .and_then(|v| acc.checked_add(v))
        })
    }
}

/// Orders cost terms by a priority list and weights them.
#[derive(Debug, Clone)]
pub struct ObjectiveComposer {
    priority: Vec<CostKind>,
}

impl Default for ObjectiveComposer {
    fn default() -> Self {
        Self::new(CostKind::DEFAULT_PRIORITY.to_vec())
    }
}

impl ObjectiveComposer {
    /// Composer for the given order; the last entry weighs most.
    pub fn new(priority: Vec<CostKind>) -> Self {
        Self { priority }
    }

    /// Order of the terms; weights grow along it.
    pub fn priority(&self) -> &[CostKind] {
        &self.priority
    }

    /// Builds the objective from `terms`, which may come in any order.
    ///
    /// # Errors
    /// - [`ScheduleError::MissingCost`] if a prioritized kind has no term, or
    ///   a term has no place in the priority order.
    /// - [`ScheduleError::DuplicateCost`] if a kind is prioritized twice.
    /// - [`ScheduleError::ObjectiveOverflow`] if the weights overflow `i64`.
    pub fn compose(&self, mut terms: Vec<CostTerm>) -> Result<Objective, ScheduleError> {
        let mut ordered: Vec<CostTerm> = Vec::with_capacity(self.priority.len());
        for &kind in &self.priority {
            if ordered.iter().any(|t| t.kind == kind) {
                return Err(ScheduleError::DuplicateCost(kind));
            }
            let pos = terms
                .iter()
                .position(|t| t.kind == kind)
                .ok_or(ScheduleError::MissingCost(kind))?;
            ordered.push(terms.swap_remove(pos));
        }
        // Every term must be placed; report leftovers in default priority order.
        if let Some(&kind) = CostKind::DEFAULT_PRIORITY
            .iter()
            .find(|&&k| terms.iter().any(|t| t.kind == k))
        {
            return Err(ScheduleError::MissingCost(kind));
        }

        let bounds: Vec<i64> = ordered.iter().map(|t| t.upper_bound).collect();
        let weights = lexicographic_weights(&bounds).ok_or(ScheduleError::ObjectiveOverflow)?;

        let expr = ordered
            .iter()
            .zip(&weights)
            .map(|(t, &w)| t.expr.clone().scaled(w))
            .sum();
        let objective = Objective {
            terms: ordered
                .into_iter()
                .zip(weights)
                .map(|(term, weight)| WeightedTerm { term, weight })
                .collect(),
            expr,
        };

        // The objective itself must stay representable too.
        objective
            .upper_bound()
            .ok_or(ScheduleError::ObjectiveOverflow)?;
        Ok(objective)
    }
}
