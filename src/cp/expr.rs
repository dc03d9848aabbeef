//! Variables, literals and integer linear expressions.
//!
//! Variables are plain indices into the owning [`CpModel`](super::CpModel);
//! they carry no reference to it and are `Copy`. Expressions use `i64`
//! coefficients throughout, so every quantity in a model is integer-exact.

use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub};

/// Index of a decision variable inside its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in the model.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A 0/1 decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoolVar(pub(crate) VarId);

/// A bounded integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntVar(pub(crate) VarId);

impl BoolVar {
    /// Underlying variable id.
    #[inline]
    pub fn id(&self) -> VarId {
        self.0
    }

    /// The literal "this variable is true".
    pub fn literal(self) -> Literal {
        Literal {
            var: self,
            negated: false,
        }
    }
}

impl Not for BoolVar {
    type Output = Literal;

    /// The literal "this variable is false".
    fn not(self) -> Literal {
        Literal {
            var: self,
            negated: true,
        }
    }
}

impl IntVar {
    /// Underlying variable id.
    #[inline]
    pub fn id(&self) -> VarId {
        self.0
    }
}

/// A boolean variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub var: BoolVar,
    pub negated: bool,
}

impl Literal {
    /// The literal as a 0/1 expression: `x` or `1 - x`.
    pub fn to_expr(self) -> LinearExpr {
        if self.negated {
            LinearExpr::constant(1) - LinearExpr::from(self.var)
        } else {
            LinearExpr::from(self.var)
        }
    }

    /// Truth value of the literal given the value of its variable.
    pub fn holds(&self, var_is_true: bool) -> bool {
        var_is_true != self.negated
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        var.literal()
    }
}

/// Relation between a linear expression and a right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl Comparison {
    /// Whether `lhs ⋈ rhs` holds.
    pub fn holds(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

/// `Σ coefficient·variable + constant`, with integer coefficients.
///
/// Terms are kept in insertion order and may repeat a variable; consumers
/// evaluate them additively, so `x + x` and `2x` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(i64, VarId)>,
    constant: i64,
}

impl LinearExpr {
    /// The zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant expression.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Sum of the given boolean variables.
    pub fn sum(vars: impl IntoIterator<Item = BoolVar>) -> Self {
        let mut expr = Self::new();
        for v in vars {
            expr.add_term(1, v.id());
        }
        expr
    }

    /// Adds `coefficient · var`.
    pub fn add_term(&mut self, coefficient: i64, var: VarId) {
        if coefficient != 0 {
            self.terms.push((coefficient, var));
        }
    }

    /// Builder: adds `coefficient · var`.
    pub fn with_term(mut self, coefficient: i64, var: impl Into<VarId>) -> Self {
        self.add_term(coefficient, var.into());
        self
    }

    /// Adds a constant offset.
    pub fn add_constant(&mut self, value: i64) {
        self.constant += value;
    }

    /// Terms `(coefficient, variable)`.
    pub fn terms(&self) -> &[(i64, VarId)] {
        &self.terms
    }

    /// Constant offset.
    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// Whether the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression given a value per variable index.
    pub fn evaluate(&self, value_of: impl Fn(VarId) -> i64) -> i64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(c, v)| acc + c * value_of(v))
    }

    /// Multiplies every coefficient and the constant by `factor`.
    pub fn scaled(mut self, factor: i64) -> Self {
        if factor == 0 {
            return Self::new();
        }
        for (c, _) in &mut self.terms {
            *c *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl From<BoolVar> for VarId {
    fn from(v: BoolVar) -> Self {
        v.0
    }
}

impl From<IntVar> for VarId {
    fn from(v: IntVar) -> Self {
        v.0
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(v: BoolVar) -> Self {
        Self::new().with_term(1, v)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(v: IntVar) -> Self {
        Self::new().with_term(1, v)
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, rhs: Self) {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl Add for LinearExpr {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = Self;

    fn neg(self) -> Self {
        self.scaled(-1)
    }
}

impl Sub for LinearExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul<i64> for LinearExpr {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        self.scaled(factor)
    }
}

impl std::iter::Sum for LinearExpr {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, e| acc + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(i: usize) -> BoolVar {
        BoolVar(VarId(i))
    }

    #[test]
    fn test_sum_and_evaluate() {
        let expr = LinearExpr::sum([b(0), b(1), b(2)]) - LinearExpr::constant(1);
        let values = [1, 0, 1];
        assert_eq!(expr.evaluate(|v| values[v.index()]), 1);
        assert_eq!(expr.terms().len(), 3);
        assert_eq!(expr.constant_term(), -1);
    }

    #[test]
    fn test_scaling() {
        let expr = (LinearExpr::from(b(0)) + LinearExpr::constant(2)) * 3;
        assert_eq!(expr.evaluate(|_| 1), 9);
        assert!((expr * 0).is_constant());
    }

    #[test]
    fn test_negated_literal_expression() {
        let lit = !b(4);
        let expr = lit.to_expr();
        assert_eq!(expr.evaluate(|_| 1), 0);
        assert_eq!(expr.evaluate(|_| 0), 1);
        assert!(lit.holds(false));
        assert!(!lit.holds(true));
        assert!(b(4).literal().holds(true));
    }

    #[test]
    fn test_zero_coefficient_dropped() {
        let expr = LinearExpr::new().with_term(0, b(1));
        assert!(expr.is_constant());
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::Eq.holds(1, 1));
        assert!(Comparison::Le.holds(0, 1));
        assert!(!Comparison::Ge.holds(0, 1));
    }
}
