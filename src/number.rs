// ABOUTME: Mixed integer/float numeric tower with the widening rule the evaluator relies on

use std::fmt;

/// A Clojure-flavored number: integer mode is preserved as long as possible, but any
/// mixed-mode arithmetic (and `/` unconditionally) widens to floating point.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    fn widen_pair(a: Number, b: Number) -> (Number, Number) {
        match (a, b) {
            (Number::Int(_), Number::Int(_)) => (a, b),
            _ => (Number::Float(a.as_f64()), Number::Float(b.as_f64())),
        }
    }

    pub fn add(self, rhs: Number) -> Number {
        match Self::widen_pair(self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_add(b)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Number {
        match Self::widen_pair(self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_sub(b)),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Number {
        match Self::widen_pair(self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_mul(b)),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// Division always widens to floating point, regardless of the operand modes.
    pub fn div(self, rhs: Number) -> Number {
        Number::Float(self.as_f64() / rhs.as_f64())
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(-i),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Integer part of a/b, rounded toward zero.
    pub fn quot(self, rhs: Number) -> Number {
        match Self::widen_pair(self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_div(b)),
            (a, b) => Number::Float((a.as_f64() / b.as_f64()).trunc()),
        }
    }

    /// `rem`/`mod` share the same behavior in this core: `a - quot(a, b) * b`.
    pub fn rem(self, rhs: Number) -> Number {
        let q = self.quot(rhs);
        self.sub(q.mul(rhs))
    }

    pub fn inc(self) -> Number {
        self.add(Number::Int(1))
    }

    pub fn dec(self) -> Number {
        self.sub(Number::Int(1))
    }

    pub fn max(self, rhs: Number) -> Number {
        if self.as_f64() >= rhs.as_f64() {
            self
        } else {
            rhs
        }
    }

    pub fn min(self, rhs: Number) -> Number {
        if self.as_f64() <= rhs.as_f64() {
            self
        } else {
            rhs
        }
    }

    pub fn compare(self, rhs: Number) -> std::cmp::Ordering {
        self.as_f64()
            .partial_cmp(&rhs.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.as_f64() == other.as_f64()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_mode_stays_integer() {
        assert!(matches!(Number::Int(1).add(Number::Int(2)), Number::Int(3)));
    }

    #[test]
    fn mixed_mode_widens() {
        match Number::Int(1).add(Number::Float(2.0)) {
            Number::Float(f) => assert_eq!(f, 3.0),
            Number::Int(_) => panic!("expected float"),
        }
    }

    #[test]
    fn division_always_widens() {
        match Number::Int(1).div(Number::Int(2)) {
            Number::Float(f) => assert_eq!(f, 0.5),
            Number::Int(_) => panic!("expected float"),
        }
    }

    #[test]
    fn quot_truncates_toward_zero() {
        match Number::Int(-7).quot(Number::Int(2)) {
            Number::Int(i) => assert_eq!(i, -3),
            Number::Float(_) => panic!("expected int"),
        }
    }

    #[test]
    fn rem_matches_a_minus_quot_times_b() {
        match Number::Int(-7).rem(Number::Int(2)) {
            Number::Int(i) => assert_eq!(i, -1),
            Number::Float(_) => panic!("expected int"),
        }
    }
}
