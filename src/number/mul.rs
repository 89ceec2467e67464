use crate::number::Number;
use std::ops::Mul;

impl Mul for &Number {
    type Output = Number;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a * b),
            (a, b) => Number::Float(a.to_float() * b.to_float()),
        }
    }
}
