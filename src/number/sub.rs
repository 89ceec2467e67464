use crate::number::Number;
use std::ops::Sub;

impl Sub for &Number {
    type Output = Number;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a - b),
            (a, b) => Number::Float(a.to_float() - b.to_float()),
        }
    }
}
