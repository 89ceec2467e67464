use crate::number::Number;
use std::ops::Add;

impl Add for &Number {
    type Output = Number;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a + b),
            (a, b) => Number::Float(a.to_float() + b.to_float()),
        }
    }
}
