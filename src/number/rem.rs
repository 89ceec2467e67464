use crate::number::Number;
use std::ops::Rem;

// Callers guard against a zero divisor, see `&Value % &Value`.
impl Rem for &Number {
    type Output = Number;

    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a % b),
            (a, b) => Number::Float(a.to_float() % b.to_float()),
        }
    }
}
