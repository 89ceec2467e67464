use crate::number::Number;
use std::ops::Div;

// Callers guard against a zero divisor, see `&Value / &Value`.
impl Div for &Number {
    type Output = Number;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a / b),
            (a, b) => Number::Float(a.to_float() / b.to_float()),
        }
    }
}
