use crate::{VMError, Value};
use std::ops::Div;

impl Div for &Value {
    type Output = Value;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(_), Value::Number(b)) if b.is_zero() => {
                VMError::UnsupportedOperation(format!("Cannot divide {self} by zero")).to_value()
            }
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            (a, b) => VMError::UnsupportedOperation(format!("Cannot perform {a} / {b}")).to_value(),
        }
    }
}
