use crate::{VMError, Value};
use std::ops::Sub;

impl Sub for &Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (a, b) => VMError::UnsupportedOperation(format!("Cannot perform {a} - {b}")).to_value(),
        }
    }
}
