use crate::{VMError, Value};
use std::ops::Neg;

impl Neg for &Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Self::Output {
        match self {
            Value::Error(v) => v.into(),
            Value::Number(n) => Value::Number(-n),
            v => VMError::UnsupportedOperation(format!("Cannot negate {v}")).to_value(),
        }
    }
}
