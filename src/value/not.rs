use crate::Value;
use std::ops::Not;

impl Not for &Value {
    type Output = Value;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Value::Error(v) => v.into(),
            v => Value::Bool(!v.to_bool()),
        }
    }
}
