use crate::{VMError, Value};
use std::ops::Add;

impl Add for &Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::String(a), Value::String(b)) => {
                let mut result = a.clone();
                result.push_str(b.as_str());
                Value::String(result)
            }
            (Value::List(a), Value::List(b)) => {
                let mut result = a.clone();
                result.extend(b.clone());
                Value::List(result)
            }
            (Value::Map(a), Value::Map(b)) => {
                let mut result = a.clone();
                result.extend(b.clone());
                Value::Map(result)
            }
            (a, b) => VMError::UnsupportedOperation(format!("Cannot perform {a} + {b}")).to_value(),
        }
    }
}
