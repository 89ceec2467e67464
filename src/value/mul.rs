use crate::{Number, VMError, Value};
use std::ops::Mul;

impl Mul for &Value {
    type Output = Value;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            (Value::String(s), Value::Number(Number::Int(n)))
            | (Value::Number(Number::Int(n)), Value::String(s)) => {
                Value::String(s.repeat((*n).max(0) as usize))
            }
            (Value::List(l), Value::Number(Number::Int(n)))
            | (Value::Number(Number::Int(n)), Value::List(l)) => {
                let n = (*n).max(0) as usize;
                let mut result = Vec::with_capacity(l.len() * n);
                for _ in 0..n {
                    result.extend(l.clone());
                }
                Value::List(result)
            }
            (a, b) => VMError::UnsupportedOperation(format!("Cannot perform {a} * {b}")).to_value(),
        }
    }
}
