use crate::{VMError, Value};

impl Value {
    pub fn pow(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(a), Value::Number(b)) => match a.pow(*b) {
                Ok(n) => Value::Number(n),
                Err(e) => e.to_value(),
            },
            (a, b) => {
                VMError::UnsupportedOperation(format!("Cannot perform {a} ** {b}")).to_value()
            }
        }
    }
}
