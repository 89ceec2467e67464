use crate::{VMError, Value};
use std::ops::Rem;

impl Rem for &Value {
    type Output = Value;

    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Error(v), _) | (_, Value::Error(v)) => v.into(),
            (Value::Number(_), Value::Number(b)) if b.is_zero() => {
                VMError::UnsupportedOperation(format!("Cannot take {self} modulo zero")).to_value()
            }
            (Value::Number(a), Value::Number(b)) => Value::Number(a % b),
            (a, b) => VMError::UnsupportedOperation(format!("Cannot perform {a} % {b}")).to_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::define_value_tests;
    use crate::value::Value;

    define_value_tests! {
        % {
            test_int_rem_int => (Value::from(44), Value::from(5), Value::from(4));
        }
    }
}
