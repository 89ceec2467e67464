use crate::Value;

// Truthiness based selection, the operands themselves are returned so
// `none or default` style expressions keep their value.
impl Value {
    #[inline]
    pub fn and(&self, rhs: &Value) -> Value {
        if self.to_bool() {
            rhs.clone()
        } else {
            self.clone()
        }
    }

    #[inline]
    pub fn or(&self, rhs: &Value) -> Value {
        if self.to_bool() {
            self.clone()
        } else {
            rhs.clone()
        }
    }

    #[inline]
    pub fn xor(&self, rhs: &Value) -> Value {
        Value::Bool(self.to_bool() ^ rhs.to_bool())
    }
}

#[cfg(test)]
mod tests {
    use crate::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_returns_first_falsy() {
        assert_eq!(Value::None.and(&1.into()), Value::None);
        assert_eq!(Value::from(1).and(&2.into()), 2.into());
    }

    #[test]
    fn or_returns_first_truthy() {
        assert_eq!(Value::None.or(&1.into()), 1.into());
        assert_eq!(Value::from(1).or(&2.into()), 1.into());
    }
}
