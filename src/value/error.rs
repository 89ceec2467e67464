use crate::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VMError {
    RuntimeError(String),
    ConversionError(String),
    UnsupportedOperation(String),
    VariableDoesNotExist(String),
    ArityMismatch(String),
    DefinitionError(String),
}

impl Error for VMError {}

impl Display for VMError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VMError::RuntimeError(m) => write!(f, "{m}"),
            VMError::ConversionError(m) => write!(f, "Conversion Error: {m}"),
            VMError::UnsupportedOperation(m) => write!(f, "Unsupported Operation: {m}"),
            VMError::VariableDoesNotExist(m) => write!(f, "Variable Does Not Exist: {m}"),
            VMError::ArityMismatch(m) => write!(f, "Arity Mismatch: {m}"),
            VMError::DefinitionError(m) => write!(f, "Definition Error: {m}"),
        }
    }
}

impl From<&VMError> for Value {
    #[inline]
    fn from(value: &VMError) -> Self {
        value.clone().into()
    }
}

impl VMError {
    pub fn to_value(self) -> Value {
        Value::Error(self)
    }

    pub fn variable_does_not_exist(name: &str) -> Self {
        VMError::VariableDoesNotExist(format!("Variable {name} does not exist"))
    }
}
