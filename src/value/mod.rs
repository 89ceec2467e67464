mod add;
mod div;
mod error;
mod logical;
mod mul;
mod neg;
mod not;
mod pow;
mod rem;
mod sub;

pub use error::VMError;

use crate::expression::Expr;
use crate::function::Function;
use crate::objects::{Instance, TypeDef};
use crate::{impl_from, BinaryOperation, Number, UnaryOperation};
use indexmap::IndexMap;
use itertools::Itertools;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Function(Rc<Function>),
    Type(Rc<TypeDef>),
    Instance(Rc<RefCell<Instance>>),
    Deferred(Rc<Expr>),
    Error(VMError),
}

impl_from! {
    bool, Value, Value::Bool;
    String, Value, Value::String;
    VMError, Value, Value::Error;
    Vec<Value>, Value, Value::List;
    Rc<TypeDef>, Value, Value::Type;
}

impl From<&'_ str> for Value {
    #[inline]
    fn from(value: &'_ str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Number>> From<T> for Value {
    #[inline]
    fn from(value: T) -> Self {
        Value::Number(value.into())
    }
}

impl From<IndexMap<String, Value>> for Value {
    #[inline]
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<Function> for Value {
    #[inline]
    fn from(value: Function) -> Self {
        Value::Function(Rc::new(value))
    }
}

impl From<Expr> for Value {
    #[inline]
    fn from(value: Expr) -> Self {
        Value::Deferred(Rc::new(value))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Type(a), Value::Type(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Deferred(a), Value::Deferred(b)) => Rc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::List(a), Value::List(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(l) => write!(f, "[{}]", l.iter().join(", ")),
            Value::Map(m) => {
                write!(f, "{{{}}}", m.iter().map(|(k, v)| format!("{k} = {v}")).join(", "))
            }
            Value::Function(fun) => write!(f, "{fun}"),
            Value::Type(t) => write!(f, "{}", t.name),
            Value::Instance(i) => write!(f, "{}", i.borrow()),
            Value::Deferred(e) => write!(f, "<expr {e:?}>"),
            Value::Error(e) => write!(f, "{e}"),
        }
    }
}

impl Value {
    #[inline]
    pub fn to_bool(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            _ => true,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<Rc<Function>> {
        match self {
            Value::Function(f) => Some(f.clone()),
            _ => None,
        }
    }

    /// Iteration source for `for_` loops: lists yield their elements, maps
    /// their keys, strings their characters.
    pub fn to_iter(&self) -> Result<Vec<Value>, VMError> {
        match self {
            Value::List(l) => Ok(l.clone()),
            Value::Map(m) => Ok(m.keys().map(|k| k.as_str().into()).collect()),
            Value::String(s) => Ok(s.chars().map(|c| c.to_string().into()).collect()),
            v => Err(VMError::UnsupportedOperation(format!("{v} is not iterable"))),
        }
    }

    /// Generic attribute read used by nested attribute paths and `Expr::Attr`.
    /// Functions reached through an instance's type come back bound to that
    /// instance, so `obj.get_attr("m")?.as_function()` is callable without
    /// passing `obj` again.
    pub fn get_attr(&self, name: &str) -> Result<Value, VMError> {
        match self {
            Value::Instance(i) => {
                let instance = i.borrow();
                if let Some(v) = instance.fields.get(name) {
                    return Ok(v.clone());
                }
                match instance.type_def().member(name) {
                    Some(Value::Function(f)) => {
                        let bound = f.bind(Value::Instance(i.clone()));
                        Ok(Value::Function(Rc::new(bound)))
                    }
                    Some(v) => Ok(v.clone()),
                    None => Err(VMError::VariableDoesNotExist(format!(
                        "{}.{name}",
                        instance.type_def().name
                    ))),
                }
            }
            Value::Type(t) => t
                .member(name)
                .cloned()
                .ok_or_else(|| VMError::VariableDoesNotExist(format!("{}.{name}", t.name))),
            Value::Map(m) => m
                .get(name)
                .cloned()
                .ok_or_else(|| VMError::VariableDoesNotExist(format!("{self}.{name}"))),
            v => Err(VMError::UnsupportedOperation(format!(
                "{v} does not support attribute access"
            ))),
        }
    }

    /// Generic attribute write. Only instances share their fields through the
    /// environment, so they are the only valid target of a nested `set`.
    pub fn set_attr(&self, name: &str, value: Value) -> Result<(), VMError> {
        match self {
            Value::Instance(i) => {
                i.borrow_mut().fields.insert(name.to_string(), value);
                Ok(())
            }
            v => Err(VMError::UnsupportedOperation(format!(
                "{v} does not support attribute assignment"
            ))),
        }
    }

    pub fn index(&self, index: &Value) -> Result<Value, VMError> {
        match (self, index) {
            (Value::List(l), Value::Number(n)) => {
                let i = n.to_usize()?;
                l.get(i).cloned().ok_or_else(|| {
                    VMError::RuntimeError(format!("Index {i} out of bounds, len {}", l.len()))
                })
            }
            (Value::String(s), Value::Number(n)) => {
                let i = n.to_usize()?;
                s.chars().nth(i).map(|c| c.to_string().into()).ok_or_else(|| {
                    VMError::RuntimeError(format!("Index {i} out of bounds, len {}", s.len()))
                })
            }
            (Value::Map(m), Value::String(k)) => m
                .get(k)
                .cloned()
                .ok_or_else(|| VMError::VariableDoesNotExist(format!("{self}[{k}]"))),
            (v, i) => Err(VMError::UnsupportedOperation(format!("Cannot index {v} with {i}"))),
        }
    }

    pub fn binary(&self, op: BinaryOperation, rhs: &Value) -> Value {
        match op {
            BinaryOperation::Add => self + rhs,
            BinaryOperation::Sub => self - rhs,
            BinaryOperation::Mul => self * rhs,
            BinaryOperation::Div => self / rhs,
            BinaryOperation::Rem => self % rhs,
            BinaryOperation::Pow => self.pow(rhs),
            BinaryOperation::Eq => Value::Bool(self == rhs),
            BinaryOperation::Neq => Value::Bool(self != rhs),
            BinaryOperation::Gt => self.compare(rhs, op, Ordering::is_gt),
            BinaryOperation::Gte => self.compare(rhs, op, Ordering::is_ge),
            BinaryOperation::Lt => self.compare(rhs, op, Ordering::is_lt),
            BinaryOperation::Lte => self.compare(rhs, op, Ordering::is_le),
            BinaryOperation::And => self.and(rhs),
            BinaryOperation::Or => self.or(rhs),
            BinaryOperation::Xor => self.xor(rhs),
        }
    }

    pub fn unary(&self, op: UnaryOperation) -> Value {
        match op {
            UnaryOperation::Neg => -self,
            UnaryOperation::Not => !self,
        }
    }

    fn compare(&self, rhs: &Value, op: BinaryOperation, test: fn(Ordering) -> bool) -> Value {
        match self.partial_cmp(rhs) {
            Some(ord) => Value::Bool(test(ord)),
            None => VMError::UnsupportedOperation(format!("Cannot compare {self} {op} {rhs}"))
                .to_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truthiness() {
        assert!(!Value::None.to_bool());
        assert!(!Value::List(vec![]).to_bool());
        assert!(!Value::from(0).to_bool());
        assert!(Value::from(0.1).to_bool());
        assert!(Value::from("x").to_bool());
    }

    #[test]
    fn eq_follows_number_coercion() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::None);
        assert_ne!(Value::List(vec![]), Value::None);
    }

    #[test]
    fn index_list_and_map() {
        let l = Value::List(vec![3.into(), 2.into(), 1.into()]);
        assert_eq!(l.index(&1.into()).unwrap(), 2.into());
        assert!(l.index(&5.into()).is_err());
    }
}
