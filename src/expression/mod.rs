mod ops;

use crate::runner::reduce_expr;
use crate::{BinaryOperation, Environment, Number, UnaryOperation, VMError, Value};
use std::rc::Rc;

/// Build an expression that reads `name` from the environment at execution
/// time. The name may use the nested attribute syntax, `var("a__b")` reads
/// attribute `b` of binding `a`.
#[inline]
pub fn var(name: &str) -> Expr {
    Expr::Field(name.to_string())
}

/// A deferred expression: captured when a function is defined, evaluated only
/// when it is called. Sub-expressions are shared so cloning instruction lists
/// stays cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Value(Value),
    Field(String),
    Attr(Rc<Expr>, String),
    Index(Rc<Expr>, Rc<Expr>),
    Unary {
        op: UnaryOperation,
        expr: Rc<Expr>,
    },
    Binary {
        op: BinaryOperation,
        lhs: Rc<Expr>,
        rhs: Rc<Expr>,
    },
}

macro_rules! impl_expr_from {
    ($($From:ty),*) => {
        $(
            impl From<$From> for Expr {
                #[inline]
                fn from(value: $From) -> Self {
                    Expr::Value(value.into())
                }
            }
        )*
    };
}

impl_expr_from!(i32, i64, u32, f32, f64, bool, &str, String, Number);

impl From<Value> for Expr {
    #[inline]
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl Expr {
    /// Attribute access on the evaluated result, `var("p").attr("x")`.
    pub fn attr(self, name: &str) -> Expr {
        Expr::Attr(Rc::new(self), name.to_string())
    }

    pub fn index(self, index: impl Into<Expr>) -> Expr {
        Expr::Index(Rc::new(self), Rc::new(index.into()))
    }

    fn binary(self, op: BinaryOperation, rhs: impl Into<Expr>) -> Expr {
        Expr::Binary {
            op,
            lhs: Rc::new(self),
            rhs: Rc::new(rhs.into()),
        }
    }

    pub fn pow(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Pow, rhs)
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Eq, rhs)
    }

    pub fn neq(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Neq, rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Gt, rhs)
    }

    pub fn gte(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Gte, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Lt, rhs)
    }

    pub fn lte(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Lte, rhs)
    }

    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::And, rhs)
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOperation::Or, rhs)
    }

    /// One evaluation step against `env`. The result may itself be deferred
    /// (a binding can hold a captured expression), `runner::reduce` loops
    /// until a concrete value comes out.
    pub fn evaluate(&self, env: &Environment) -> Result<Value, VMError> {
        let value = match self {
            Expr::Value(v) => v.clone(),
            Expr::Field(name) => env.get(name)?,
            Expr::Attr(target, name) => reduce_expr(target, env)?.get_attr(name)?,
            Expr::Index(target, index) => {
                let target = reduce_expr(target, env)?;
                let index = reduce_expr(index, env)?;
                target.index(&index)?
            }
            Expr::Unary { op, expr } => reduce_expr(expr, env)?.unary(*op),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = reduce_expr(lhs, env)?;
                let rhs = reduce_expr(rhs, env)?;
                lhs.binary(*op, &rhs)
            }
        };
        match value {
            Value::Error(e) => Err(e),
            v => Ok(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_evaluates_to_itself() {
        let env = Environment::new();
        assert_eq!(Expr::from(42).evaluate(&env).unwrap(), 42.into());
    }

    #[test]
    fn operators_build_trees() {
        let env = Environment::new();
        env.set("x", 10).unwrap();
        let expr = var("x") * 2 + 1;
        assert_eq!(expr.evaluate(&env).unwrap(), 21.into());
        assert_eq!((-var("x")).evaluate(&env).unwrap(), (-10).into());
    }

    #[test]
    fn comparison_builders() {
        let env = Environment::new();
        env.set("x", Value::None).unwrap();
        assert_eq!(var("x").eq(Value::None).evaluate(&env).unwrap(), true.into());
        assert_eq!(var("x").neq(Value::None).evaluate(&env).unwrap(), false.into());
    }

    #[test]
    fn index_and_pow() {
        let env = Environment::new();
        env.set("xs", vec![Value::from(1), 3.into()]).unwrap();
        assert_eq!(var("xs").index(1).pow(2).evaluate(&env).unwrap(), 9.into());
    }

    #[test]
    fn missing_field_is_an_error() {
        let env = Environment::new();
        assert!(matches!(
            var("missing").evaluate(&env),
            Err(VMError::VariableDoesNotExist(_))
        ));
    }
}
