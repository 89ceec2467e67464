use crate::expression::Expr;
use crate::{BinaryOperation, UnaryOperation};
use std::ops::{Add, Div, Mul, Neg, Not, Rem, Sub};
use std::rc::Rc;

macro_rules! impl_expr_binary_op {
    ($($Trait:ident, $method:ident, $op:ident;)*) => {
        $(
            impl<T: Into<Expr>> $Trait<T> for Expr {
                type Output = Expr;

                #[inline]
                fn $method(self, rhs: T) -> Self::Output {
                    Expr::Binary {
                        op: BinaryOperation::$op,
                        lhs: Rc::new(self),
                        rhs: Rc::new(rhs.into()),
                    }
                }
            }
        )*
    };
}

impl_expr_binary_op! {
    Add, add, Add;
    Sub, sub, Sub;
    Mul, mul, Mul;
    Div, div, Div;
    Rem, rem, Rem;
}

impl Neg for Expr {
    type Output = Expr;

    #[inline]
    fn neg(self) -> Self::Output {
        Expr::Unary {
            op: UnaryOperation::Neg,
            expr: Rc::new(self),
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    #[inline]
    fn not(self) -> Self::Output {
        Expr::Unary {
            op: UnaryOperation::Not,
            expr: Rc::new(self),
        }
    }
}
