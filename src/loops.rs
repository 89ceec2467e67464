use crate::expression::Expr;
use crate::Instruction;
use std::rc::Rc;

/// A `for_` loop: one bound variable, a source expression reduced once per
/// activation, and a body re-spliced per element. No break or continue, the
/// source running dry is the only exit.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    var: String,
    source: Expr,
    body: Rc<[Instruction]>,
}

impl Loop {
    pub(crate) fn new(var: String, source: Expr, body: Rc<[Instruction]>) -> Self {
        Loop { var, source, body }
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    pub fn source(&self) -> &Expr {
        &self.source
    }

    pub fn body(&self) -> Rc<[Instruction]> {
        self.body.clone()
    }
}
