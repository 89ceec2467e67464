use crate::expression::Expr;
use crate::runner::reduce_expr;
use crate::{Environment, Instruction, VMError};
use std::rc::Rc;

/// An if/elif/else chain. Built through [`crate::Block::if_`]; at execution
/// time the dispatcher asks it which body to splice.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    branches: Vec<(Expr, Rc<[Instruction]>)>,
    default: Rc<[Instruction]>,
}

impl Condition {
    pub(crate) fn new(
        branches: Vec<(Expr, Rc<[Instruction]>)>,
        default: Rc<[Instruction]>,
    ) -> Self {
        Condition { branches, default }
    }

    /// Predicates are reduced in declaration order against the calling
    /// environment; the first truthy one wins, otherwise the default body
    /// (possibly empty) runs.
    pub fn select(&self, env: &Environment) -> Result<Rc<[Instruction]>, VMError> {
        for (predicate, body) in &self.branches {
            if reduce_expr(predicate, env)?.to_bool() {
                return Ok(body.clone());
            }
        }
        Ok(self.default.clone())
    }
}
