use crate::condition::Condition;
use crate::expression::Expr;
use crate::loops::Loop;
use std::rc::Rc;

/// One step of an executable body. Bodies are plain `Vec<Instruction>` while
/// a definition is being built and sealed into `Rc<[Instruction]>` once it
/// can execute, so splicing a branch or loop body never deep-copies it.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Reduce the expression against the current environment and bind it.
    Update(String, Expr),
    /// Reduce into the single-slot accumulator; a second push overwrites.
    Push(Expr),
    /// Yield the accumulator and stop the current call immediately.
    Ret,
    /// Select one body of a condition and splice it into the stream.
    Branch(Rc<Condition>),
    /// Re-splice a body once per element of an iterable.
    Loop(Rc<Loop>),
}
