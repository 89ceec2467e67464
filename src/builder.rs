use crate::class_scope::ClassScope;
use crate::condition::Condition;
use crate::expression::Expr;
use crate::function::Function;
use crate::loops::Loop;
use crate::{Environment, Instruction, Value};
use std::rc::Rc;

/// Anything that accumulates instructions during definition: a [Function]
/// itself, or the nested branch/loop builders. Every block gets the same
/// chainable surface, so conditions and loops can contain anything a
/// function body can.
pub trait Block: Sized {
    fn push_inst(&mut self, instruction: Instruction);

    /// Bind a name at execution time. The right side may be a deferred
    /// expression built from [`crate::var`].
    fn set(mut self, name: &str, expr: impl Into<Expr>) -> Self {
        self.push_inst(Instruction::Update(name.to_string(), expr.into()));
        self
    }

    /// Return an expression's value at execution time.
    fn ret(mut self, expr: impl Into<Expr>) -> Self {
        self.push_inst(Instruction::Push(expr.into()));
        self.push_inst(Instruction::Ret);
        self
    }

    /// Open a conditional block evaluated at execution time.
    fn if_(self, predicate: impl Into<Expr>) -> BranchBuilder<Self> {
        BranchBuilder::new(predicate.into(), self)
    }

    /// Open a loop over `source` with one bound variable.
    fn for_(self, name: &str, source: impl Into<Expr>) -> LoopBuilder<Self> {
        LoopBuilder::new(name, source.into(), self)
    }
}

/// Builds an if/elif/else chain inside an enclosing block; `end` seals it
/// and hands the enclosing block back.
#[must_use]
pub struct BranchBuilder<P> {
    predicates: Vec<Expr>,
    bodies: Vec<Vec<Instruction>>,
    default: Vec<Instruction>,
    in_default: bool,
    parent: P,
}

impl<P: Block> Block for BranchBuilder<P> {
    fn push_inst(&mut self, instruction: Instruction) {
        if self.in_default {
            self.default.push(instruction);
        } else if let Some(body) = self.bodies.last_mut() {
            body.push(instruction);
        }
    }
}

impl<P: Block> BranchBuilder<P> {
    fn new(predicate: Expr, parent: P) -> Self {
        BranchBuilder {
            predicates: vec![predicate],
            bodies: vec![Vec::new()],
            default: Vec::new(),
            in_default: false,
            parent,
        }
    }

    /// Another predicate to try when the previous ones are falsy.
    pub fn elif_(mut self, predicate: impl Into<Expr>) -> Self {
        self.predicates.push(predicate.into());
        self.bodies.push(Vec::new());
        self.in_default = false;
        self
    }

    /// Switch to the body that runs when no predicate holds.
    pub fn else_(mut self) -> Self {
        self.in_default = true;
        self
    }

    pub fn end(mut self) -> P {
        let branches = self
            .predicates
            .into_iter()
            .zip(self.bodies.into_iter().map(Rc::from))
            .collect();
        let condition = Condition::new(branches, self.default.into());
        self.parent.push_inst(Instruction::Branch(Rc::new(condition)));
        self.parent
    }
}

/// Builds a loop body inside an enclosing block.
#[must_use]
pub struct LoopBuilder<P> {
    var: String,
    source: Expr,
    body: Vec<Instruction>,
    parent: P,
}

impl<P: Block> Block for LoopBuilder<P> {
    fn push_inst(&mut self, instruction: Instruction) {
        self.body.push(instruction);
    }
}

impl<P: Block> LoopBuilder<P> {
    fn new(var: &str, source: Expr, parent: P) -> Self {
        LoopBuilder {
            var: var.to_string(),
            source,
            body: Vec::new(),
            parent,
        }
    }

    pub fn end(mut self) -> P {
        let lp = Loop::new(self.var, self.source, self.body.into());
        self.parent.push_inst(Instruction::Loop(Rc::new(lp)));
        self.parent
    }
}

/// Produced by [Environment::def_]; `end` binds the finished function in the
/// environment it was opened on and returns that environment.
#[must_use]
pub struct FunctionBuilder {
    function: Function,
    target: Environment,
}

impl Block for FunctionBuilder {
    fn push_inst(&mut self, instruction: Instruction) {
        self.function.push_inst(instruction);
    }
}

impl FunctionBuilder {
    pub(crate) fn new(function: Function, target: Environment) -> Self {
        FunctionBuilder { function, target }
    }

    pub fn unpack<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.function = self.function.unpack(names);
        self
    }

    pub fn end(self) -> Environment {
        let name = self.function.name().to_string();
        self.target.bind_literal(&name, Value::from(self.function));
        self.target
    }
}

/// Produced by [ClassScope::def_]; `end` binds the method in the class scope.
#[must_use]
pub struct MethodBuilder<'c> {
    function: Function,
    class: &'c mut ClassScope,
}

impl Block for MethodBuilder<'_> {
    fn push_inst(&mut self, instruction: Instruction) {
        self.function.push_inst(instruction);
    }
}

impl<'c> MethodBuilder<'c> {
    pub(crate) fn new(function: Function, class: &'c mut ClassScope) -> Self {
        MethodBuilder { function, class }
    }

    pub fn end(self) -> &'c mut ClassScope {
        let name = self.function.name().to_string();
        self.class.bind(&name, Value::from(self.function));
        self.class
    }
}
