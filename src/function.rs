use crate::attr::fix_self;
use crate::builder::Block;
use crate::runner::run;
use crate::{Environment, IndexMap, Instruction, VMError, Value};
use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// A named sequence of instructions with a fixed parameter list, closing over
/// the environment it was defined in.
///
/// Calls are arity-exact: positional and keyword arguments together must
/// cover the parameter list, no defaults and no variadics. An optional
/// unpack tail destructures the final positional argument by length.
#[derive(Clone)]
pub struct Function {
    name: String,
    params: Vec<String>,
    unpack: Option<Vec<String>>,
    code: Vec<Instruction>,
    environ: Option<Environment>,
    receiver: Option<Value>,
}

impl Function {
    pub fn new<S: Into<String>>(name: &str, params: impl IntoIterator<Item = S>) -> Self {
        Function {
            name: name.to_string(),
            params: params
                .into_iter()
                .map(|p| fix_self(&p.into()).to_string())
                .collect(),
            unpack: None,
            code: Vec::new(),
            environ: None,
            receiver: None,
        }
    }

    /// An anonymous single-expression function, evaluated against whatever
    /// environment it is called in plus its arguments.
    pub fn lambda<S: Into<String>>(
        params: impl IntoIterator<Item = S>,
        body: impl Into<crate::Expr>,
    ) -> Self {
        let mut f = Function::new("<lambda>", params);
        f.push_inst(Instruction::Push(body.into()));
        f.push_inst(Instruction::Ret);
        f
    }

    /// Destructure the last positional argument into `names`, one element
    /// each. The argument must be iterable with exactly that many elements.
    pub fn unpack<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.unpack = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn closing_over(mut self, env: Environment) -> Self {
        self.environ = Some(env);
        self
    }

    /// A copy of this function with `receiver` baked in as the leading
    /// argument of every call. Attribute lookup on an instance binds type
    /// members this way, so fetched methods are called without passing the
    /// instance again.
    pub fn bind(&self, receiver: Value) -> Function {
        let mut f = self.clone();
        f.receiver = Some(receiver);
        f
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Finish a standalone definition started with [Function::new].
    pub fn end(self) -> Self {
        self
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, VMError> {
        self.call_with(args, IndexMap::new())
    }

    pub fn call_with(
        &self,
        args: Vec<Value>,
        kwargs: IndexMap<String, Value>,
    ) -> Result<Value, VMError> {
        let env = self.bind_args(args, kwargs)?;
        run(Rc::from(self.code.as_slice()), &env)
    }

    /// Like [Function::call_with] but keeps the call environment alive,
    /// stashing the result in its `last` slot. Used when the caller wants
    /// the bindings the call produced, not just its value.
    pub fn call_into(&self, args: Vec<Value>) -> Result<Environment, VMError> {
        let env = self.bind_args(args, IndexMap::new())?;
        let result = run(Rc::from(self.code.as_slice()), &env)?;
        env.set_last(result);
        Ok(env)
    }

    fn bind_args(
        &self,
        args: Vec<Value>,
        kwargs: IndexMap<String, Value>,
    ) -> Result<Environment, VMError> {
        let mut args = args;
        if let Some(receiver) = &self.receiver {
            args.insert(0, receiver.clone());
        }

        if args.len() + kwargs.len() != self.params.len() {
            return Err(VMError::ArityMismatch(format!(
                "{} takes {} arguments, got {} positional and {} keyword",
                self.name,
                self.params.len(),
                args.len(),
                kwargs.len()
            )));
        }

        // the unpack tail always consumes the last positional, whichever
        // parameters the remaining positionals and keywords cover
        let tail = match &self.unpack {
            Some(_) => Some(args.pop().ok_or_else(|| {
                VMError::ArityMismatch(format!("{} expects an unpackable final argument", self.name))
            })?),
            None => None,
        };

        let env = match &self.environ {
            Some(environ) => environ.child(),
            None => Environment::new(),
        };

        for (param, arg) in self.params.iter().zip(args) {
            env.set(param, arg)?;
        }
        for (key, value) in kwargs {
            env.set(fix_self(&key), value)?;
        }

        if let (Some(names), Some(tail)) = (&self.unpack, tail) {
            let elements = tail.to_iter()?;
            if elements.len() != names.len() {
                return Err(VMError::ArityMismatch(format!(
                    "{} unpacks {} values, got {}",
                    self.name,
                    names.len(),
                    elements.len()
                )));
            }
            for (name, element) in names.iter().zip(elements) {
                env.set(name, element)?;
            }
        }

        Ok(env)
    }
}

impl Block for Function {
    fn push_inst(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params && self.code == other.code
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.params.iter().join(", "))
    }
}

// environ is a shared scope graph that may point back at this function,
// printing it would not terminate
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("unpack", &self.unpack)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var;
    use pretty_assertions::assert_eq;

    #[test]
    fn call_binds_params_in_order() {
        let f = Function::new("add", ["x", "y"]).ret(var("x") + var("y"));
        assert_eq!(f.call(vec![2.into(), 3.into()]).unwrap(), 5.into());
    }

    #[test]
    fn arity_is_exact() {
        let f = Function::new("one", ["x"]).ret(var("x"));
        assert!(matches!(
            f.call(vec![]),
            Err(VMError::ArityMismatch(_))
        ));
        assert!(matches!(
            f.call(vec![1.into(), 2.into()]),
            Err(VMError::ArityMismatch(_))
        ));
    }

    #[test]
    fn keyword_arguments_count_toward_arity() {
        let f = Function::new("add", ["x", "y"]).ret(var("x") + var("y"));
        let mut kwargs = IndexMap::new();
        kwargs.insert("y".to_string(), Value::from(10));
        assert_eq!(f.call_with(vec![7.into()], kwargs).unwrap(), 17.into());
    }

    #[test]
    fn falling_off_the_end_returns_none() {
        let f = Function::new("noop", ["x"]).set("y", var("x"));
        assert_eq!(f.call(vec![1.into()]).unwrap(), Value::None);
    }

    #[test]
    fn unpack_destructures_last_argument() {
        let f = Function::new("pair", ["items"])
            .unpack(["a", "b"])
            .ret(var("a") * var("b"));
        assert_eq!(
            f.call(vec![Value::List(vec![6.into(), 7.into()])]).unwrap(),
            42.into()
        );
    }

    #[test]
    fn unpack_tail_combines_with_keywords() {
        // the tail is the last positional even when other parameters arrive
        // by keyword
        let f = Function::new("f", ["a", "items"])
            .unpack(["b", "c"])
            .ret(var("a") + var("b") + var("c"));
        let mut kwargs = IndexMap::new();
        kwargs.insert("a".to_string(), Value::from(1));
        let items = Value::List(vec![2.into(), 3.into()]);
        assert_eq!(f.call_with(vec![items], kwargs).unwrap(), 6.into());
    }

    #[test]
    fn bound_functions_prepend_their_receiver() {
        let f = Function::new("pair", ["x", "y"]).ret(var("x") * 10 + var("y"));
        let bound = f.bind(4.into());
        assert_eq!(bound.call(vec![2.into()]).unwrap(), 42.into());
        assert!(matches!(
            bound.call(vec![1.into(), 2.into()]),
            Err(VMError::ArityMismatch(_))
        ));
    }

    #[test]
    fn unpack_length_mismatch_fails() {
        let f = Function::new("pair", ["items"])
            .unpack(["a", "b"])
            .ret(var("a"));
        assert!(matches!(
            f.call(vec![Value::List(vec![1.into()])]),
            Err(VMError::ArityMismatch(_))
        ));
    }

    #[test]
    fn lambda_evaluates_its_expression() {
        let double = Function::lambda(["n"], var("n") * 2);
        assert_eq!(double.call(vec![21.into()]).unwrap(), 42.into());
    }

    #[test]
    fn self_parameter_is_renamed() {
        let f = Function::new("get", ["self"]).ret(var("$"));
        assert_eq!(f.params(), &["$".to_string()]);
        assert_eq!(f.call(vec![9.into()]).unwrap(), 9.into());
    }

    #[test]
    fn call_into_exposes_bindings_and_last() {
        let env = Environment::new();
        let f = Function::new("sum", ["x", "y"])
            .set("total", var("x") + var("y"))
            .ret(var("total"))
            .closing_over(env);
        let call_env = f.call_into(vec![4.into(), 5.into()]).unwrap();
        assert_eq!(call_env.get("total").unwrap(), 9.into());
        assert_eq!(call_env.last(), Some(9.into()));
    }
}
