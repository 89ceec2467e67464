use crate::attr::AttrPath;
use crate::builder::FunctionBuilder;
use crate::class_scope::ClassScope;
use crate::function::Function;
use crate::{VMError, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// A chained variable scope. Cloning an `Environment` clones the handle, both
/// copies observe the same bindings; function calls and closures rely on
/// this.
///
/// Lookup walks the parent chain, assignment is always local except for
/// nested attribute paths, which mutate an already bound object in place.
#[derive(Clone, Default)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

#[derive(Debug, Default)]
struct Scope {
    bindings: IndexMap<String, Value>,
    parent: Option<Environment>,
    last: Option<Value>,
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let scope = self.scope.borrow();
        f.debug_struct("Environment")
            .field("bindings", &scope.bindings)
            .field("parent", &scope.parent)
            .finish()
    }
}

impl Environment {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// New scope whose misses fall through to `self`.
    pub fn child(&self) -> Environment {
        let env = Environment::new();
        env.scope.borrow_mut().parent = Some(self.clone());
        env
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// Resolve a possibly nested name, first locally, then through the parent
    /// chain.
    pub fn get(&self, name: &str) -> Result<Value, VMError> {
        match AttrPath::parse(name)? {
            AttrPath::Literal(key) => self.lookup(&key),
            AttrPath::Nested { root, attrs } => {
                let mut value = self.lookup(&root)?;
                for attr in &attrs {
                    value = value.get_attr(attr)?;
                }
                Ok(value)
            }
        }
    }

    /// Bind `name` locally, or, for a nested path, mutate the attribute of an
    /// object already bound in this scope. Intermediate scopes are never
    /// created implicitly.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<&Self, VMError> {
        let value = value.into();
        log::trace!("set {name} = {value}");
        match AttrPath::parse(name)? {
            AttrPath::Literal(key) => {
                self.scope.borrow_mut().bindings.insert(key, value);
                Ok(self)
            }
            AttrPath::Nested { root, attrs } => {
                let mut target = self.local(&root)?;
                let (last, hops) = match attrs.split_last() {
                    Some(split) => split,
                    None => {
                        return Err(VMError::DefinitionError(format!(
                            "Invalid attribute name {name}"
                        )))
                    }
                };
                for attr in hops {
                    target = target.get_attr(attr)?;
                }
                target.set_attr(last, value)?;
                Ok(self)
            }
        }
    }

    /// Insert under `name` verbatim, skipping attribute path decoding.
    /// Definition machinery binds function, method, and type names this way,
    /// so a name containing the separator still lands as one key.
    pub(crate) fn bind_literal(&self, name: &str, value: Value) {
        log::trace!("bind {name} = {value}");
        self.scope.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Result of the most recent `Function::call_into` through this scope.
    pub fn last(&self) -> Option<Value> {
        self.scope.borrow().last.clone()
    }

    pub(crate) fn set_last(&self, value: Value) {
        self.scope.borrow_mut().last = Some(value);
    }

    /// Start a named function definition closing over this scope; `end()` on
    /// the returned builder binds it here and hands the scope back.
    pub fn def_<S: Into<String>>(
        &self,
        name: &str,
        params: impl IntoIterator<Item = S>,
    ) -> FunctionBuilder {
        FunctionBuilder::new(Function::new(name, params).closing_over(self.clone()), self.clone())
    }

    /// Open a class definition scope; `close()` materializes the type and
    /// binds it here under `name`.
    pub fn class_(&self, name: &str) -> ClassScope {
        ClassScope::with_parent(name, std::iter::empty::<&str>(), self.clone())
    }

    pub fn class_with_bases<S: Into<String>>(
        &self,
        name: &str,
        bases: impl IntoIterator<Item = S>,
    ) -> ClassScope {
        ClassScope::with_parent(name, bases, self.clone())
    }

    fn lookup(&self, key: &str) -> Result<Value, VMError> {
        let scope = self.scope.borrow();
        if let Some(v) = scope.bindings.get(key) {
            return Ok(v.clone());
        }
        match &scope.parent {
            Some(parent) => parent.lookup(key),
            None => Err(VMError::variable_does_not_exist(key)),
        }
    }

    /// Local-only resolution, used as the anchor of nested assignment.
    fn local(&self, key: &str) -> Result<Value, VMError> {
        self.scope
            .borrow()
            .bindings
            .get(key)
            .cloned()
            .ok_or_else(|| VMError::variable_does_not_exist(key))
    }

    pub(crate) fn bindings(&self) -> IndexMap<String, Value> {
        self.scope.borrow().bindings.clone()
    }
}
