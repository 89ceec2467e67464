use crate::builder::MethodBuilder;
use crate::function::Function;
use crate::objects::TypeDef;
use crate::{Environment, VMError, Value};
use std::rc::Rc;

/// An open class definition: a scratch environment that collects class
/// attributes and methods until `close` materializes them into a
/// [TypeDef] and, when opened through [Environment::class_], binds the
/// type in the enclosing scope.
pub struct ClassScope {
    name: String,
    bases: Vec<String>,
    env: Environment,
    parent: Option<Environment>,
    closed: bool,
}

impl ClassScope {
    pub fn new<S: Into<String>>(name: &str, bases: impl IntoIterator<Item = S>) -> Self {
        ClassScope {
            name: name.to_string(),
            bases: bases.into_iter().map(Into::into).collect(),
            env: Environment::new(),
            parent: None,
            closed: false,
        }
    }

    pub(crate) fn with_parent<S: Into<String>>(
        name: &str,
        bases: impl IntoIterator<Item = S>,
        parent: Environment,
    ) -> Self {
        ClassScope {
            name: name.to_string(),
            bases: bases.into_iter().map(Into::into).collect(),
            env: parent.child(),
            parent: Some(parent),
            closed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind a class attribute. Names go through the same attribute path
    /// decoding as any environment write.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, VMError> {
        self.guard()?;
        self.env.set(name, value)?;
        Ok(self)
    }

    /// Start a method definition; `end()` on the returned builder binds the
    /// method here and hands the scope back. Methods close over the class
    /// scratch scope, so they can see class attributes and the outer scope.
    pub fn def_<S: Into<String>>(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = S>,
    ) -> Result<MethodBuilder<'_>, VMError> {
        self.guard()?;
        let f = Function::new(name, params).closing_over(self.env.clone());
        Ok(MethodBuilder::new(f, self))
    }

    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.env.bind_literal(name, value);
    }

    /// Seal the definition, producing the type as a value. Bound in the
    /// parent scope when one exists. Closing twice is an error.
    pub fn close(&mut self) -> Result<Value, VMError> {
        self.guard()?;
        self.closed = true;
        let ty = TypeDef::new(self.name.clone(), self.bases.clone(), self.env.bindings());
        let value = Value::from(Rc::new(ty));
        if let Some(parent) = &self.parent {
            parent.bind_literal(&self.name, value.clone());
        }
        Ok(value)
    }

    fn guard(&self) -> Result<(), VMError> {
        if self.closed {
            Err(VMError::DefinitionError(format!(
                "class {} is already closed",
                self.name
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Block;
    use crate::var;
    use pretty_assertions::assert_eq;

    #[test]
    fn close_binds_type_in_parent() {
        let env = Environment::new();
        let mut class = env.class_("Foo");
        class.set("answer", 42).unwrap();
        class.close().unwrap();

        let ty = env.get("Foo").unwrap();
        assert_eq!(ty.get_attr("answer").unwrap(), 42.into());
    }

    #[test]
    fn double_close_fails() {
        let env = Environment::new();
        let mut class = env.class_("Foo");
        class.close().unwrap();
        assert!(matches!(class.close(), Err(VMError::DefinitionError(_))));
        assert!(matches!(class.set("late", 1), Err(VMError::DefinitionError(_))));
    }

    #[test]
    fn methods_resolve_through_instances() {
        let env = Environment::new();
        let mut class = env.class_("Counter");
        class
            .def_("__init__", ["self", "start"])
            .unwrap()
            .set("self__count", var("start"))
            .end()
            .def_("bump", ["self"])
            .unwrap()
            .set("self__count", var("self").attr("count") + 1)
            .ret(var("self").attr("count"))
            .end();
        class.close().unwrap();

        let ty = env.get("Counter").unwrap();
        let ty = match ty {
            Value::Type(t) => t,
            other => panic!("expected a type, got {other:?}"),
        };
        let counter = ty.construct(vec![40.into()]).unwrap();
        // fetched through the instance, bump is bound to it
        let bump = counter.get_attr("bump").unwrap().as_function().unwrap();
        assert_eq!(bump.call(vec![]).unwrap(), 41.into());
        assert_eq!(bump.call(vec![]).unwrap(), 42.into());
        assert_eq!(counter.get_attr("count").unwrap(), 42.into());
    }

    #[test]
    fn method_names_keep_their_separators() {
        let env = Environment::new();
        let mut class = env.class_("Foo");
        class.def_("a__b", ["self"]).unwrap().ret(7).end();
        class.close().unwrap();

        let ty = match env.get("Foo").unwrap() {
            Value::Type(t) => t,
            other => panic!("expected a type, got {other:?}"),
        };
        assert!(ty.member("a__b").is_some());
        let foo = ty.construct(vec![]).unwrap();
        let m = foo.get_attr("a__b").unwrap().as_function().unwrap();
        assert_eq!(m.call(vec![]).unwrap(), 7.into());
    }

    #[test]
    fn class_attributes_see_outer_scope() {
        let env = Environment::new();
        env.set("base", 10).unwrap();
        let mut class = env.class_("Foo");
        class
            .def_("offset", ["self", "n"])
            .unwrap()
            .ret(var("base") + var("n"))
            .end();
        class.close().unwrap();

        let ty = env.get("Foo").unwrap();
        let ty = match ty {
            Value::Type(t) => t,
            other => panic!("expected a type, got {other:?}"),
        };
        let foo = ty.construct(vec![]).unwrap();
        let offset = foo.get_attr("offset").unwrap().as_function().unwrap();
        assert_eq!(offset.call(vec![5.into()]).unwrap(), 15.into());
    }
}
