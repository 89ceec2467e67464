use crate::{IndexMap, VMError, Value};
use itertools::Itertools;
use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// A type produced by closing a [crate::ClassScope]: a name, base type
/// names, and the members (methods and class attributes) its definition
/// bound.
#[derive(Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub bases: Vec<String>,
    members: IndexMap<String, Value>,
}

impl TypeDef {
    pub(crate) fn new(name: String, bases: Vec<String>, members: IndexMap<String, Value>) -> Self {
        TypeDef { name, bases, members }
    }

    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    pub fn members(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.members.iter()
    }

    /// Instantiate the type. When an `__init__` member exists it is called
    /// with the fresh instance prepended to `args`; otherwise `args` must be
    /// empty.
    pub fn construct(self: &Rc<Self>, args: Vec<Value>) -> Result<Value, VMError> {
        let instance = Value::Instance(Rc::new(RefCell::new(Instance::new(self.clone()))));
        match self.member("__init__") {
            Some(init) => {
                let init = init.as_function().ok_or_else(|| {
                    VMError::DefinitionError(format!("{}.__init__ is not callable", self.name))
                })?;
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(instance.clone());
                call_args.extend(args);
                init.call(call_args)?;
            }
            None if args.is_empty() => {}
            None => {
                return Err(VMError::ArityMismatch(format!(
                    "{} takes no constructor arguments, got {}",
                    self.name,
                    args.len()
                )))
            }
        }
        Ok(instance)
    }
}

impl Display for TypeDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.bases.is_empty() {
            write!(f, "class {}", self.name)
        } else {
            write!(f, "class {}({})", self.name, self.bases.iter().join(", "))
        }
    }
}

impl Debug for TypeDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("bases", &self.bases)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A mutable bag of fields tied to a [TypeDef]. Attribute reads fall back to
/// the type's members so methods resolve through instances.
#[derive(Clone, PartialEq)]
pub struct Instance {
    ty: Rc<TypeDef>,
    pub(crate) fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(ty: Rc<TypeDef>) -> Self {
        Instance {
            ty,
            fields: IndexMap::new(),
        }
    }

    pub fn type_def(&self) -> &Rc<TypeDef> {
        &self.ty
    }

    /// Raw lookup, fields first, then type members unbound. `Value::get_attr`
    /// layers method binding on top of this.
    pub fn get_attr(&self, name: &str) -> Result<Value, VMError> {
        if let Some(v) = self.fields.get(name) {
            return Ok(v.clone());
        }
        self.ty
            .member(name)
            .cloned()
            .ok_or_else(|| VMError::VariableDoesNotExist(format!("{}.{name}", self.ty.name)))
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} instance>", self.ty.name)
    }
}

// fields can hold methods that close back over this instance's scope
impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.ty.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
