//! tarn assembles executable logic by chaining method calls at definition
//! time, then runs it later against a chained [Environment]. There is no
//! parser; functions, conditionals, loops, and record types are built with
//! ordinary Rust calls and evaluated on demand.
//!
//! ```
//! use tarn::{var, Environment, Function, Block};
//!
//! let e = Environment::new();
//! e.set("a", 1).unwrap().set("b", 2).unwrap();
//!
//! let e = e
//!     .def_("foo", ["x", "y"])
//!     .set("a", var("b") + 1)
//!     .ret(var("x") + var("a") * var("y"))
//!     .end();
//!
//! let foo = e.get("foo").unwrap();
//! let foo = foo.as_function().unwrap();
//! assert_eq!(foo.call(vec![10.into(), 16.into()]).unwrap(), 58.into());
//! ```

mod attr;
mod builder;
mod class_scope;
mod condition;
mod environment;
mod expression;
mod function;
mod instructions;
mod loops;
mod macros;
mod number;
mod objects;
mod operations;
mod runner;
mod stream;
mod value;

pub use attr::AttrPath;
pub use builder::{Block, BranchBuilder, FunctionBuilder, LoopBuilder, MethodBuilder};
pub use class_scope::ClassScope;
pub use condition::Condition;
pub use environment::Environment;
pub use expression::{var, Expr};
pub use function::Function;
pub use indexmap::IndexMap;
pub use instructions::Instruction;
pub use loops::Loop;
pub use number::Number;
pub use objects::{Instance, TypeDef};
pub use operations::{BinaryOperation, UnaryOperation};
pub use runner::{reduce, REDUCE_LIMIT};
pub use stream::CodeStream;
pub use value::{VMError, Value};
