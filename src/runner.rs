use crate::expression::Expr;
use crate::stream::CodeStream;
use crate::{Environment, Instruction, VMError, Value};
use std::rc::Rc;

/// Upper bound on reduction steps. Each step strips one `Deferred` wrapper
/// and captured expression chains are finite, so hitting this bound means a
/// binding cycle rather than a long computation.
pub const REDUCE_LIMIT: usize = 64;

/// Evaluate until concrete: a single evaluation step may produce another
/// deferred expression when a binding holds a captured expression, so this
/// loops. Already concrete values come back unchanged.
pub fn reduce(value: Value, env: &Environment) -> Result<Value, VMError> {
    let mut value = value;
    let mut steps = 0;
    loop {
        match value {
            Value::Deferred(expr) => {
                if steps == REDUCE_LIMIT {
                    return Err(VMError::RuntimeError(format!(
                        "Expression did not reduce within {REDUCE_LIMIT} steps"
                    )));
                }
                steps += 1;
                value = expr.evaluate(env)?;
            }
            v => return Ok(v),
        }
    }
}

#[inline]
pub(crate) fn reduce_expr(expr: &Expr, env: &Environment) -> Result<Value, VMError> {
    reduce(expr.evaluate(env)?, env)
}

/// The execution loop shared by function, branch, and loop bodies. Branch and
/// loop instructions splice their sub-sequences into the stream instead of
/// recursing, so one loop drives the entire call.
pub(crate) fn run(code: Rc<[Instruction]>, env: &Environment) -> Result<Value, VMError> {
    let mut stream = CodeStream::new(code);
    let mut accumulator: Option<Value> = None;
    while let Some(instruction) = stream.next() {
        log::trace!("{instruction:?}");
        match instruction {
            Instruction::Update(name, expr) => {
                let value = reduce_expr(&expr, env)?;
                env.set(&name, value)?;
            }
            Instruction::Push(expr) => {
                accumulator = Some(reduce_expr(&expr, env)?);
            }
            Instruction::Ret => return Ok(accumulator.take().unwrap_or_default()),
            Instruction::Branch(condition) => {
                let body = condition.select(env)?;
                stream.splice(body);
            }
            Instruction::Loop(lp) => {
                let source = reduce_expr(lp.source(), env)?;
                stream.activate_loop(lp.var().to_string(), source.to_iter()?, lp.body());
            }
        }
    }
    Ok(Value::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var;
    use pretty_assertions::assert_eq;

    #[test]
    fn reduce_is_idempotent_on_concrete_values() {
        let env = Environment::new();
        assert_eq!(reduce(Value::from(1), &env).unwrap(), 1.into());
        assert_eq!(reduce(Value::None, &env).unwrap(), Value::None);
    }

    #[test]
    fn reduce_unwraps_deferred_bindings() {
        let env = Environment::new();
        env.set("b", 2).unwrap();
        // binding holds a captured expression, field lookup yields it deferred
        env.set("expr", var("b") + 1).unwrap();
        assert_eq!(reduce_expr(&var("expr"), &env).unwrap(), 3.into());
    }

    #[test]
    fn reduce_gives_up_on_cycles() {
        let env = Environment::new();
        env.set("a", var("a")).unwrap();
        assert!(matches!(
            reduce_expr(&var("a"), &env),
            Err(VMError::RuntimeError(_))
        ));
    }

    #[test]
    fn stream_exhaustion_without_ret_is_none() {
        let env = Environment::new();
        let code: Rc<[Instruction]> =
            vec![Instruction::Update("a".to_string(), 1.into())].into();
        assert_eq!(run(code, &env).unwrap(), Value::None);
        assert_eq!(env.get("a").unwrap(), 1.into());
    }

    #[test]
    fn second_push_overwrites_the_first() {
        let env = Environment::new();
        let code: Rc<[Instruction]> = vec![
            Instruction::Push(1.into()),
            Instruction::Push(2.into()),
            Instruction::Ret,
        ]
        .into();
        assert_eq!(run(code, &env).unwrap(), 2.into());
    }
}
