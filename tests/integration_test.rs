use pretty_assertions::assert_eq;
use tarn::{var, Block, Environment, Function, VMError, Value};

#[test]
fn closure_reads_and_shadows_definition_scope() {
    let e = Environment::new();
    e.set("a", 1).unwrap().set("b", 2).unwrap();

    let e = e
        .def_("foo", ["x", "y"])
        .set("a", var("b") + 1)
        .ret(var("x") + var("a") * var("y"))
        .end();

    let foo = e.get("foo").unwrap().as_function().unwrap();
    assert_eq!(foo.call(vec![10.into(), 16.into()]).unwrap(), 58.into());

    // the call bound a=3 in its own scope, the defining scope is untouched
    assert_eq!(e.get("a").unwrap(), 1.into());
}

#[test]
fn branches_pick_the_first_truthy_predicate() {
    let e = Environment::new()
        .def_("calc", ["u", "v"])
        .if_(var("u"))
        .ret(var("u") + var("v"))
        .elif_(var("u").eq(Value::None))
        .ret(var("v") + 1)
        .else_()
        .ret(var("v"))
        .end()
        .end();

    let calc = e.get("calc").unwrap().as_function().unwrap();
    // truthy first predicate
    assert_eq!(calc.call(vec![30.into(), 12.into()]).unwrap(), 42.into());
    // first falsy, second matches
    assert_eq!(calc.call(vec![Value::None, 41.into()]).unwrap(), 42.into());
    // both falsy, default body
    assert_eq!(
        calc.call(vec![Value::List(vec![]), 42.into()]).unwrap(),
        42.into()
    );
}

#[test]
fn loop_accumulates_across_iterations() {
    let e = Environment::new()
        .def_("bar", ["m"])
        .set("w", 0)
        .for_("v", var("m"))
        .set("w", var("w") + var("v") * var("v"))
        .end()
        .ret(var("w") + 12)
        .end();

    let bar = e.get("bar").unwrap().as_function().unwrap();
    let m = Value::List(vec![1.into(), 2.into(), 3.into(), 4.into()]);
    assert_eq!(bar.call(vec![m]).unwrap(), 42.into());

    // an empty source skips the body entirely
    assert_eq!(bar.call(vec![Value::List(vec![])]).unwrap(), 12.into());
}

#[test]
fn loops_nest() {
    let e = Environment::new()
        .def_("grid", ["rows"])
        .set("total", 0)
        .for_("row", var("rows"))
        .for_("cell", var("row"))
        .set("total", var("total") + var("cell"))
        .end()
        .end()
        .ret(var("total"))
        .end();

    let grid = e.get("grid").unwrap().as_function().unwrap();
    let rows = Value::List(vec![
        Value::List(vec![1.into(), 2.into()]),
        Value::List(vec![3.into(), 4.into()]),
    ]);
    assert_eq!(grid.call(vec![rows]).unwrap(), 10.into());
}

#[test]
fn branch_inside_loop_filters_elements() {
    let e = Environment::new()
        .def_("sum_even", ["items"])
        .set("total", 0)
        .for_("n", var("items"))
        .if_((var("n") % 2).eq(0))
        .set("total", var("total") + var("n"))
        .end()
        .end()
        .ret(var("total"))
        .end();

    let f = e.get("sum_even").unwrap().as_function().unwrap();
    let items = Value::List(vec![1.into(), 2.into(), 3.into(), 4.into(), 5.into(), 6.into()]);
    assert_eq!(f.call(vec![items]).unwrap(), 12.into());
}

#[test]
fn lambdas_unpack_pairs() {
    let second = Function::lambda(["pair"], var("v")).unpack(["k", "v"]);

    let pairs = [
        Value::List(vec!["a".into(), 20.into()]),
        Value::List(vec!["b".into(), 22.into()]),
    ];
    let total = pairs
        .into_iter()
        .map(|p| second.call(vec![p]).unwrap())
        .fold(Value::from(0), |acc, v| &acc + &v);
    assert_eq!(total, 42.into());
}

#[test]
fn call_into_keeps_the_call_scope() {
    let e = Environment::new();
    let e = e
        .def_("stats", ["items"])
        .set("count", 0)
        .for_("n", var("items"))
        .set("count", var("count") + 1)
        .end()
        .ret(var("count"))
        .end();

    let stats = e.get("stats").unwrap().as_function().unwrap();
    let items = Value::List(vec![5.into(), 6.into(), 7.into()]);
    let scope = stats.call_into(vec![items]).unwrap();
    assert_eq!(scope.get("count").unwrap(), 3.into());
    assert_eq!(scope.last(), Some(3.into()));
}

#[test]
fn classes_define_construct_and_mutate() {
    let e = Environment::new();
    let mut class = e.class_("Foo");
    class
        .def_("__init__", ["self", "x"])
        .unwrap()
        .set("self__x", var("x"))
        .end()
        .def_("double", ["self"])
        .unwrap()
        .ret(var("self").attr("x") * 2)
        .end();
    class.close().unwrap();

    let foo_type = match e.get("Foo").unwrap() {
        Value::Type(t) => t,
        other => panic!("expected a type, got {other:?}"),
    };
    let foo = foo_type.construct(vec![21.into()]).unwrap();
    assert_eq!(foo.get_attr("x").unwrap(), 21.into());

    // methods fetched through the instance are bound to it
    let double = foo.get_attr("double").unwrap().as_function().unwrap();
    assert_eq!(double.call(vec![]).unwrap(), 42.into());

    // nested paths reach instance attributes through the environment
    e.set("foo", foo).unwrap();
    e.set("foo__x", 7).unwrap();
    assert_eq!(e.get("foo__x").unwrap(), 7.into());
}

#[test]
fn deferred_expressions_rebind_across_environments() {
    let outer = Environment::new();
    outer.set("b", 5).unwrap();
    outer.set("expr", var("b") * 2).unwrap();
    assert_eq!(
        tarn::reduce(outer.get("expr").unwrap(), &outer).unwrap(),
        10.into()
    );

    let inner = outer.child();
    inner.set("b", 20).unwrap();
    assert_eq!(
        tarn::reduce(outer.get("expr").unwrap(), &inner).unwrap(),
        40.into()
    );
}

#[test]
fn missing_variables_surface_at_call_time() {
    let e = Environment::new()
        .def_("broken", std::iter::empty::<&str>())
        .ret(var("nope"))
        .end();
    let broken = e.get("broken").unwrap().as_function().unwrap();
    assert!(matches!(
        broken.call(vec![]),
        Err(VMError::VariableDoesNotExist(_))
    ));
}

#[test]
fn arity_mismatches_name_the_function() {
    let e = Environment::new().def_("two", ["x", "y"]).ret(var("x")).end();
    let two = e.get("two").unwrap().as_function().unwrap();
    match two.call(vec![1.into()]) {
        Err(VMError::ArityMismatch(message)) => assert!(message.contains("two")),
        other => panic!("expected an arity error, got {other:?}"),
    }
}
