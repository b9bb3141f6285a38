use pretty_assertions::assert_eq;
use typeprobe_core::Realm;
use typeprobe_core::Symbol;
use typeprobe_core::Value;
use typeprobe_core::type_of;

#[test]
fn primitive_kinds_are_reported_directly() {
    assert_eq!(type_of(&Value::Null), "null");
    assert_eq!(type_of(&Value::Undefined), "undefined");
    assert_eq!(type_of(&Value::str("abc")), "string");
    assert_eq!(type_of(&Value::Bool(true)), "boolean");
    assert_eq!(type_of(&Value::Bool(false)), "boolean");
    assert_eq!(type_of(&Value::Number(123.0)), "number");
    assert_eq!(type_of(&Value::Number(f64::NAN)), "number");
    assert_eq!(type_of(&Value::Symbol(Symbol::new("abc"))), "symbol");
    assert_eq!(type_of(&Value::BigInt(100)), "bigint");
}

#[test]
fn callables_short_circuit_to_function() {
    let realm = Realm::new();
    assert_eq!(type_of(&realm.function()), "Function");
}

#[test]
fn classification_is_referentially_transparent() {
    let realm = Realm::new();
    let values = [
        Value::Null,
        Value::Number(1.0),
        realm.map(),
        realm.regexp("a+"),
        realm.plain_object(),
    ];
    let first: Vec<_> = values.iter().map(type_of).collect();
    let second: Vec<_> = values.iter().map(type_of).collect();
    assert_eq!(first, second);
}
