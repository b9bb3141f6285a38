use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;
use typeprobe_core::Category;
use typeprobe_core::Classifier;
use typeprobe_core::Realm;
use typeprobe_core::Value;
use typeprobe_core::type_of;

#[test]
fn every_hosted_category_is_identified() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    for cat in Category::iter() {
        let Some(value) = realm.instance(cat) else {
            panic!("no instance for {}", cat.label());
        };
        assert_eq!(classifier.classify(&value), cat.label());
    }
}

#[test]
fn typed_array_flavors_report_their_element_type() {
    let realm = Realm::new();
    for kind in Category::iter().filter_map(Category::typed_array_kind) {
        let value = realm.typed_array(kind, 4);
        assert_eq!(type_of(&value), kind.label());
    }
}

#[test]
fn wrappers_and_buffers_are_distinguished() {
    let realm = Realm::new();
    assert_eq!(type_of(&realm.boxed_string("abc")), "String");
    assert_eq!(type_of(&realm.boxed_number(1.5)), "Number");
    assert_eq!(type_of(&realm.boxed_boolean(false)), "Boolean");
    assert_eq!(type_of(&realm.boxed_bigint(100)), "BigInt");
    assert_eq!(type_of(&realm.array_buffer(8)), "ArrayBuffer");
    assert_eq!(type_of(&realm.shared_array_buffer(8)), "SharedArrayBuffer");
    assert_eq!(type_of(&realm.data_view()), "DataView");
    assert_eq!(type_of(&realm.message_port()), "MessagePort");
}

#[test]
fn error_family_reports_subtypes() {
    let realm = Realm::new();
    assert_eq!(type_of(&realm.error(Category::TypeError, "bad")), "TypeError");
    assert_eq!(type_of(&realm.error(Category::RangeError, "")), "RangeError");
    assert_eq!(
        type_of(&realm.error(Category::AggregateError, "several")),
        "AggregateError"
    );
    // The base error name does not carry a subtype prefix; it resolves
    // through the default-tag fallback instead.
    assert_eq!(type_of(&realm.error(Category::Error, "plain")), "Error");
}

#[test]
fn arguments_objects_are_identified() {
    let realm = Realm::new();
    let value = realm.arguments_object(vec![Value::Number(1.0), Value::str("two")]);
    assert_eq!(type_of(&value), "Arguments");
}

#[test]
fn native_constructors_classify_as_functions() {
    let realm = Realm::new();
    let Some(ctor) = realm.constructor(Category::Map) else {
        panic!("Map constructor missing");
    };
    assert_eq!(type_of(&Value::Object(ctor)), "Function");
}

#[test]
fn hosts_without_a_facility_skip_its_probe() {
    let full = Realm::new();
    let without_shared =
        Realm::with_categories(Category::iter().filter(|cat| *cat != Category::SharedArrayBuffer));
    let classifier = Classifier::new(&without_shared);
    // The value still carries its tag, which is an override and therefore
    // not trusted.
    assert_eq!(classifier.classify(&full.shared_array_buffer(8)), "Object");
    // Everything else is unaffected.
    assert_eq!(classifier.classify(&full.array_buffer(8)), "ArrayBuffer");
}
