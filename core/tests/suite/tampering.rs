//! Adversarial fixtures: prototype surgery, tag spoofing, and late method
//! patching must not move a value out of its native category.

use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;
use typeprobe_core::Category;
use typeprobe_core::Classifier;
use typeprobe_core::NotApplicable;
use typeprobe_core::PropKey;
use typeprobe_core::Property;
use typeprobe_core::Realm;
use typeprobe_core::TypedArrayKind;
use typeprobe_core::Value;

use super::as_object;

/// Categories exercised by the alteration matrix. The error family is
/// excluded (altered error subtypes are a documented unresolvable case)
/// and so are callables, which are not composite in this value model.
fn adversarial_targets() -> Vec<Category> {
    Category::iter()
        .filter(|cat| !cat.is_error() && *cat != Category::Function)
        .collect()
}

fn is_error_subtype(cat: Category) -> bool {
    cat.is_error() && cat != Category::Error
}

#[test]
fn labels_survive_prototype_removal() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    for target in adversarial_targets() {
        let Some(value) = realm.instance(target) else {
            panic!("no instance for {}", target.label());
        };
        assert!(as_object(&value).set_proto(None));
        assert_eq!(
            classifier.classify(&value),
            target.label(),
            "{} with no prototype",
            target.label()
        );
    }
}

#[test]
fn labels_survive_foreign_prototype_templates() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    for target in adversarial_targets() {
        // Prototype-swapped promises are a documented unresolvable case.
        if target == Category::Promise {
            continue;
        }
        for source in Category::iter() {
            if source == target {
                continue;
            }
            // An object given an error subtype template legitimately
            // reports that subtype; see the carve-out test below.
            if target == Category::Object && is_error_subtype(source) {
                continue;
            }
            let Some(proto) = realm.prototype(source) else {
                panic!("no prototype for {}", source.label());
            };
            let Some(value) = realm.instance(target) else {
                panic!("no instance for {}", target.label());
            };
            assert!(as_object(&value).set_proto(Some(proto)));
            assert_eq!(
                classifier.classify(&value),
                target.label(),
                "{} with {} template",
                target.label(),
                source.label()
            );
        }
    }
}

#[test]
fn labels_survive_foreign_instance_prototypes() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    for target in adversarial_targets() {
        if target == Category::Promise {
            continue;
        }
        for source in Category::iter() {
            // Callables are not composite in this model and cannot serve
            // as prototypes.
            if source == Category::Function {
                continue;
            }
            if target == Category::Object && is_error_subtype(source) {
                continue;
            }
            let Some(proto_value) = realm.instance(source) else {
                panic!("no instance for {}", source.label());
            };
            let proto = as_object(&proto_value).clone();
            let Some(value) = realm.instance(target) else {
                panic!("no instance for {}", target.label());
            };
            assert!(as_object(&value).set_proto(Some(proto)));
            assert_eq!(
                classifier.classify(&value),
                target.label(),
                "{} with {} instance prototype",
                target.label(),
                source.label()
            );
        }
    }
}

#[test]
fn prototype_swapped_promises_are_unknowable() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    let promise = realm.promise();
    let Some(map_proto) = realm.prototype(Category::Map) else {
        panic!("Map prototype missing");
    };
    assert!(as_object(&promise).set_proto(Some(map_proto)));
    // The species constructor resolved through the foreign chain cannot
    // build the derived promise, and the foreign tag is not trusted.
    assert_eq!(classifier.classify(&promise), "Object");
}

#[test]
fn error_subtypes_lose_their_name_with_their_prototype() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    let error = realm.error(Category::TypeError, "bad");
    assert!(as_object(&error).set_proto(None));
    // The subtype name lived on the removed chain; the internal slot
    // still identifies the value as an error.
    assert_eq!(classifier.classify(&error), "Error");
}

#[test]
fn objects_adopting_an_error_prototype_report_that_subtype() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);

    let object = realm.plain_object();
    let Some(type_error_proto) = realm.prototype(Category::TypeError) else {
        panic!("TypeError prototype missing");
    };
    assert!(as_object(&object).set_proto(Some(type_error_proto)));
    assert_eq!(classifier.classify(&object), "TypeError");

    let other = realm.plain_object();
    let range_error = realm.error(Category::RangeError, "");
    assert!(as_object(&other).set_proto(Some(as_object(&range_error).clone())));
    assert_eq!(classifier.classify(&other), "RangeError");
}

fn broken_has(_this: &Value, _args: &[Value]) -> Result<Value, NotApplicable> {
    Err(NotApplicable)
}

#[test]
fn late_method_patching_does_not_affect_a_built_classifier() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    let Some(map_proto) = realm.prototype(Category::Map) else {
        panic!("Map prototype missing");
    };
    map_proto.define(
        PropKey::name("has"),
        Property::Data(Value::Function(broken_has)),
    );
    // The captured original is unaffected by the live prototype's patch.
    assert_eq!(classifier.classify(&realm.map()), "Map");

    // A classifier built after the patch captures the broken operation;
    // the map is then only reachable through its prototype tag, which is
    // an override and therefore not trusted.
    let late = Classifier::new(&realm);
    assert_eq!(late.classify(&realm.map()), "Object");
}

#[test]
fn custom_tags_are_never_trusted() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);

    // A spoofed tag on a native instance loses to the structural probe.
    let map = realm.map();
    as_object(&map).define(PropKey::TypeTag, Property::Data(Value::str("Date")));
    assert_eq!(classifier.classify(&map), "Map");

    // A spoofed tag on a typed array loses to the captured flavor getter,
    // which reads the internal slot only.
    let ints = realm.typed_array(TypedArrayKind::Int32, 4);
    as_object(&ints).define(PropKey::TypeTag, Property::Data(Value::str("Date")));
    assert_eq!(classifier.classify(&ints), "Int32Array");

    // A tagged plain object stays a plain object rather than becoming
    // whatever it claims to be.
    let object = realm.plain_object();
    as_object(&object).define(PropKey::TypeTag, Property::Data(Value::str("RegExp")));
    assert_eq!(classifier.classify(&object), "Object");

    // Accessor tags count as overrides without being invoked.
    let with_getter = realm.plain_object();
    as_object(&with_getter).define(PropKey::TypeTag, Property::Accessor(tag_getter));
    assert_eq!(classifier.classify(&with_getter), "Object");

    // A tag installed on an arguments object hides the default tag.
    let arguments = realm.arguments_object(Vec::new());
    as_object(&arguments).define(PropKey::TypeTag, Property::Data(Value::str("Array")));
    assert_eq!(classifier.classify(&arguments), "Object");
}

fn tag_getter(_this: &Value, _args: &[Value]) -> Result<Value, NotApplicable> {
    Ok(Value::str("Promise"))
}

#[test]
fn non_string_tag_data_is_not_an_override() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    let arguments = realm.arguments_object(Vec::new());
    as_object(&arguments).define(PropKey::TypeTag, Property::Data(Value::Number(5.0)));
    assert_eq!(classifier.classify(&arguments), "Arguments");
}

#[test]
fn inherited_tag_overrides_are_detected() {
    let realm = Realm::new();
    let classifier = Classifier::new(&realm);
    let parent = realm.plain_object();
    as_object(&parent).define(PropKey::TypeTag, Property::Data(Value::str("Custom")));
    let arguments = realm.arguments_object(Vec::new());
    assert!(as_object(&arguments).set_proto(Some(as_object(&parent).clone())));
    assert_eq!(classifier.classify(&arguments), "Object");
}
