//! One-time construction of the ordered probe table.
//!
//! Each entry pins the category's distinguishing operation as it exists on
//! the realm's live prototype at build time. Later patching of a prototype
//! method cannot redirect an already-captured entry; a table built after
//! the patch sees the patched world, which is the same trade a host makes
//! when it reads `Ctor.prototype.method` once at startup.

use regex_lite::Regex;
use tracing::trace;

use crate::realm::Category;
use crate::realm::Realm;
use crate::value::NativeFn;
use crate::value::PropKey;
use crate::value::Property;
use crate::value::Value;

/// Ordered candidates. Relative order is load-bearing: earlier entries win
/// on any value that could satisfy more than one operation's minimal
/// contract, and some operations would spuriously succeed on later
/// categories' instances if tried after them.
const METHOD_PROBES: &[(Category, &str)] = &[
    (Category::RegExp, "test"),
    (Category::Date, "toString"),
    (Category::Set, "has"),
    (Category::Map, "has"),
    (Category::WeakSet, "has"),
    (Category::WeakMap, "has"),
    (Category::WeakRef, "deref"),
    (Category::FinalizationRegistry, "unregister"),
    (Category::BigInt, "toString"),
    (Category::Promise, "then"),
    (Category::String, "valueOf"),
    (Category::Number, "toString"),
    (Category::Boolean, "toString"),
    (Category::Symbol, "toString"),
    (Category::DataView, "getUint8"),
    (Category::MessagePort, "hasRef"),
];

const ERROR_NAME_PATTERN: &str = r"^(.+Error)(:|$)";

pub(crate) struct Probe {
    pub(crate) label: &'static str,
    pub(crate) op: NativeFn,
    pub(crate) args: Vec<Value>,
}

pub(crate) struct TypedArrayProbe {
    pub(crate) entries: NativeFn,
    pub(crate) tag: NativeFn,
}

pub(crate) struct ProbeTable {
    pub(crate) probes: Vec<Probe>,
    pub(crate) typed_array: Option<TypedArrayProbe>,
    pub(crate) error_to_string: Option<NativeFn>,
    pub(crate) error_name: Regex,
}

impl ProbeTable {
    pub(crate) fn build(realm: &Realm) -> Self {
        let mut probes = Vec::new();
        for (cat, method) in METHOD_PROBES {
            let Some(proto) = realm.prototype(*cat) else {
                continue;
            };
            let Some(Property::Data(Value::Function(op))) = proto.own(&PropKey::name(method))
            else {
                continue;
            };
            let args = if *cat == Category::FinalizationRegistry {
                // The unregister operation insists on an object token.
                vec![realm.plain_object()]
            } else {
                Vec::new()
            };
            probes.push(Probe {
                label: cat.label(),
                op,
                args,
            });
        }

        // Buffer identity goes through the byteLength accessor rather than
        // a method.
        for cat in [Category::ArrayBuffer, Category::SharedArrayBuffer] {
            let Some(proto) = realm.prototype(cat) else {
                continue;
            };
            let Some(Property::Accessor(op)) = proto.own(&PropKey::name("byteLength")) else {
                continue;
            };
            probes.push(Probe {
                label: cat.label(),
                op,
                args: Vec::new(),
            });
        }

        let typed_array = realm.typed_array_prototype().and_then(|proto| {
            let Some(Property::Data(Value::Function(entries))) =
                proto.own(&PropKey::name("entries"))
            else {
                return None;
            };
            let Some(Property::Accessor(tag)) = proto.own(&PropKey::TypeTag) else {
                return None;
            };
            Some(TypedArrayProbe { entries, tag })
        });

        let error_to_string = realm.prototype(Category::Error).and_then(|proto| {
            match proto.own(&PropKey::name("toString")) {
                Some(Property::Data(Value::Function(op))) => Some(op),
                _ => None,
            }
        });

        #[expect(clippy::expect_used)]
        let error_name = Regex::new(ERROR_NAME_PATTERN).expect("literal pattern compiles");

        trace!(
            probes = probes.len(),
            typed_array = typed_array.is_some(),
            error = error_to_string.is_some(),
            "probe table constructed"
        );
        Self {
            probes,
            typed_array,
            error_to_string,
            error_name,
        }
    }
}
