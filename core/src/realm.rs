//! Host capability surface: which native categories exist, their prototype
//! and constructor templates, and representative-instance construction.
//!
//! A realm is explicit one-time configuration. Building a classifier from a
//! realm captures the state of the realm's prototypes at that moment; the
//! realm itself stays live and can be tampered with afterwards, which is
//! exactly what the capture semantics are there to survive.

use std::collections::HashMap;
use std::collections::HashSet;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::trace;

use crate::natives;
use crate::value::NativeFn;
use crate::value::NativeSlot;
use crate::value::ObjectRef;
use crate::value::PropKey;
use crate::value::Property;
use crate::value::Symbol;
use crate::value::TypedArrayKind;
use crate::value::Value;

/// A native category the host can expose. One variant per global
/// constructor, mirroring the surface a full host provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Category {
    Object,
    Array,
    Function,
    RegExp,
    Date,
    Set,
    Map,
    WeakSet,
    WeakMap,
    WeakRef,
    FinalizationRegistry,
    BigInt,
    Promise,
    String,
    Number,
    Boolean,
    Symbol,
    DataView,
    MessagePort,
    ArrayBuffer,
    SharedArrayBuffer,
    Int8Array,
    Uint8Array,
    Uint8ClampedArray,
    Int16Array,
    Uint16Array,
    Int32Array,
    Uint32Array,
    Float32Array,
    Float64Array,
    BigInt64Array,
    BigUint64Array,
    Error,
    TypeError,
    RangeError,
    ReferenceError,
    SyntaxError,
    EvalError,
    UriError,
    AggregateError,
}

impl Category {
    /// Canonical type label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Object => "Object",
            Category::Array => "Array",
            Category::Function => "Function",
            Category::RegExp => "RegExp",
            Category::Date => "Date",
            Category::Set => "Set",
            Category::Map => "Map",
            Category::WeakSet => "WeakSet",
            Category::WeakMap => "WeakMap",
            Category::WeakRef => "WeakRef",
            Category::FinalizationRegistry => "FinalizationRegistry",
            Category::BigInt => "BigInt",
            Category::Promise => "Promise",
            Category::String => "String",
            Category::Number => "Number",
            Category::Boolean => "Boolean",
            Category::Symbol => "Symbol",
            Category::DataView => "DataView",
            Category::MessagePort => "MessagePort",
            Category::ArrayBuffer => "ArrayBuffer",
            Category::SharedArrayBuffer => "SharedArrayBuffer",
            Category::Int8Array => "Int8Array",
            Category::Uint8Array => "Uint8Array",
            Category::Uint8ClampedArray => "Uint8ClampedArray",
            Category::Int16Array => "Int16Array",
            Category::Uint16Array => "Uint16Array",
            Category::Int32Array => "Int32Array",
            Category::Uint32Array => "Uint32Array",
            Category::Float32Array => "Float32Array",
            Category::Float64Array => "Float64Array",
            Category::BigInt64Array => "BigInt64Array",
            Category::BigUint64Array => "BigUint64Array",
            Category::Error => "Error",
            Category::TypeError => "TypeError",
            Category::RangeError => "RangeError",
            Category::ReferenceError => "ReferenceError",
            Category::SyntaxError => "SyntaxError",
            Category::EvalError => "EvalError",
            Category::UriError => "URIError",
            Category::AggregateError => "AggregateError",
        }
    }

    /// Member of the error family (base or subtype).
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Category::Error
                | Category::TypeError
                | Category::RangeError
                | Category::ReferenceError
                | Category::SyntaxError
                | Category::EvalError
                | Category::UriError
                | Category::AggregateError
        )
    }

    /// Element-type flavor when this category is a typed-array view.
    pub fn typed_array_kind(self) -> Option<TypedArrayKind> {
        match self {
            Category::Int8Array => Some(TypedArrayKind::Int8),
            Category::Uint8Array => Some(TypedArrayKind::Uint8),
            Category::Uint8ClampedArray => Some(TypedArrayKind::Uint8Clamped),
            Category::Int16Array => Some(TypedArrayKind::Int16),
            Category::Uint16Array => Some(TypedArrayKind::Uint16),
            Category::Int32Array => Some(TypedArrayKind::Int32),
            Category::Uint32Array => Some(TypedArrayKind::Uint32),
            Category::Float32Array => Some(TypedArrayKind::Float32),
            Category::Float64Array => Some(TypedArrayKind::Float64),
            Category::BigInt64Array => Some(TypedArrayKind::BigInt64),
            Category::BigUint64Array => Some(TypedArrayKind::BigUint64),
            _ => None,
        }
    }
}

impl TypedArrayKind {
    pub fn category(self) -> Category {
        match self {
            TypedArrayKind::Int8 => Category::Int8Array,
            TypedArrayKind::Uint8 => Category::Uint8Array,
            TypedArrayKind::Uint8Clamped => Category::Uint8ClampedArray,
            TypedArrayKind::Int16 => Category::Int16Array,
            TypedArrayKind::Uint16 => Category::Uint16Array,
            TypedArrayKind::Int32 => Category::Int32Array,
            TypedArrayKind::Uint32 => Category::Uint32Array,
            TypedArrayKind::Float32 => Category::Float32Array,
            TypedArrayKind::Float64 => Category::Float64Array,
            TypedArrayKind::BigInt64 => Category::BigInt64Array,
            TypedArrayKind::BigUint64 => Category::BigUint64Array,
        }
    }
}

#[derive(Clone)]
struct CategoryRecord {
    constructor: ObjectRef,
    prototype: ObjectRef,
}

/// Constructed host surface. Categories absent from the realm behave like
/// facilities the embedding environment never shipped.
pub struct Realm {
    object_prototype: ObjectRef,
    typed_array_prototype: Option<ObjectRef>,
    records: HashMap<Category, CategoryRecord>,
}

impl Realm {
    /// Realm exposing every category.
    pub fn new() -> Self {
        Self::with_categories(Category::iter())
    }

    /// Realm exposing only the given categories. Useful for modelling a
    /// degraded host and for deterministic reduced-capability tests.
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let requested: HashSet<Category> = categories.into_iter().collect();
        let object_prototype = ObjectRef::plain(None);

        // Shared base prototype for every typed-array flavor, carrying the
        // iteration entry point and the element-type tag accessor.
        let typed_array_prototype = requested
            .iter()
            .any(|cat| cat.typed_array_kind().is_some())
            .then(|| {
                let proto = ObjectRef::plain(Some(object_prototype.clone()));
                proto.define(
                    PropKey::name("entries"),
                    Property::Data(Value::Function(natives::typed_array_entries)),
                );
                proto.define(PropKey::TypeTag, Property::Accessor(natives::typed_array_tag));
                proto
            });

        let mut records = HashMap::new();

        // Base error record goes first so subtype prototypes can chain
        // through it.
        if requested.contains(&Category::Error) {
            let record = Self::build_record(Category::Error, &object_prototype, None, None);
            records.insert(Category::Error, record);
        }
        let error_prototype = records
            .get(&Category::Error)
            .map(|record| record.prototype.clone());

        for cat in Category::iter() {
            if cat == Category::Error || !requested.contains(&cat) {
                continue;
            }
            let record = Self::build_record(
                cat,
                &object_prototype,
                typed_array_prototype.as_ref(),
                error_prototype.as_ref(),
            );
            records.insert(cat, record);
        }

        trace!(categories = records.len(), "realm constructed");
        Self {
            object_prototype,
            typed_array_prototype,
            records,
        }
    }

    fn build_record(
        cat: Category,
        object_prototype: &ObjectRef,
        typed_array_prototype: Option<&ObjectRef>,
        error_prototype: Option<&ObjectRef>,
    ) -> CategoryRecord {
        let prototype = if cat == Category::Object {
            object_prototype.clone()
        } else if cat.typed_array_kind().is_some() {
            let parent = typed_array_prototype.unwrap_or(object_prototype);
            ObjectRef::plain(Some(parent.clone()))
        } else if cat.is_error() && cat != Category::Error {
            let parent = error_prototype.unwrap_or(object_prototype);
            ObjectRef::plain(Some(parent.clone()))
        } else {
            ObjectRef::plain(Some(object_prototype.clone()))
        };

        if let Some((method, op)) = Self::distinguishing_method(cat) {
            prototype.define(PropKey::name(method), Property::Data(Value::Function(op)));
        }
        match cat {
            Category::ArrayBuffer => prototype.define(
                PropKey::name("byteLength"),
                Property::Accessor(natives::array_buffer_byte_length),
            ),
            Category::SharedArrayBuffer => prototype.define(
                PropKey::name("byteLength"),
                Property::Accessor(natives::shared_array_buffer_byte_length),
            ),
            _ => {}
        }
        if Self::has_tag_property(cat) {
            prototype.define(PropKey::TypeTag, Property::Data(Value::str(cat.label())));
        }
        if cat.is_error() {
            prototype.define(PropKey::name("name"), Property::Data(Value::str(cat.label())));
            prototype.define(PropKey::name("message"), Property::Data(Value::str("")));
        }

        let constructor = ObjectRef::new(
            NativeSlot::Constructor(cat),
            Some(object_prototype.clone()),
        );
        prototype.define(
            PropKey::name("constructor"),
            Property::Data(Value::Object(constructor.clone())),
        );
        CategoryRecord {
            constructor,
            prototype,
        }
    }

    /// The single most-distinguishing operation a category's prototype
    /// carries, under the name the host gives it.
    fn distinguishing_method(cat: Category) -> Option<(&'static str, NativeFn)> {
        match cat {
            Category::RegExp => Some(("test", natives::regexp_test)),
            Category::Date => Some(("toString", natives::date_to_string)),
            Category::Set => Some(("has", natives::set_has)),
            Category::Map => Some(("has", natives::map_has)),
            Category::WeakSet => Some(("has", natives::weak_set_has)),
            Category::WeakMap => Some(("has", natives::weak_map_has)),
            Category::WeakRef => Some(("deref", natives::weak_ref_deref)),
            Category::FinalizationRegistry => {
                Some(("unregister", natives::finalization_registry_unregister))
            }
            Category::BigInt => Some(("toString", natives::bigint_object_to_string)),
            Category::Promise => Some(("then", natives::promise_then)),
            Category::String => Some(("valueOf", natives::string_value_of)),
            Category::Number => Some(("toString", natives::number_to_string)),
            Category::Boolean => Some(("toString", natives::boolean_to_string)),
            Category::Symbol => Some(("toString", natives::symbol_to_string)),
            Category::DataView => Some(("getUint8", natives::data_view_get_uint8)),
            Category::MessagePort => Some(("hasRef", natives::message_port_has_ref)),
            Category::Error => Some(("toString", natives::error_to_string)),
            _ => None,
        }
    }

    /// Categories whose prototype declares a string type-tag property in a
    /// real host. The error family, arrays, functions, dates, regexps and
    /// the boxed string/number/boolean wrappers do not; their default tag
    /// comes from the internal slot instead.
    fn has_tag_property(cat: Category) -> bool {
        matches!(
            cat,
            Category::Set
                | Category::Map
                | Category::WeakSet
                | Category::WeakMap
                | Category::WeakRef
                | Category::FinalizationRegistry
                | Category::BigInt
                | Category::Promise
                | Category::Symbol
                | Category::DataView
                | Category::MessagePort
                | Category::ArrayBuffer
                | Category::SharedArrayBuffer
        )
    }

    pub fn supports(&self, cat: Category) -> bool {
        self.records.contains_key(&cat)
    }

    /// Live prototype template for a supported category.
    pub fn prototype(&self, cat: Category) -> Option<ObjectRef> {
        self.records.get(&cat).map(|record| record.prototype.clone())
    }

    pub fn constructor(&self, cat: Category) -> Option<ObjectRef> {
        self.records
            .get(&cat)
            .map(|record| record.constructor.clone())
    }

    pub fn object_prototype(&self) -> ObjectRef {
        self.object_prototype.clone()
    }

    pub(crate) fn typed_array_prototype(&self) -> Option<&ObjectRef> {
        self.typed_array_prototype.as_ref()
    }

    fn proto_or_object(&self, cat: Category) -> ObjectRef {
        self.prototype(cat)
            .unwrap_or_else(|| self.object_prototype.clone())
    }

    fn wrap(&self, slot: NativeSlot, cat: Category) -> Value {
        Value::Object(ObjectRef::new(slot, Some(self.proto_or_object(cat))))
    }

    pub fn plain_object(&self) -> Value {
        Value::Object(ObjectRef::plain(Some(self.object_prototype.clone())))
    }

    pub fn array(&self, elements: Vec<Value>) -> Value {
        self.wrap(NativeSlot::Array(elements), Category::Array)
    }

    pub fn regexp(&self, source: &str) -> Value {
        self.wrap(
            NativeSlot::RegExp {
                source: source.to_string(),
            },
            Category::RegExp,
        )
    }

    pub fn date(&self, epoch_ms: f64) -> Value {
        self.wrap(NativeSlot::Date { epoch_ms }, Category::Date)
    }

    pub fn set(&self) -> Value {
        self.wrap(NativeSlot::Set, Category::Set)
    }

    pub fn map(&self) -> Value {
        self.wrap(NativeSlot::Map, Category::Map)
    }

    pub fn weak_set(&self) -> Value {
        self.wrap(NativeSlot::WeakSet, Category::WeakSet)
    }

    pub fn weak_map(&self) -> Value {
        self.wrap(NativeSlot::WeakMap, Category::WeakMap)
    }

    pub fn weak_ref(&self, target: Value) -> Value {
        self.wrap(NativeSlot::WeakRef { target }, Category::WeakRef)
    }

    pub fn finalization_registry(&self) -> Value {
        self.wrap(
            NativeSlot::FinalizationRegistry,
            Category::FinalizationRegistry,
        )
    }

    pub fn boxed_bigint(&self, value: i128) -> Value {
        self.wrap(NativeSlot::BoxedBigInt(value), Category::BigInt)
    }

    pub fn promise(&self) -> Value {
        self.wrap(NativeSlot::Promise, Category::Promise)
    }

    pub fn boxed_string(&self, value: &str) -> Value {
        self.wrap(NativeSlot::BoxedString(value.to_string()), Category::String)
    }

    pub fn boxed_number(&self, value: f64) -> Value {
        self.wrap(NativeSlot::BoxedNumber(value), Category::Number)
    }

    pub fn boxed_boolean(&self, value: bool) -> Value {
        self.wrap(NativeSlot::BoxedBoolean(value), Category::Boolean)
    }

    pub fn boxed_symbol(&self, value: Symbol) -> Value {
        self.wrap(NativeSlot::BoxedSymbol(value), Category::Symbol)
    }

    pub fn data_view(&self) -> Value {
        self.wrap(NativeSlot::DataView, Category::DataView)
    }

    pub fn message_port(&self) -> Value {
        self.wrap(NativeSlot::MessagePort, Category::MessagePort)
    }

    pub fn array_buffer(&self, byte_length: usize) -> Value {
        self.wrap(NativeSlot::ArrayBuffer { byte_length }, Category::ArrayBuffer)
    }

    pub fn shared_array_buffer(&self, byte_length: usize) -> Value {
        self.wrap(
            NativeSlot::SharedArrayBuffer { byte_length },
            Category::SharedArrayBuffer,
        )
    }

    pub fn typed_array(&self, kind: TypedArrayKind, len: usize) -> Value {
        self.wrap(NativeSlot::TypedArray { kind, len }, kind.category())
    }

    /// Error instance. `cat` should name a member of the error family; any
    /// other category degrades to a base error shape.
    pub fn error(&self, cat: Category, message: &str) -> Value {
        let cat = if cat.is_error() { cat } else { Category::Error };
        let obj = ObjectRef::new(NativeSlot::Error, Some(self.proto_or_object(cat)));
        if !message.is_empty() {
            obj.define(PropKey::name("message"), Property::Data(Value::str(message)));
        }
        Value::Object(obj)
    }

    /// The exotic parameter-collection object a function invocation sees.
    pub fn arguments_object(&self, args: Vec<Value>) -> Value {
        Value::Object(ObjectRef::new(
            NativeSlot::Arguments(args),
            Some(self.object_prototype.clone()),
        ))
    }

    pub fn function(&self) -> Value {
        Value::Function(natives::function_noop)
    }

    /// Representative instance of a supported category, or `None` when the
    /// realm does not expose it. This is the entry point fixture harnesses
    /// use to enumerate the host surface dynamically.
    pub fn instance(&self, cat: Category) -> Option<Value> {
        if !self.supports(cat) {
            return None;
        }
        if let Some(kind) = cat.typed_array_kind() {
            return Some(self.typed_array(kind, 4));
        }
        if cat.is_error() {
            return Some(self.error(cat, ""));
        }
        let value = match cat {
            Category::Object => self.plain_object(),
            Category::Array => self.array(Vec::new()),
            Category::Function => self.function(),
            Category::RegExp => self.regexp("x"),
            Category::Date => self.date(0.0),
            Category::Set => self.set(),
            Category::Map => self.map(),
            Category::WeakSet => self.weak_set(),
            Category::WeakMap => self.weak_map(),
            Category::WeakRef => self.weak_ref(self.plain_object()),
            Category::FinalizationRegistry => self.finalization_registry(),
            Category::BigInt => self.boxed_bigint(100),
            Category::Promise => self.promise(),
            Category::String => self.boxed_string("abc"),
            Category::Number => self.boxed_number(123.0),
            Category::Boolean => self.boxed_boolean(true),
            Category::Symbol => self.boxed_symbol(Symbol::new("x")),
            Category::DataView => self.data_view(),
            Category::MessagePort => self.message_port(),
            Category::ArrayBuffer => self.array_buffer(8),
            Category::SharedArrayBuffer => self.shared_array_buffer(8),
            // Typed arrays and errors are handled above; nothing else
            // remains.
            _ => return None,
        };
        Some(value)
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}
