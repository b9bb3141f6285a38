//! Dynamic value model the classifier operates on.
//!
//! Values are either primitive kinds or shared mutable objects. An object
//! carries an immutable internal slot (the behavioral payload a native
//! constructor installs), a mutable prototype link, and a mutable property
//! table. Classification must hold up when the prototype link and the
//! property table are tampered with; only the internal slot is trusted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::realm::Category;

/// The one internal failure kind: a native operation was invoked on a
/// receiver it does not structurally apply to. Never surfaced to callers
/// of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("native operation does not apply to this receiver")]
pub struct NotApplicable;

/// An origin-pinned native operation. Plain function pointers keep capture
/// semantics honest: once a probe table holds one, no later mutation of any
/// object or prototype can redirect the call.
pub type NativeFn = fn(&Value, &[Value]) -> Result<Value, NotApplicable>;

/// A symbol primitive with a descriptive label.
#[derive(Debug, Clone)]
pub struct Symbol {
    description: Rc<str>,
}

impl Symbol {
    pub fn new(description: &str) -> Self {
        Self {
            description: Rc::from(description),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Element-type flavor of a fixed-width numeric array view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    pub fn label(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }
}

/// Internal slot installed by a native constructor. Fixed at construction
/// time; prototype surgery cannot add, remove, or change it.
#[derive(Debug, Clone)]
pub enum NativeSlot {
    /// Ordinary object with no native behavior.
    None,
    /// A native constructor function object.
    Constructor(Category),
    Array(Vec<Value>),
    Arguments(Vec<Value>),
    RegExp { source: String },
    Date { epoch_ms: f64 },
    Set,
    Map,
    WeakSet,
    WeakMap,
    WeakRef { target: Value },
    FinalizationRegistry,
    Promise,
    BoxedBigInt(i128),
    BoxedString(String),
    BoxedNumber(f64),
    BoxedBoolean(bool),
    BoxedSymbol(Symbol),
    DataView,
    MessagePort,
    ArrayBuffer { byte_length: usize },
    SharedArrayBuffer { byte_length: usize },
    TypedArray { kind: TypedArrayKind, len: usize },
    Error,
}

/// Property key: a plain string name or the distinguished type-tag key
/// (the analogue of the well-known stringification-tag symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKey {
    Name(String),
    TypeTag,
}

impl PropKey {
    pub fn name(name: &str) -> Self {
        PropKey::Name(name.to_string())
    }
}

/// Data property or accessor. Accessors only model getters; that is the
/// only shape the classifier ever has to reason about.
#[derive(Debug, Clone)]
pub enum Property {
    Data(Value),
    Accessor(NativeFn),
}

#[derive(Debug)]
struct ObjectData {
    proto: Option<ObjectRef>,
    slot: NativeSlot,
    props: HashMap<PropKey, Property>,
}

/// Shared mutable reference to an object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    pub fn new(slot: NativeSlot, proto: Option<ObjectRef>) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            proto,
            slot,
            props: HashMap::new(),
        })))
    }

    /// Ordinary object with no internal slot.
    pub fn plain(proto: Option<ObjectRef>) -> Self {
        Self::new(NativeSlot::None, proto)
    }

    pub fn proto(&self) -> Option<ObjectRef> {
        self.0.borrow().proto.clone()
    }

    /// Replace the prototype link. Returns false (and leaves the object
    /// untouched) if the new chain would contain the object itself; chains
    /// must stay acyclic so walks terminate.
    pub fn set_proto(&self, proto: Option<ObjectRef>) -> bool {
        let mut cursor = proto.clone();
        while let Some(object) = cursor {
            if Rc::ptr_eq(&object.0, &self.0) {
                return false;
            }
            cursor = object.proto();
        }
        self.0.borrow_mut().proto = proto;
        true
    }

    pub fn define(&self, key: PropKey, prop: Property) {
        self.0.borrow_mut().props.insert(key, prop);
    }

    /// Own property, without consulting the prototype chain.
    pub fn own(&self, key: &PropKey) -> Option<Property> {
        self.0.borrow().props.get(key).cloned()
    }

    /// First property found walking the prototype chain.
    pub fn lookup(&self, key: &PropKey) -> Option<Property> {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(prop) = object.own(key) {
                return Some(prop);
            }
            current = object.proto();
        }
        None
    }

    /// Resolve a property to a value, invoking an accessor with the given
    /// receiver. A failing accessor propagates as `NotApplicable`.
    pub fn get(&self, key: &PropKey, receiver: &Value) -> Result<Option<Value>, NotApplicable> {
        match self.lookup(key) {
            None => Ok(None),
            Some(Property::Data(value)) => Ok(Some(value)),
            Some(Property::Accessor(getter)) => getter(receiver, &[]).map(Some),
        }
    }

    /// Inspect the internal slot. The slot is never handed out by value;
    /// holding the borrow inside the closure keeps callers from storing it.
    pub fn with_slot<R>(&self, f: impl FnOnce(&NativeSlot) -> R) -> R {
        f(&self.0.borrow().slot)
    }

    /// Trustworthy array-identity test: reads the internal slot, never the
    /// prototype chain or any tag the object exposes.
    pub fn is_array(&self) -> bool {
        self.with_slot(|slot| matches!(slot, NativeSlot::Array(_)))
    }

    pub fn same(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: prototype chains share objects and tests
        // deliberately mangle them.
        let data = self.0.borrow();
        f.debug_struct("ObjectRef")
            .field("slot", &data.slot)
            .finish_non_exhaustive()
    }
}

/// A dynamically-typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(String),
    Symbol(Symbol),
    Function(NativeFn),
    Object(ObjectRef),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}
