//! The classification pipeline: a fixed chain of increasingly specific
//! checks, each either conclusive or a silent fall-through.

use std::borrow::Cow;

use crate::probe::ProbeTable;
use crate::realm::Realm;
use crate::value::NativeSlot;
use crate::value::ObjectRef;
use crate::value::PropKey;
use crate::value::Property;
use crate::value::Value;

/// Canonical type label. Probe labels are static; error subtype names
/// recovered from text are owned.
pub type TypeLabel = Cow<'static, str>;

/// Classifier over an immutable probe table built once from a realm.
pub struct Classifier {
    table: ProbeTable,
}

impl Classifier {
    /// Capture the realm's current native surface. The resulting
    /// classifier is unaffected by anything done to the realm afterwards.
    pub fn new(realm: &Realm) -> Self {
        Self {
            table: ProbeTable::build(realm),
        }
    }

    /// Total function: always returns a label, never fails. A probe that
    /// raises is treated as inconclusive and the next one is tried.
    pub fn classify(&self, value: &Value) -> TypeLabel {
        match value {
            // Callables never go through structural probing.
            Value::Function(_) => Cow::Borrowed("Function"),
            // Non-composite kinds cannot be spoofed; report them directly.
            Value::Undefined => Cow::Borrowed("undefined"),
            Value::Bool(_) => Cow::Borrowed("boolean"),
            Value::Number(_) => Cow::Borrowed("number"),
            Value::BigInt(_) => Cow::Borrowed("bigint"),
            Value::Str(_) => Cow::Borrowed("string"),
            Value::Symbol(_) => Cow::Borrowed("symbol"),
            Value::Null => Cow::Borrowed("null"),
            Value::Object(obj) => self.classify_object(obj),
        }
    }

    fn classify_object(&self, obj: &ObjectRef) -> TypeLabel {
        // Array identity comes from the internal slot, ahead of the probe
        // table: array subclass instances would otherwise be misread by
        // the later tag inspection.
        if obj.is_array() {
            return Cow::Borrowed("Array");
        }

        let receiver = Value::Object(obj.clone());
        for probe in &self.table.probes {
            if (probe.op)(&receiver, &probe.args).is_ok() {
                return Cow::Borrowed(probe.label);
            }
        }

        // Typed arrays: the flavor comes from the captured element-type
        // tag accessor, never from a tag the value itself exposes.
        if let Some(typed) = &self.table.typed_array {
            if (typed.entries)(&receiver, &[]).is_ok() {
                if let Ok(Value::Str(tag)) = (typed.tag)(&receiver, &[]) {
                    return Cow::Owned(tag);
                }
            }
        }

        // Errors: the captured base-error string conversion recovers the
        // original subtype name from "<Name>Error[: message]" text.
        if let Some(error_to_string) = self.table.error_to_string {
            if let Ok(Value::Str(text)) = error_to_string(&receiver, &[]) {
                if let Some(captures) = self.table.error_name.captures(&text) {
                    if let Some(name) = captures.get(1) {
                        return Cow::Owned(name.as_str().to_string());
                    }
                }
            }
        }

        // Host built-ins not covered by the table fall back to the default
        // tag, but only when no custom tag override sits anywhere on the
        // chain; a genuine override is respected by not trusting it.
        if !has_tag_override(obj) {
            return Cow::Borrowed(default_tag(obj));
        }

        Cow::Borrowed("Object")
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&Realm::new())
    }
}

/// Walks the chain checking own properties only; nothing overridable is
/// invoked. A string-valued data property or any accessor counts.
fn has_tag_override(obj: &ObjectRef) -> bool {
    let mut current = Some(obj.clone());
    while let Some(object) = current {
        match object.own(&PropKey::TypeTag) {
            Some(Property::Data(Value::Str(_))) | Some(Property::Accessor(_)) => return true,
            _ => {}
        }
        current = object.proto();
    }
    false
}

/// The engine-internal stringifier tag, derived from the internal slot.
fn default_tag(obj: &ObjectRef) -> &'static str {
    obj.with_slot(|slot| match slot {
        NativeSlot::Arguments(_) => "Arguments",
        NativeSlot::Error => "Error",
        NativeSlot::Array(_) => "Array",
        NativeSlot::Date { .. } => "Date",
        NativeSlot::RegExp { .. } => "RegExp",
        NativeSlot::BoxedString(_) => "String",
        NativeSlot::BoxedNumber(_) => "Number",
        NativeSlot::BoxedBoolean(_) => "Boolean",
        NativeSlot::Constructor(_) => "Function",
        _ => "Object",
    })
}

/// Classify with a per-thread default classifier over a full-capability
/// realm, built on first use.
pub fn type_of(value: &Value) -> TypeLabel {
    thread_local! {
        static DEFAULT: Classifier = Classifier::default();
    }
    DEFAULT.with(|classifier| classifier.classify(value))
}
