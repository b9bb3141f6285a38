mod builtins;
mod primitives;
mod tampering;

use typeprobe_core::ObjectRef;
use typeprobe_core::Value;

pub(crate) fn as_object(value: &Value) -> &ObjectRef {
    match value.as_object() {
        Some(obj) => obj,
        None => panic!("expected a composite value"),
    }
}
