//! Tamper-resistant runtime type identification for dynamic values.
//!
//! Given an arbitrary [`Value`], [`type_of`] returns a canonical label
//! ("Array", "Map", "RegExp", "TypeError", "Int32Array", "Object", ...)
//! that holds up when the value's apparent identity has been manipulated:
//! prototype swapped to another category's template, custom type tags
//! installed, methods patched after the fact. Detection is structural; it
//! trusts what a value *is*, never what it claims to be.
//!
//! The classifier probes with operations captured once from a [`Realm`],
//! the explicit model of which native categories the host exposes. Build a
//! [`Classifier`] from a reduced realm to model a degraded host.

mod classify;
mod natives;
mod probe;
pub mod realm;
pub mod value;

pub use classify::Classifier;
pub use classify::TypeLabel;
pub use classify::type_of;
pub use realm::Category;
pub use realm::Realm;
pub use value::NativeFn;
pub use value::NativeSlot;
pub use value::NotApplicable;
pub use value::ObjectRef;
pub use value::PropKey;
pub use value::Property;
pub use value::Symbol;
pub use value::TypedArrayKind;
pub use value::Value;
