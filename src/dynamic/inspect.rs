use crate::dynamic::value::{StructValue, Value};

/// Capability for native types to expose their fields as a tagged value.
///
/// Implementations list fields by hand; the `From` conversions on [`Value`]
/// keep that cheap. The result is usually [`Value::Struct`], which a
/// [`Getter`](crate::dynamic::Getter) can then be constructed over.
pub trait Inspect {
	/// Tagged representation of `self`.
	fn inspect(&self) -> Value;
}

impl Inspect for Value {
	fn inspect(&self) -> Value {
		self.clone()
	}
}

impl Inspect for StructValue {
	fn inspect(&self) -> Value {
		Value::Struct(self.clone())
	}
}
