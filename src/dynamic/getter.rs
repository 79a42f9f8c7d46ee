use std::collections::HashMap;

use crate::dynamic::value::{FieldValue, Kind, StructValue, Value};
use crate::dynamic::{Result, StructError};

static NULL: Value = Value::Null;

/// Name-keyed reader over one struct value.
///
/// Construction fails unless the target is [`Value::Struct`]. Accessors come
/// in two surfaces: `try_*` methods return the error, their strict twins
/// panic with the same message for programmer contract violations. `has` and
/// the `is_*` predicates never fail and answer `false` for absent names.
#[derive(Debug)]
pub struct Getter<'a> {
	target: &'a StructValue,
	index: HashMap<&'a str, usize>,
}

impl<'a> Getter<'a> {
	/// Wrap a struct value, building the name index.
	pub fn new(value: &'a Value) -> Result<Self> {
		let Value::Struct(target) = value else {
			return Err(StructError::InvalidTarget {
				kind: value.kind().as_str(),
			});
		};
		Ok(Self::from_struct(target))
	}

	fn from_struct(target: &'a StructValue) -> Self {
		let mut index = HashMap::with_capacity(target.fields.len());
		for (pos, field) in target.fields.iter().enumerate() {
			index.entry(field.name.as_ref()).or_insert(pos);
		}
		Self { target, index }
	}

	/// Type name of the wrapped struct.
	pub fn type_name(&self) -> &'a str {
		self.target.type_name.as_ref()
	}

	/// Number of fields, private ones included.
	pub fn num_fields(&self) -> usize {
		self.target.fields.len()
	}

	/// Field names in declaration order.
	pub fn names(&self) -> Vec<&'a str> {
		self.target.fields.iter().map(|field| field.name.as_ref()).collect()
	}

	/// Whether a field with this name exists.
	pub fn has(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	fn field(&self, name: &str) -> Option<&'a FieldValue> {
		self.index.get(name).map(|&pos| &self.target.fields[pos])
	}

	fn field_or_err(&self, name: &str) -> Result<&'a FieldValue> {
		self.field(name).ok_or_else(|| StructError::FieldNotFound {
			name: name.to_owned(),
			type_name: self.target.type_name.to_string(),
		})
	}

	/// Kind of the named field.
	pub fn try_kind_of(&self, name: &str) -> Result<Kind> {
		Ok(self.field_or_err(name)?.value.kind())
	}

	/// Kind of the named field. Panics when the field is absent.
	#[track_caller]
	pub fn kind_of(&self, name: &str) -> Kind {
		must(self.try_kind_of(name))
	}

	/// Raw value of the named field. Private fields yield [`Value::Null`].
	pub fn try_value_of(&self, name: &str) -> Result<&'a Value> {
		let field = self.field_or_err(name)?;
		if !field.public {
			return Ok(&NULL);
		}
		Ok(&field.value)
	}

	/// Raw value of the named field. Panics when the field is absent.
	#[track_caller]
	pub fn value_of(&self, name: &str) -> &'a Value {
		must(self.try_value_of(name))
	}

	/// Lenient string extraction: string fields yield their content, any
	/// other present kind yields its plain rendering.
	pub fn try_string(&self, name: &str) -> Result<String> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::String(text) => Ok(text.to_string()),
			other => Ok(other.to_string()),
		}
	}

	/// Lenient string extraction. Panics when the field is absent.
	#[track_caller]
	pub fn as_string(&self, name: &str) -> String {
		must(self.try_string(name))
	}

	/// Signed integer extraction, requires an int64 field.
	pub fn try_int64(&self, name: &str) -> Result<i64> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::I64(raw) => Ok(*raw),
			other => Err(type_mismatch(name, "int64", other)),
		}
	}

	/// Signed integer extraction. Panics on absent or mismatched fields.
	#[track_caller]
	pub fn as_int64(&self, name: &str) -> i64 {
		must(self.try_int64(name))
	}

	/// Unsigned integer extraction, requires a uint64 field.
	pub fn try_uint64(&self, name: &str) -> Result<u64> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::U64(raw) => Ok(*raw),
			other => Err(type_mismatch(name, "uint64", other)),
		}
	}

	/// Unsigned integer extraction. Panics on absent or mismatched fields.
	#[track_caller]
	pub fn as_uint64(&self, name: &str) -> u64 {
		must(self.try_uint64(name))
	}

	/// Float extraction: accepts float64 and widens float32.
	pub fn try_float64(&self, name: &str) -> Result<f64> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::F64(raw) => Ok(*raw),
			Value::F32(raw) => Ok(f64::from(*raw)),
			other => Err(type_mismatch(name, "float64", other)),
		}
	}

	/// Float extraction. Panics on absent or mismatched fields.
	#[track_caller]
	pub fn as_float64(&self, name: &str) -> f64 {
		must(self.try_float64(name))
	}

	/// Boolean extraction, requires a bool field.
	pub fn try_bool(&self, name: &str) -> Result<bool> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::Bool(raw) => Ok(*raw),
			other => Err(type_mismatch(name, "bool", other)),
		}
	}

	/// Boolean extraction. Panics on absent or mismatched fields.
	#[track_caller]
	pub fn as_bool(&self, name: &str) -> bool {
		must(self.try_bool(name))
	}

	/// Byte string extraction: accepts bytes fields and sequences whose
	/// elements are all integers in `0..=255`.
	pub fn try_bytes(&self, name: &str) -> Result<Vec<u8>> {
		let field = self.field_or_err(name)?;
		match &field.value {
			Value::Bytes(data) => Ok(data.clone()),
			Value::Seq(items) => {
				let mut out = Vec::with_capacity(items.len());
				for item in items {
					let byte = match item {
						Value::I64(raw) => u8::try_from(*raw).ok(),
						Value::U64(raw) => u8::try_from(*raw).ok(),
						_ => None,
					};
					let Some(byte) = byte else {
						return Err(type_mismatch(name, "bytes", &field.value));
					};
					out.push(byte);
				}
				Ok(out)
			}
			other => Err(type_mismatch(name, "bytes", other)),
		}
	}

	/// Byte string extraction. Panics on absent or mismatched fields.
	#[track_caller]
	pub fn as_bytes(&self, name: &str) -> Vec<u8> {
		must(self.try_bytes(name))
	}

	fn kind_is(&self, name: &str, kind: Kind) -> bool {
		self.field(name).is_some_and(|field| field.value.kind() == kind)
	}

	/// Whether the named field exists and holds a bool.
	pub fn is_bool(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Bool)
	}

	/// Whether the named field exists and holds a signed integer.
	pub fn is_int64(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Int64)
	}

	/// Whether the named field exists and holds an unsigned integer.
	pub fn is_uint64(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Uint64)
	}

	/// Whether the named field exists and holds a 32-bit float.
	pub fn is_float32(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Float32)
	}

	/// Whether the named field exists and holds a 64-bit float. A float32
	/// field does not count.
	pub fn is_float64(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Float64)
	}

	/// Whether the named field exists and holds a byte string.
	pub fn is_bytes(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Bytes)
	}

	/// Whether the named field exists and holds a string.
	pub fn is_string(&self, name: &str) -> bool {
		self.kind_is(name, Kind::String)
	}

	/// Whether the named field exists and holds a sequence. Byte strings
	/// count as sequences.
	pub fn is_seq(&self, name: &str) -> bool {
		self.field(name)
			.is_some_and(|field| matches!(field.value.kind(), Kind::Seq | Kind::Bytes))
	}

	/// Whether the named field exists and holds a map.
	pub fn is_map(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Map)
	}

	/// Whether the named field exists and holds a struct.
	pub fn is_struct(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Struct)
	}

	/// Whether the named field exists and holds a callable slot.
	pub fn is_func(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Func)
	}

	/// Whether the named field exists and holds a channel slot.
	pub fn is_chan(&self, name: &str) -> bool {
		self.kind_is(name, Kind::Chan)
	}

	/// Map a transform over a sequence-of-structs field.
	///
	/// Each element is wrapped in a nested getter and passed to `transform`
	/// with its position; results are collected in order. An empty sequence
	/// yields an empty vec. Any non-struct element fails the whole call.
	pub fn map_over<R, F>(&self, name: &str, mut transform: F) -> Result<Vec<R>>
	where
		F: FnMut(usize, &Getter<'_>) -> R,
	{
		let field = self.field_or_err(name)?;
		let Value::Seq(items) = &field.value else {
			return Err(StructError::ExpectedStructSeq {
				name: name.to_owned(),
				got: field.value.kind().as_str().to_owned(),
			});
		};

		let mut out = Vec::with_capacity(items.len());
		for (pos, item) in items.iter().enumerate() {
			let Value::Struct(element) = item else {
				return Err(StructError::ExpectedStructSeq {
					name: name.to_owned(),
					got: format!("element {pos} is {}", item.kind()),
				});
			};
			let nested = Getter::from_struct(element);
			out.push(transform(pos, &nested));
		}
		Ok(out)
	}
}

fn type_mismatch(name: &str, expected: &'static str, got: &Value) -> StructError {
	StructError::TypeMismatch {
		name: name.to_owned(),
		expected,
		got: got.kind().as_str(),
	}
}

#[track_caller]
fn must<T>(result: Result<T>) -> T {
	match result {
		Ok(value) => value,
		Err(err) => panic!("{err}"),
	}
}

#[cfg(test)]
mod tests;
