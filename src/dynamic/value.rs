use std::collections::BTreeMap;
use std::fmt;

/// Runtime tagged value.
///
/// Every component of this crate operates on this representation: native
/// types report their fields as a [`StructValue`], dynamic struct instances
/// are materialized as one, and the JSON decoder produces one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value, nil pointer, or JSON null.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer, any source width.
	I64(i64),
	/// Unsigned integer, any source width.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Raw byte string.
	Bytes(Vec<u8>),
	/// UTF-8 string.
	String(Box<str>),
	/// Ordered sequence of values.
	Seq(Vec<Value>),
	/// String-keyed map with deterministic iteration order.
	Map(BTreeMap<Box<str>, Value>),
	/// Named struct with ordered fields.
	Struct(StructValue),
	/// Opaque callable slot, kind only.
	Func,
	/// Opaque channel slot, kind only.
	Chan,
}

/// One struct as a bag of named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Struct type name.
	pub type_name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One named field inside a [`StructValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
	/// Whether raw access to the value is allowed.
	pub public: bool,
}

impl FieldValue {
	/// Public field with the given name and value.
	pub fn new(name: &str, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			public: true,
		}
	}

	/// Private field: raw access is masked, typed access still works.
	pub fn private(name: &str, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			public: false,
		}
	}
}

/// Flat kind discriminator for [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	/// Null value.
	Null,
	/// Boolean.
	Bool,
	/// Signed integer.
	Int64,
	/// Unsigned integer.
	Uint64,
	/// 32-bit float.
	Float32,
	/// 64-bit float.
	Float64,
	/// Byte string.
	Bytes,
	/// UTF-8 string.
	String,
	/// Sequence.
	Seq,
	/// String-keyed map.
	Map,
	/// Struct bag.
	Struct,
	/// Callable slot.
	Func,
	/// Channel slot.
	Chan,
}

impl Kind {
	/// Lowercase kind name used in errors and definitions.
	pub fn as_str(self) -> &'static str {
		match self {
			Kind::Null => "null",
			Kind::Bool => "bool",
			Kind::Int64 => "int64",
			Kind::Uint64 => "uint64",
			Kind::Float32 => "float32",
			Kind::Float64 => "float64",
			Kind::Bytes => "bytes",
			Kind::String => "string",
			Kind::Seq => "seq",
			Kind::Map => "map",
			Kind::Struct => "struct",
			Kind::Func => "func",
			Kind::Chan => "chan",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Value {
	/// Kind of this value.
	pub fn kind(&self) -> Kind {
		match self {
			Value::Null => Kind::Null,
			Value::Bool(_) => Kind::Bool,
			Value::I64(_) => Kind::Int64,
			Value::U64(_) => Kind::Uint64,
			Value::F32(_) => Kind::Float32,
			Value::F64(_) => Kind::Float64,
			Value::Bytes(_) => Kind::Bytes,
			Value::String(_) => Kind::String,
			Value::Seq(_) => Kind::Seq,
			Value::Map(_) => Kind::Map,
			Value::Struct(_) => Kind::Struct,
			Value::Func => Kind::Func,
			Value::Chan => Kind::Chan,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(flag) => write!(f, "{flag}"),
			Value::I64(raw) => write!(f, "{raw}"),
			Value::U64(raw) => write!(f, "{raw}"),
			Value::F32(raw) => write!(f, "{raw}"),
			Value::F64(raw) => write!(f, "{raw}"),
			Value::Bytes(data) => {
				f.write_str("0x")?;
				for byte in data {
					write!(f, "{byte:02x}")?;
				}
				Ok(())
			}
			Value::String(text) => f.write_str(text),
			Value::Seq(items) => {
				f.write_str("[")?;
				for (pos, item) in items.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(members) => {
				f.write_str("{")?;
				for (pos, (name, member)) in members.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{name}: {member}")?;
				}
				f.write_str("}")
			}
			Value::Struct(item) => write!(f, "{item}"),
			Value::Func => f.write_str("func"),
			Value::Chan => f.write_str("chan"),
		}
	}
}

impl fmt::Display for StructValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{{", self.type_name)?;
		for (pos, field) in self.fields.iter().enumerate() {
			if pos > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}: {}", field.name, field.value)?;
		}
		f.write_str("}")
	}
}

macro_rules! value_from_signed {
	($($source:ty),*) => {$(
		impl From<$source> for Value {
			fn from(raw: $source) -> Self {
				Value::I64(i64::from(raw))
			}
		}
	)*};
}

macro_rules! value_from_unsigned {
	($($source:ty),*) => {$(
		impl From<$source> for Value {
			fn from(raw: $source) -> Self {
				Value::U64(u64::from(raw))
			}
		}
	)*};
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<bool> for Value {
	fn from(raw: bool) -> Self {
		Value::Bool(raw)
	}
}

impl From<f32> for Value {
	fn from(raw: f32) -> Self {
		Value::F32(raw)
	}
}

impl From<f64> for Value {
	fn from(raw: f64) -> Self {
		Value::F64(raw)
	}
}

impl From<&str> for Value {
	fn from(raw: &str) -> Self {
		Value::String(raw.into())
	}
}

impl From<String> for Value {
	fn from(raw: String) -> Self {
		Value::String(raw.into_boxed_str())
	}
}

impl From<Box<str>> for Value {
	fn from(raw: Box<str>) -> Self {
		Value::String(raw)
	}
}

impl From<Vec<u8>> for Value {
	fn from(raw: Vec<u8>) -> Self {
		Value::Bytes(raw)
	}
}

impl From<Vec<Value>> for Value {
	fn from(raw: Vec<Value>) -> Self {
		Value::Seq(raw)
	}
}

impl From<BTreeMap<Box<str>, Value>> for Value {
	fn from(raw: BTreeMap<Box<str>, Value>) -> Self {
		Value::Map(raw)
	}
}

impl From<StructValue> for Value {
	fn from(raw: StructValue) -> Self {
		Value::Struct(raw)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(raw: Option<T>) -> Self {
		match raw {
			Some(inner) => inner.into(),
			None => Value::Null,
		}
	}
}
