use std::collections::HashSet;

use crate::dynamic::ident::is_legal_field_name;
use crate::dynamic::value::{FieldValue, StructValue, Value};
use crate::dynamic::{Result, StructError, decl};

/// Type descriptor for one dynamic struct field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
	/// Untyped slot, accepts any value.
	Any,
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
	/// UTF-8 string.
	String,
	/// Byte string.
	Bytes,
	/// Sequence with one element type.
	Seq(Box<FieldType>),
	/// Map with key and value types. Keys must be string, int64, uint64, or bool.
	Map(Box<FieldType>, Box<FieldType>),
	/// Nested dynamic struct.
	Struct(DynamicStruct),
	/// Opaque callable slot.
	Func,
	/// Opaque channel slot.
	Chan,
}

/// One field registration: name, type, optional tag, embedding flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
	/// Field name, unique within its struct.
	pub name: Box<str>,
	/// Field type descriptor.
	pub ty: FieldType,
	/// Optional raw tag, carried into the definition and re-serialization.
	pub tag: Option<Box<str>>,
	/// Whether the field is embedded rather than named in the definition.
	pub anonymous: bool,
}

/// Accumulates field registrations for a [`DynamicStruct`].
///
/// Adders are chainable and perform no validation; [`Builder::build`] checks
/// names, duplicates, and kind restrictions in one pass and can be called
/// repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Builder {
	specs: Vec<FieldSpec>,
}

impl Builder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a field with an explicit type descriptor.
	pub fn add_field(self, name: &str, ty: FieldType) -> Self {
		self.push(name, ty, None, false)
	}

	/// Register a field carrying a raw tag.
	pub fn add_field_with_tag(self, name: &str, ty: FieldType, tag: &str) -> Self {
		self.push(name, ty, Some(tag), false)
	}

	/// Register an embedded struct field. Only struct kinds may be embedded.
	pub fn add_anonymous_field(self, name: &str, ty: FieldType) -> Self {
		self.push(name, ty, None, true)
	}

	/// Register an untyped field.
	pub fn add_any(self, name: &str) -> Self {
		self.add_field(name, FieldType::Any)
	}

	/// Register a bool field.
	pub fn add_bool(self, name: &str) -> Self {
		self.add_field(name, FieldType::Bool)
	}

	/// Register a signed integer field.
	pub fn add_int64(self, name: &str) -> Self {
		self.add_field(name, FieldType::Int64)
	}

	/// Register an unsigned integer field.
	pub fn add_uint64(self, name: &str) -> Self {
		self.add_field(name, FieldType::Uint64)
	}

	/// Register a 32-bit float field.
	pub fn add_float32(self, name: &str) -> Self {
		self.add_field(name, FieldType::Float32)
	}

	/// Register a 64-bit float field.
	pub fn add_float64(self, name: &str) -> Self {
		self.add_field(name, FieldType::Float64)
	}

	/// Register a string field.
	pub fn add_string(self, name: &str) -> Self {
		self.add_field(name, FieldType::String)
	}

	/// Register a byte string field.
	pub fn add_bytes(self, name: &str) -> Self {
		self.add_field(name, FieldType::Bytes)
	}

	/// Register a sequence field with the given element type.
	pub fn add_seq_of(self, name: &str, elem: FieldType) -> Self {
		self.add_field(name, FieldType::Seq(Box::new(elem)))
	}

	/// Register a map field with the given key and value types.
	pub fn add_map_of(self, name: &str, key: FieldType, value: FieldType) -> Self {
		self.add_field(name, FieldType::Map(Box::new(key), Box::new(value)))
	}

	/// Register a nested dynamic struct field.
	pub fn add_struct(self, name: &str, nested: DynamicStruct) -> Self {
		self.add_field(name, FieldType::Struct(nested))
	}

	/// Register a callable slot field.
	pub fn add_func(self, name: &str) -> Self {
		self.add_field(name, FieldType::Func)
	}

	/// Register a channel slot field.
	pub fn add_chan(self, name: &str) -> Self {
		self.add_field(name, FieldType::Chan)
	}

	/// Drop every registration with this name. No-op when absent.
	pub fn remove_field(mut self, name: &str) -> Self {
		self.specs.retain(|spec| spec.name.as_ref() != name);
		self
	}

	/// Whether a registration with this name exists.
	pub fn exists(&self, name: &str) -> bool {
		self.specs.iter().any(|spec| spec.name.as_ref() == name)
	}

	/// Number of registrations, duplicates included.
	pub fn num_fields(&self) -> usize {
		self.specs.len()
	}

	fn push(mut self, name: &str, ty: FieldType, tag: Option<&str>, anonymous: bool) -> Self {
		self.specs.push(FieldSpec {
			name: name.into(),
			ty,
			tag: tag.map(Into::into),
			anonymous,
		});
		self
	}

	/// Validate registrations and produce an immutable [`DynamicStruct`].
	///
	/// Fields are stored sorted by name, so insertion order never changes the
	/// result. The builder is left untouched and may be built again.
	pub fn build(&self) -> Result<DynamicStruct> {
		let mut seen = HashSet::with_capacity(self.specs.len());
		for spec in &self.specs {
			if !is_legal_field_name(&spec.name) {
				return Err(StructError::InvalidFieldName {
					name: spec.name.to_string(),
				});
			}
			if spec.anonymous && !matches!(spec.ty, FieldType::Struct(_)) {
				return Err(StructError::UnsupportedKind {
					name: spec.name.to_string(),
					detail: "anonymous field must be a struct".to_owned(),
				});
			}
			check_field_type(&spec.name, &spec.ty)?;
			if !seen.insert(spec.name.as_ref()) {
				return Err(StructError::DuplicateField {
					name: spec.name.to_string(),
				});
			}
		}

		let mut specs = self.specs.clone();
		specs.sort_by(|a, b| a.name.cmp(&b.name));
		Ok(DynamicStruct { specs })
	}
}

/// Runtime-built struct type: an immutable, name-sorted list of field specs.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicStruct {
	specs: Vec<FieldSpec>,
}

impl DynamicStruct {
	/// Number of fields.
	pub fn num_fields(&self) -> usize {
		self.specs.len()
	}

	/// Field specs sorted by name.
	pub fn fields(&self) -> &[FieldSpec] {
		&self.specs
	}

	/// Look up one field spec by name.
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.specs
			.binary_search_by(|spec| spec.name.as_ref().cmp(name))
			.ok()
			.map(|pos| &self.specs[pos])
	}

	/// Canonical multi-line textual definition of this struct.
	pub fn definition(&self) -> String {
		decl::render_definition(self)
	}

	/// Materialize a struct value with every field zero-valued by kind.
	pub fn new_instance(&self) -> Value {
		Value::Struct(StructValue {
			type_name: "Dynamic".into(),
			fields: self
				.specs
				.iter()
				.map(|spec| FieldValue {
					name: spec.name.clone(),
					value: zero_value(&spec.ty),
					public: true,
				})
				.collect(),
		})
	}
}

fn check_field_type(name: &str, ty: &FieldType) -> Result<()> {
	match ty {
		FieldType::Seq(elem) => check_field_type(name, elem),
		FieldType::Map(key, value) => {
			if !matches!(
				**key,
				FieldType::String | FieldType::Int64 | FieldType::Uint64 | FieldType::Bool
			) {
				return Err(StructError::UnsupportedKind {
					name: name.to_owned(),
					detail: format!("map key kind {}", decl::type_expr(key)),
				});
			}
			check_field_type(name, value)
		}
		_ => Ok(()),
	}
}

fn zero_value(ty: &FieldType) -> Value {
	match ty {
		FieldType::Any => Value::Null,
		FieldType::Bool => Value::Bool(false),
		FieldType::Int64 => Value::I64(0),
		FieldType::Uint64 => Value::U64(0),
		FieldType::Float32 => Value::F32(0.0),
		FieldType::Float64 => Value::F64(0.0),
		FieldType::String => Value::String("".into()),
		FieldType::Bytes => Value::Bytes(Vec::new()),
		FieldType::Seq(_) => Value::Seq(Vec::new()),
		FieldType::Map(_, _) => Value::Map(std::collections::BTreeMap::new()),
		FieldType::Struct(nested) => nested.new_instance(),
		FieldType::Func => Value::Func,
		FieldType::Chan => Value::Chan,
	}
}
