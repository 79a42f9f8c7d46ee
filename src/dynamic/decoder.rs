use serde_json::Value as JsonValue;

use crate::dynamic::builder::{Builder, DynamicStruct, FieldType};
use crate::dynamic::getter::Getter;
use crate::dynamic::ident::camelize_key;
use crate::dynamic::value::{FieldValue, StructValue, Value};
use crate::dynamic::{Result, StructError};

/// Runtime limits for JSON decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth below one field for untyped values.
	pub max_depth: u32,
	/// Maximum number of top-level fields.
	pub max_fields: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_fields: 1024,
		}
	}
}

/// Decodes one JSON object into a dynamic struct and a populated instance.
///
/// Field names are camelized document keys, field types are inferred from the
/// document values, and every original key is carried as the field tag.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
	options: DecodeOptions,
}

/// Outcome of a decode: the derived schema plus the populated instance.
#[derive(Debug, Clone)]
pub struct DecodeResult {
	/// Schema derived from the document keys.
	pub dynamic_struct: DynamicStruct,
	/// Populated struct value mirroring the document.
	pub decoded: Value,
}

impl JsonDecoder {
	/// Decoder with default limits.
	pub fn new() -> Self {
		Self::default()
	}

	/// Decoder with explicit limits.
	pub fn with_options(options: DecodeOptions) -> Self {
		Self { options }
	}

	/// Decode raw bytes holding one JSON object.
	///
	/// Fails on malformed JSON, a non-object top level, keys that cannot
	/// become legal field names, value shapes without a field kind mapping,
	/// and configured limit violations. Nothing is produced on error.
	pub fn decode(&self, data: &[u8]) -> Result<DecodeResult> {
		let root: JsonValue = serde_json::from_slice(data)?;
		let JsonValue::Object(object) = root else {
			return Err(StructError::UnsupportedShape {
				key: "$".to_owned(),
				detail: format!("top-level value must be an object, got {}", json_kind(&root)),
			});
		};
		if object.len() > self.options.max_fields {
			return Err(StructError::TooManyFields {
				count: object.len(),
				max: self.options.max_fields,
			});
		}

		let mut builder = Builder::new();
		let mut fields = Vec::with_capacity(object.len());
		for (key, raw) in &object {
			let name = camelize_key(key)?;
			let ty = infer_field_type(key, raw)?;
			fields.push(FieldValue {
				name: name.as_str().into(),
				value: json_to_value(key, raw, &self.options, 0)?,
				public: true,
			});
			builder = builder.add_field_with_tag(&name, ty, key);
		}
		let dynamic_struct = builder.build()?;

		fields.sort_by(|a, b| a.name.cmp(&b.name));
		let decoded = Value::Struct(StructValue {
			type_name: "Dynamic".into(),
			fields,
		});
		Ok(DecodeResult { dynamic_struct, decoded })
	}
}

impl DecodeResult {
	/// Getter over the populated instance.
	pub fn getter(&self) -> Result<Getter<'_>> {
		Getter::new(&self.decoded)
	}

	/// Re-serialize the populated instance as a JSON tree.
	///
	/// Keys come from field tags (falling back to field names), so a decoded
	/// document round-trips to its original shape.
	pub fn to_json_value(&self) -> Result<JsonValue> {
		let Value::Struct(instance) = &self.decoded else {
			return Err(StructError::InvalidTarget {
				kind: self.decoded.kind().as_str(),
			});
		};
		struct_to_json(&self.dynamic_struct, instance)
	}
}

fn infer_field_type(key: &str, raw: &JsonValue) -> Result<FieldType> {
	match raw {
		JsonValue::Null => Ok(FieldType::Any),
		JsonValue::Bool(_) => Ok(FieldType::Bool),
		JsonValue::Number(_) => Ok(FieldType::Float64),
		JsonValue::String(_) => Ok(FieldType::String),
		JsonValue::Object(members) => {
			let value = if members.values().all(JsonValue::is_string) {
				FieldType::String
			} else {
				FieldType::Any
			};
			Ok(FieldType::Map(Box::new(FieldType::String), Box::new(value)))
		}
		JsonValue::Array(items) => infer_seq_type(key, items),
	}
}

fn infer_seq_type(key: &str, items: &[JsonValue]) -> Result<FieldType> {
	let Some(first) = items.first() else {
		return Ok(FieldType::Seq(Box::new(FieldType::Any)));
	};
	let elem = match first {
		JsonValue::Bool(_) => FieldType::Bool,
		JsonValue::Number(_) => FieldType::Float64,
		JsonValue::String(_) => FieldType::String,
		JsonValue::Object(_) => FieldType::Map(Box::new(FieldType::String), Box::new(FieldType::Any)),
		JsonValue::Null => {
			return Err(StructError::UnsupportedShape {
				key: key.to_owned(),
				detail: "array with null element".to_owned(),
			});
		}
		JsonValue::Array(_) => {
			return Err(StructError::UnsupportedShape {
				key: key.to_owned(),
				detail: "array of arrays".to_owned(),
			});
		}
	};

	for (pos, item) in items.iter().enumerate() {
		let uniform = matches!(
			(&elem, item),
			(FieldType::Bool, JsonValue::Bool(_))
				| (FieldType::Float64, JsonValue::Number(_))
				| (FieldType::String, JsonValue::String(_))
				| (FieldType::Map(_, _), JsonValue::Object(_))
		);
		if !uniform {
			return Err(StructError::UnsupportedShape {
				key: key.to_owned(),
				detail: format!("mixed array element kinds at index {pos}"),
			});
		}
	}
	Ok(FieldType::Seq(Box::new(elem)))
}

fn json_to_value(key: &str, raw: &JsonValue, opt: &DecodeOptions, depth: u32) -> Result<Value> {
	if depth > opt.max_depth {
		return Err(StructError::DepthExceeded {
			max_depth: opt.max_depth,
		});
	}
	match raw {
		JsonValue::Null => Ok(Value::Null),
		JsonValue::Bool(flag) => Ok(Value::Bool(*flag)),
		JsonValue::Number(number) => {
			let Some(raw) = number.as_f64() else {
				return Err(StructError::UnsupportedShape {
					key: key.to_owned(),
					detail: "number not representable as float64".to_owned(),
				});
			};
			Ok(Value::F64(raw))
		}
		JsonValue::String(text) => Ok(Value::String(text.as_str().into())),
		JsonValue::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(json_to_value(key, item, opt, depth + 1)?);
			}
			Ok(Value::Seq(out))
		}
		JsonValue::Object(members) => {
			let mut out = std::collections::BTreeMap::new();
			for (name, member) in members {
				out.insert(name.as_str().into(), json_to_value(key, member, opt, depth + 1)?);
			}
			Ok(Value::Map(out))
		}
	}
}

fn struct_to_json(schema: &DynamicStruct, instance: &StructValue) -> Result<JsonValue> {
	let mut members = serde_json::Map::with_capacity(instance.fields.len());
	for field in &instance.fields {
		let spec = schema.field(&field.name);
		let key = spec.and_then(|found| found.tag.as_deref()).unwrap_or(field.name.as_ref());
		let converted = match (spec.map(|found| &found.ty), &field.value) {
			(Some(FieldType::Struct(nested)), Value::Struct(inner)) => struct_to_json(nested, inner)?,
			(_, value) => value_to_json(&field.name, value)?,
		};
		members.insert(key.to_owned(), converted);
	}
	Ok(JsonValue::Object(members))
}

fn value_to_json(name: &str, value: &Value) -> Result<JsonValue> {
	match value {
		Value::Null => Ok(JsonValue::Null),
		Value::Bool(flag) => Ok((*flag).into()),
		Value::I64(raw) => Ok((*raw).into()),
		Value::U64(raw) => Ok((*raw).into()),
		Value::F32(raw) => float_to_json(name, f64::from(*raw)),
		Value::F64(raw) => float_to_json(name, *raw),
		Value::Bytes(data) => Ok(JsonValue::Array(data.iter().map(|byte| JsonValue::from(*byte)).collect())),
		Value::String(text) => Ok(JsonValue::String(text.to_string())),
		Value::Seq(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(value_to_json(name, item)?);
			}
			Ok(JsonValue::Array(out))
		}
		Value::Map(entries) => {
			let mut members = serde_json::Map::with_capacity(entries.len());
			for (key, member) in entries {
				members.insert(key.to_string(), value_to_json(name, member)?);
			}
			Ok(JsonValue::Object(members))
		}
		Value::Struct(inner) => {
			let mut members = serde_json::Map::with_capacity(inner.fields.len());
			for field in &inner.fields {
				members.insert(field.name.to_string(), value_to_json(&field.name, &field.value)?);
			}
			Ok(JsonValue::Object(members))
		}
		Value::Func | Value::Chan => Err(StructError::UnsupportedKind {
			name: name.to_owned(),
			detail: format!("{} is not representable in json", value.kind()),
		}),
	}
}

fn float_to_json(name: &str, raw: f64) -> Result<JsonValue> {
	let Some(number) = serde_json::Number::from_f64(raw) else {
		return Err(StructError::UnsupportedKind {
			name: name.to_owned(),
			detail: "non-finite float".to_owned(),
		});
	};
	Ok(JsonValue::Number(number))
}

fn json_kind(raw: &JsonValue) -> &'static str {
	match raw {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
