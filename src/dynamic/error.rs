use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, StructError>;

/// Errors produced while accessing struct values, building dynamic structs, and decoding JSON.
#[derive(Debug, Error)]
pub enum StructError {
	/// Getter was constructed over a value that is not a struct.
	#[error("getter target must be a struct value, got {kind}")]
	InvalidTarget {
		/// Kind of the rejected target value.
		kind: &'static str,
	},
	/// Requested field name does not exist on the struct.
	#[error("field not found: {name} on {type_name}")]
	FieldNotFound {
		/// Requested field name.
		name: String,
		/// Type name of the struct that was searched.
		type_name: String,
	},
	/// Field exists but holds a different kind than the accessor requires.
	#[error("field type mismatch for {name}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Accessed field name.
		name: String,
		/// Kind required by the accessor.
		expected: &'static str,
		/// Actual kind of the stored value.
		got: &'static str,
	},
	/// Element mapping was requested over a field that is not a sequence of structs.
	#[error("expected sequence of structs for {name}: {got}")]
	ExpectedStructSeq {
		/// Accessed field name.
		name: String,
		/// Description of the offending value or element.
		got: String,
	},
	/// Two fields with the same name were registered on one builder.
	#[error("duplicate field name: {name}")]
	DuplicateField {
		/// Colliding field name.
		name: String,
	},
	/// Field uses a kind the dynamic struct model cannot represent.
	#[error("unsupported kind for field {name}: {detail}")]
	UnsupportedKind {
		/// Offending field name.
		name: String,
		/// What made the kind unsupported.
		detail: String,
	},
	/// Field name is empty or not a legal identifier.
	#[error("invalid field name: {name:?}")]
	InvalidFieldName {
		/// Rejected raw name.
		name: String,
	},
	/// Input bytes were not valid JSON.
	#[error("malformed json: {0}")]
	MalformedInput(#[from] serde_json::Error),
	/// JSON value has a shape the decoder does not map to a field kind.
	#[error("unsupported json shape at {key}: {detail}")]
	UnsupportedShape {
		/// Document key under which the shape appeared (`$` for the top level).
		key: String,
		/// Description of the offending shape.
		detail: String,
	},
	/// Top-level document exceeded the configured field limit.
	#[error("too many fields: count={count}, max={max}")]
	TooManyFields {
		/// Fields present in the document.
		count: usize,
		/// Maximum permitted fields.
		max: usize,
	},
	/// Value nesting exceeded the configured depth limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}
