mod builder;
mod decl;
mod decoder;
mod error;
mod getter;
mod ident;
mod inspect;
mod value;

/// Dynamic struct registration and construction types.
pub use builder::{Builder, DynamicStruct, FieldSpec, FieldType};
/// JSON decoding entry points and options.
pub use decoder::{DecodeOptions, DecodeResult, JsonDecoder};
/// Error and result aliases.
pub use error::{Result, StructError};
/// Name-keyed struct field accessor.
pub use getter::Getter;
/// Field exposure trait for native types.
pub use inspect::Inspect;
/// Runtime tagged value types.
pub use value::{FieldValue, Kind, StructValue, Value};
