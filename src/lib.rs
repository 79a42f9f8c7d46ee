//! Runtime struct reflection over tagged values: name-keyed field access,
//! dynamic struct construction, and JSON decoding into dynamic structs.

/// Tagged value model, field accessor, dynamic struct builder, and JSON decoder.
pub mod dynamic;
