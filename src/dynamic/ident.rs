use crate::dynamic::{Result, StructError};

/// Normalize a raw document key into a CamelCase field name.
///
/// Splits on `_` and `-`, uppercases each segment head, and keeps the rest of
/// the segment as written. Keys that cannot produce a legal identifier are
/// rejected rather than escaped.
pub(crate) fn camelize_key(raw: &str) -> Result<String> {
	if raw.is_empty() || !raw.is_ascii() {
		return Err(StructError::InvalidFieldName { name: raw.to_owned() });
	}

	let mut out = String::with_capacity(raw.len());
	for segment in raw.split(['_', '-']) {
		let mut chars = segment.chars();
		let Some(first) = chars.next() else {
			continue;
		};
		out.push(first.to_ascii_uppercase());
		out.push_str(chars.as_str());
	}

	if !is_legal_field_name(&out) {
		return Err(StructError::InvalidFieldName { name: raw.to_owned() });
	}
	Ok(out)
}

/// Whether `name` is a legal field identifier: ASCII, leading alpha or `_`,
/// then alphanumerics and `_`.
pub(crate) fn is_legal_field_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	if !first.is_ascii_alphabetic() && first != '_' {
		return false;
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
