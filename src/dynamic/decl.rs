use crate::dynamic::builder::{DynamicStruct, FieldSpec, FieldType};

/// Render the canonical multi-line definition of a built dynamic struct.
///
/// One line per field in stored (name-sorted) order, tab-indented, with a
/// backtick tag section when a tag is present. No trailing newline.
pub(crate) fn render_definition(item: &DynamicStruct) -> String {
	let mut out = String::new();
	out.push_str("struct Dynamic {");
	if item.fields().is_empty() {
		out.push('}');
		return out;
	}
	for spec in item.fields() {
		out.push('\n');
		push_field_line(&mut out, spec, 1);
	}
	out.push_str("\n}");
	out
}

/// Render one type descriptor as a compact expression, for error details.
pub(crate) fn type_expr(ty: &FieldType) -> String {
	let mut out = String::new();
	push_type_expr(&mut out, ty, 0);
	out
}

fn push_field_line(out: &mut String, spec: &FieldSpec, depth: usize) {
	push_indent(out, depth);
	if !spec.anonymous {
		out.push_str(&spec.name);
		out.push(' ');
	}
	push_type_expr(out, &spec.ty, depth);
	if let Some(tag) = &spec.tag {
		out.push_str(" `tag:\"");
		out.push_str(tag);
		out.push_str("\"`");
	}
}

fn push_type_expr(out: &mut String, ty: &FieldType, depth: usize) {
	match ty {
		FieldType::Any => out.push_str("any"),
		FieldType::Bool => out.push_str("bool"),
		FieldType::Int64 => out.push_str("int64"),
		FieldType::Uint64 => out.push_str("uint64"),
		FieldType::Float32 => out.push_str("float32"),
		FieldType::Float64 => out.push_str("float64"),
		FieldType::String => out.push_str("string"),
		FieldType::Bytes => out.push_str("bytes"),
		FieldType::Seq(elem) => {
			out.push('[');
			push_type_expr(out, elem, depth);
			out.push(']');
		}
		FieldType::Map(key, value) => {
			out.push_str("map[");
			push_type_expr(out, key, depth);
			out.push(']');
			push_type_expr(out, value, depth);
		}
		FieldType::Struct(nested) => {
			if nested.fields().is_empty() {
				out.push_str("struct {}");
				return;
			}
			out.push_str("struct {");
			for spec in nested.fields() {
				out.push('\n');
				push_field_line(out, spec, depth + 1);
			}
			out.push('\n');
			push_indent(out, depth);
			out.push('}');
		}
		FieldType::Func => out.push_str("func"),
		FieldType::Chan => out.push_str("chan"),
	}
}

fn push_indent(out: &mut String, depth: usize) {
	for _ in 0..depth {
		out.push('\t');
	}
}
