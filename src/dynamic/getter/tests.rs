use std::collections::BTreeMap;

use crate::dynamic::{FieldValue, Getter, Inspect, Kind, StructError, StructValue, Value};

fn company(name: &str, address: &str, period: i64) -> Value {
	Value::Struct(StructValue {
		type_name: "Company".into(),
		fields: vec![
			FieldValue::new("Name", name),
			FieldValue::new("Address", address),
			FieldValue::new("Period", period),
		],
	})
}

fn person() -> Value {
	let mut extra = BTreeMap::new();
	extra.insert("team".into(), Value::from("core"));

	Value::Struct(StructValue {
		type_name: "Person".into(),
		fields: vec![
			FieldValue::new("Name", "Arthur"),
			FieldValue::new("Age", 45_i64),
			FieldValue::new("Id", 1001_u64),
			FieldValue::new("Ratio", 2.5_f32),
			FieldValue::new("Score", 98.5_f64),
			FieldValue::new("Active", true),
			FieldValue::new("Blob", vec![0x01_u8, 0x02]),
			FieldValue::new("Codes", vec![Value::I64(7), Value::U64(8)]),
			FieldValue::new("Tags", vec![Value::from("a"), Value::from("b")]),
			FieldValue::new(
				"Companies",
				vec![company("Acme", "first street", 3), company("Orbit", "second street", 9)],
			),
			FieldValue::new("Past", Vec::<Value>::new()),
			FieldValue::new(
				"Home",
				StructValue {
					type_name: "Address".into(),
					fields: vec![FieldValue::new("City", "Dublin")],
				},
			),
			FieldValue::new("Extra", extra),
			FieldValue::new("Note", None::<i64>),
			FieldValue {
				name: "Callback".into(),
				value: Value::Func,
				public: true,
			},
			FieldValue {
				name: "Events".into(),
				value: Value::Chan,
				public: true,
			},
			FieldValue::private("secret", "hush"),
			FieldValue::private("balance", 42_i64),
		],
	})
}

#[test]
fn new_rejects_non_struct_targets() {
	let err = Getter::new(&Value::Null).expect_err("null target");
	assert!(matches!(err, StructError::InvalidTarget { kind: "null" }));

	let number = Value::I64(3);
	let err = Getter::new(&number).expect_err("scalar target");
	assert!(matches!(err, StructError::InvalidTarget { kind: "int64" }));
}

#[test]
fn new_accepts_struct_target() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.type_name(), "Person");
	assert_eq!(getter.num_fields(), 18);
}

#[test]
fn has_reports_presence() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.has("Name"));
	assert!(getter.has("secret"));
	assert!(!getter.has("Nope"));
}

#[test]
fn names_preserve_declaration_order() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let names = getter.names();
	assert_eq!(names.first().copied(), Some("Name"));
	assert_eq!(names.last().copied(), Some("balance"));
	assert_eq!(names.len(), 18);
}

#[test]
fn kind_of_reports_kinds() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.kind_of("Name"), Kind::String);
	assert_eq!(getter.kind_of("Ratio"), Kind::Float32);
	assert_eq!(getter.kind_of("Note"), Kind::Null);
	assert_eq!(getter.kind_of("secret"), Kind::String);

	let err = getter.try_kind_of("Nope").expect_err("absent field");
	assert!(matches!(err, StructError::FieldNotFound { .. }));
}

#[test]
#[should_panic(expected = "field not found")]
fn kind_of_panics_on_absent_field() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let _ = getter.kind_of("Nope");
}

#[test]
fn value_of_returns_raw_value() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.value_of("Age"), &Value::I64(45));
	assert_eq!(getter.value_of("Note"), &Value::Null);
}

#[test]
fn value_of_masks_private_fields() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.value_of("secret"), &Value::Null);
	assert_eq!(getter.try_value_of("balance").expect("present"), &Value::Null);
}

#[test]
fn string_is_lenient_across_kinds() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.as_string("Name"), "Arthur");
	assert_eq!(getter.as_string("Age"), "45");
	assert_eq!(getter.as_string("Active"), "true");
	assert_eq!(getter.as_string("Note"), "null");
	assert_eq!(getter.as_string("Tags"), "[a, b]");
	assert_eq!(getter.as_string("Blob"), "0x0102");
	assert_eq!(getter.as_string("secret"), "hush");
}

#[test]
fn try_string_fails_on_absent_field() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let err = getter.try_string("Nope").expect_err("absent field");
	assert!(matches!(err, StructError::FieldNotFound { .. }));
}

#[test]
fn int64_extracts_and_rejects() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.as_int64("Age"), 45);
	assert_eq!(getter.as_int64("balance"), 42);

	let err = getter.try_int64("Name").expect_err("kind mismatch");
	assert!(matches!(
		err,
		StructError::TypeMismatch {
			expected: "int64",
			got: "string",
			..
		}
	));
	let err = getter.try_int64("Nope").expect_err("absent field");
	assert!(matches!(err, StructError::FieldNotFound { .. }));
}

#[test]
#[should_panic(expected = "field type mismatch")]
fn int64_panics_on_kind_mismatch() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let _ = getter.as_int64("Name");
}

#[test]
fn uint64_requires_unsigned_kind() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.as_uint64("Id"), 1001);

	let err = getter.try_uint64("Age").expect_err("signed field");
	assert!(matches!(
		err,
		StructError::TypeMismatch {
			expected: "uint64",
			got: "int64",
			..
		}
	));
}

#[test]
fn float64_widens_float32() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.as_float64("Score"), 98.5);
	assert_eq!(getter.as_float64("Ratio"), 2.5);

	let err = getter.try_float64("Age").expect_err("integer field");
	assert!(matches!(err, StructError::TypeMismatch { expected: "float64", .. }));
}

#[test]
fn float_predicates_keep_width_split() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.is_float64("Score"));
	assert!(!getter.is_float64("Ratio"));
	assert!(getter.is_float32("Ratio"));
}

#[test]
fn bool_extracts_and_rejects() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.as_bool("Active"));

	let err = getter.try_bool("Age").expect_err("integer field");
	assert!(matches!(err, StructError::TypeMismatch { expected: "bool", .. }));
}

#[test]
fn bytes_accepts_bytes_and_byte_like_seqs() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert_eq!(getter.as_bytes("Blob"), vec![0x01, 0x02]);
	assert_eq!(getter.as_bytes("Codes"), vec![7, 8]);

	let err = getter.try_bytes("Tags").expect_err("string elements");
	assert!(matches!(err, StructError::TypeMismatch { expected: "bytes", .. }));
	let err = getter.try_bytes("Name").expect_err("string field");
	assert!(matches!(err, StructError::TypeMismatch { expected: "bytes", .. }));
}

#[test]
fn is_seq_covers_byte_strings() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.is_seq("Tags"));
	assert!(getter.is_seq("Blob"));
	assert!(getter.is_seq("Past"));
	assert!(!getter.is_seq("Name"));
	assert!(getter.is_bytes("Blob"));
	assert!(!getter.is_bytes("Tags"));
}

#[test]
fn predicates_answer_false_for_absent_fields() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(!getter.is_string("Nope"));
	assert!(!getter.is_struct("Nope"));
	assert!(!getter.is_seq("Nope"));
}

#[test]
fn predicates_see_private_fields() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.is_string("secret"));
	assert!(getter.is_int64("balance"));
}

#[test]
fn composite_kind_predicates() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	assert!(getter.is_struct("Home"));
	assert!(getter.is_map("Extra"));
	assert!(getter.is_func("Callback"));
	assert!(getter.is_chan("Events"));
}

#[test]
fn map_over_projects_struct_elements() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let labels = getter
		.map_over("Companies", |pos, company| format!("{pos}:{}", company.as_string("Name")))
		.expect("struct seq");
	assert_eq!(labels, vec!["0:Acme".to_owned(), "1:Orbit".to_owned()]);

	let periods = getter
		.map_over("Companies", |_, company| company.as_int64("Period"))
		.expect("struct seq");
	assert_eq!(periods, vec![3, 9]);
}

#[test]
fn map_over_rejects_non_seq_fields() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let err = getter.map_over("Name", |_, _| ()).expect_err("string field");
	assert!(matches!(err, StructError::ExpectedStructSeq { .. }));
}

#[test]
fn map_over_rejects_scalar_elements() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let err = getter.map_over("Tags", |_, _| ()).expect_err("string elements");
	let StructError::ExpectedStructSeq { got, .. } = err else {
		panic!("expected struct seq error");
	};
	assert!(got.contains("element 0"));
}

#[test]
fn map_over_empty_seq_yields_empty_vec() {
	let target = person();
	let getter = Getter::new(&target).expect("struct target");
	let out = getter.map_over("Past", |pos, _| pos).expect("empty seq");
	assert!(out.is_empty());
}

struct Account {
	id: u64,
	label: String,
	limit: Option<f64>,
}

impl Inspect for Account {
	fn inspect(&self) -> Value {
		Value::Struct(StructValue {
			type_name: "Account".into(),
			fields: vec![
				FieldValue::new("Id", self.id),
				FieldValue::new("Label", self.label.as_str()),
				FieldValue::new("Limit", self.limit),
			],
		})
	}
}

#[test]
fn getter_reads_inspected_native_struct() {
	let account = Account {
		id: 9,
		label: "savings".to_owned(),
		limit: None,
	};
	let value = account.inspect();
	let getter = Getter::new(&value).expect("inspected struct");
	assert_eq!(getter.as_uint64("Id"), 9);
	assert_eq!(getter.as_string("Label"), "savings");
	assert_eq!(getter.kind_of("Limit"), Kind::Null);
	assert!(!getter.is_float64("Limit"));
}
