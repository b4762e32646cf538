use proptest::prelude::*;

use septoctor_map::{MappingEngine, coerce_value};
use septoctor_model::{FieldValue, IntakeError, RawRecord, SourceFormat};
use septoctor_standards::{CanonicalField, CanonicalSchema, ValueClass, builtin_schema};

fn text_record(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(key, value)| (*key, FieldValue::text(*value)))
        .collect()
}

#[test]
fn maps_csv_style_record() {
    let schema = builtin_schema();
    let engine = MappingEngine::new(&schema);
    let raw = text_record(&[
        ("Birth Weight", "1800"),
        ("GA", "35"),
        ("PROM", "Y"),
        ("Temp", "37.9"),
        ("sex", "female"),
        ("ward", "NICU-2"),
    ]);

    let outcome = engine.map_record(&raw, SourceFormat::Csv);
    assert!(outcome.valid);
    assert_eq!(outcome.mapped_field_count, 5);
    assert_eq!(outcome.message, "Successfully mapped 5 fields from CSV file");

    let record = outcome.record.expect("mapped record");
    assert_eq!(record.get("birth_weight_grams"), Some(&FieldValue::Number(1800.0)));
    assert_eq!(record.get("gestational_age_weeks"), Some(&FieldValue::Number(35.0)));
    assert_eq!(record.get("prom_present"), Some(&FieldValue::text("yes")));
    assert_eq!(record.get("temperature_celsius"), Some(&FieldValue::Number(37.9)));
    assert_eq!(record.get("neonatal_sex"), Some(&FieldValue::text("female")));
    assert_eq!(
        record.get("birth_weight_category"),
        Some(&FieldValue::text("1500–2499 g"))
    );
    assert_eq!(
        record.get("gestational_age_category"),
        Some(&FieldValue::text("34–36 weeks"))
    );
    assert!(!record.contains("ward"));
    assert_eq!(record.len(), 7);
}

#[test]
fn record_follows_schema_order() {
    let schema = builtin_schema();
    let raw = text_record(&[("hr", "150"), ("shock", "no"), ("prom", "yes")]);
    let mapped = MappingEngine::new(&schema).try_map(&raw).expect("mapped");
    let names: Vec<&str> = mapped.record.field_names().collect();
    assert_eq!(names, vec!["prom_present", "heart_rate_bpm", "shock_present"]);
}

#[test]
fn json_numbers_pass_through_boolean_fields() {
    let schema = builtin_schema();
    let raw: RawRecord = [
        ("apnea", FieldValue::Number(1.0)),
        ("apgar_1", FieldValue::Number(7.0)),
    ]
    .into_iter()
    .collect();
    let record = MappingEngine::new(&schema)
        .map_record(&raw, SourceFormat::Json)
        .into_result()
        .expect("valid");
    assert_eq!(record.get("apnea_present"), Some(&FieldValue::Number(1.0)));
    assert_eq!(record.get("apgar_1_min"), Some(&FieldValue::Number(7.0)));
}

#[test]
fn yes_no_tokens_apply_before_numeric_parse() {
    let schema = builtin_schema();
    let raw = text_record(&[
        ("pv_count", "0"),
        ("apgar1", "1"),
        ("apgar5", "9"),
        ("sex", "N"),
        ("feeding", "Y"),
        ("bw", "no"),
    ]);
    let mapped = MappingEngine::new(&schema).try_map(&raw).expect("mapped");
    let record = &mapped.record;

    assert_eq!(record.get("pv_examinations_count"), Some(&FieldValue::text("no")));
    assert_eq!(record.get("apgar_1_min"), Some(&FieldValue::text("yes")));
    assert_eq!(record.get("apgar_5_min"), Some(&FieldValue::Number(9.0)));
    assert_eq!(record.get("neonatal_sex"), Some(&FieldValue::text("no")));
    assert_eq!(record.get("feeding_status"), Some(&FieldValue::text("yes")));
    assert_eq!(record.get("birth_weight_grams"), Some(&FieldValue::text("no")));
    assert!(!record.contains("birth_weight_category"));
    assert_eq!(mapped.mapped_field_count, 6);
}

#[test]
fn apgar_range_is_not_checked() {
    let schema = builtin_schema();
    let raw = text_record(&[("apgar5", "14")]);
    let outcome = MappingEngine::new(&schema).map_record(&raw, SourceFormat::Csv);
    assert!(outcome.valid);
}

#[test]
fn empty_object_is_rejected_with_examples() {
    let schema = builtin_schema();
    let outcome = MappingEngine::new(&schema).map_record(&RawRecord::new(), SourceFormat::Json);

    assert!(!outcome.valid);
    assert!(outcome.record.is_none());
    assert_eq!(outcome.mapped_field_count, 0);
    assert_eq!(
        outcome.rejection,
        Some(IntakeError::NoFieldsMapped {
            examples: vec![
                "birth_weight".to_string(),
                "gestational_age".to_string(),
                "apgar scores".to_string(),
            ],
        })
    );
    insta::assert_snapshot!(outcome.message, @"No valid patient data fields found in file. Please ensure the file contains medical assessment fields like birth_weight, gestational_age, apgar scores, etc.");
}

#[test]
fn unrecognized_keys_alone_are_rejected() {
    let schema = builtin_schema();
    let raw = text_record(&[("ward", "NICU"), ("bed", "4")]);
    let err = MappingEngine::new(&schema).try_map(&raw).unwrap_err();
    assert!(matches!(err, IntakeError::NoFieldsMapped { .. }));
}

#[test]
fn derived_fields_do_not_count() {
    let schema = builtin_schema();
    let raw = text_record(&[("bw", "2600")]);
    let mapped = MappingEngine::new(&schema).try_map(&raw).expect("mapped");
    assert_eq!(mapped.mapped_field_count, 1);
    assert_eq!(mapped.record.len(), 2);
    assert_eq!(
        mapped.record.get("birth_weight_category"),
        Some(&FieldValue::text("≥2500 g"))
    );
}

#[test]
fn custom_schema_drives_the_engine() {
    let schema = CanonicalSchema::new(
        "ward-round",
        "0.1",
        vec![CanonicalField::new(
            "capillary_refill_seconds",
            ValueClass::Numeric,
            &["crt", "capillary refill"],
        )],
        vec!["crt".to_string()],
    )
    .expect("valid schema");
    let raw = text_record(&[("Capillary-Refill", "3 s")]);
    let mapped = MappingEngine::new(&schema).try_map(&raw).expect("mapped");
    assert_eq!(
        mapped.record.get("capillary_refill_seconds"),
        Some(&FieldValue::Number(3.0))
    );
}

fn raw_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        "[A-Za-z0-9 .]{0,10}".prop_map(FieldValue::Text),
        prop_oneof![Just("Y"), Just("no"), Just("TRUE"), Just("0"), Just("maybe")]
            .prop_map(FieldValue::text),
        (-5000i32..5000).prop_map(|n| FieldValue::Number(f64::from(n))),
    ]
}

fn field_and_synonym() -> impl Strategy<Value = (usize, usize)> {
    let counts: Vec<usize> = builtin_schema()
        .fields()
        .iter()
        .map(|field| field.synonyms.len())
        .collect();
    (0..counts.len()).prop_flat_map(move |field| (Just(field), 0..counts[field]))
}

proptest! {
    #[test]
    fn every_synonym_maps_to_its_field(
        (field_index, synonym_index) in field_and_synonym(),
        value in raw_value(),
    ) {
        let schema = builtin_schema();
        let field = &schema.fields()[field_index];
        let synonym = &field.synonyms[synonym_index];
        let raw: RawRecord = [(synonym.as_str(), value.clone())].into_iter().collect();

        let mapped = MappingEngine::new(&schema).try_map(&raw).unwrap();
        prop_assert!(mapped.mapped_field_count >= 1);
        prop_assert_eq!(
            mapped.record.get(&field.name),
            Some(&coerce_value(field.class, &value))
        );
    }

    #[test]
    fn key_spelling_does_not_change_the_match(upper in any::<bool>(), hyphen in any::<bool>()) {
        let schema = builtin_schema();
        let mut key = String::from("heart rate");
        if upper {
            key = key.to_uppercase();
        }
        if hyphen {
            key = key.replace(' ', "-");
        }
        let raw = text_record(&[(key.as_str(), "152")]);
        let mapped = MappingEngine::new(&schema).try_map(&raw).unwrap();
        prop_assert_eq!(mapped.record.get("heart_rate_bpm"), Some(&FieldValue::Number(152.0)));
    }
}
