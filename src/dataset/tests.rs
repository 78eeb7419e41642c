//! Tests for projection, accumulation and finalization

use super::*;
use crate::error::Error;
use crate::provider::RawRecord;
use crate::store::DocumentStore;
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn full_record(id: u64, name: &str) -> RawRecord {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "numberOfRatings": 42,
        "overallRating": 4.5,
        "recommendToFriendRating": 88,
        "cultureAndValuesRating": 4.1,
        "compensationAndBenefitsRating": 3.9,
        "careerOpportunitiesRating": 4.0,
        "seniorLeadershipRating": 3.5,
        "workLifeBalanceRating": 4.2,
        "industryName": "Software"
    }))
    .unwrap()
}

fn sparse_record() -> RawRecord {
    serde_json::from_value(json!({"id": 1, "name": "Acme"})).unwrap()
}

// === Projection ===

#[test]
fn test_projection_is_deterministic() {
    let record = full_record(7, "Acme");
    assert_eq!(project(&record), project(&record));
}

#[test]
fn test_projection_tolerates_missing_fields() {
    let row = project(&sparse_record());

    assert_eq!(row.company_id, Some(json!(1)));
    assert_eq!(row.company_name, Some(json!("Acme")));
    assert_eq!(row.num_ratings, None);
    assert_eq!(row.overall_rating, None);
    assert_eq!(row.industry, None);
}

#[test]
fn test_projection_of_empty_document() {
    let row = project(&RawRecord::new());
    assert_eq!(row, EmployerRow::default());
}

#[test]
fn test_projection_passes_values_through_unchanged() {
    // String-typed numerics are not touched at projection time
    let record: RawRecord =
        serde_json::from_value(json!({"id": "7", "numberOfRatings": "42", "overallRating": "4.5"}))
            .unwrap();
    let row = project(&record);

    assert_eq!(row.company_id, Some(json!("7")));
    assert_eq!(row.num_ratings, Some(json!("42")));
    assert_eq!(row.overall_rating, Some(json!("4.5")));
}

// === Chunked accumulation ===

fn seeded_store(n: usize) -> DocumentStore {
    let store = DocumentStore::open_in_memory().unwrap();
    store.create_collection("employers").unwrap();
    let docs: Vec<RawRecord> = (0..n)
        .map(|i| full_record(i as u64, &format!("company-{i}")))
        .collect();
    store.bulk_insert("employers", &docs).unwrap();
    store
}

#[test]
fn test_chunk_boundary_equivalence() {
    // Same table regardless of where the merges fall
    let n = 37;
    let store = seeded_store(n);

    let mut tables = Vec::new();
    for chunk_size in [1, 10, CHUNK_SIZE, n] {
        let mut acc = ChunkedAccumulator::with_chunk_size(chunk_size);
        store
            .for_each("employers", |doc| {
                acc.push(doc.id, project(&doc.record));
                Ok(())
            })
            .unwrap();
        tables.push(acc.finish());
    }

    for table in &tables {
        assert_eq!(table.len(), n);
    }
    let reference = &tables[0];
    for table in &tables[1..] {
        assert_eq!(table.rows, reference.rows);
    }
}

#[test]
fn test_accumulate_empty_store() {
    let store = seeded_store(0);
    let table = accumulate(&store, "employers").unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_accumulator_merges_final_partial_buffer() {
    let mut acc = ChunkedAccumulator::with_chunk_size(10);
    for i in 0..13 {
        acc.push(i, EmployerRow::default());
    }
    assert_eq!(acc.finish().len(), 13);
}

// === Finalization ===

#[test]
fn test_finalize_typed_columns() {
    let store = seeded_store(3);
    let table = accumulate(&store, "employers").unwrap();
    let batch = finalize(table).unwrap();

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.schema().as_ref(), &employers_schema());

    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ids.value(0), 0);
    assert_eq!(ids.value(2), 2);

    let overall = batch
        .column(3)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert!((overall.value(0) - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_finalize_coerces_string_typed_numerics() {
    // Values arrive as strings; finalization coerces them
    let record: RawRecord = serde_json::from_value(json!({
        "id": "7",
        "numberOfRatings": "42",
        "overallRating": "4.5",
        "cultureAndValuesRating": "4.0",
        "compensationAndBenefitsRating": "3.0",
        "careerOpportunitiesRating": "3.5",
        "seniorLeadershipRating": "3.1",
        "workLifeBalanceRating": "2.9"
    }))
    .unwrap();
    let table = RawTable {
        rows: vec![(1, project(&record))],
    };
    let batch = finalize(table).unwrap();

    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ids.value(0), 7);
    let counts = batch
        .column(2)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(counts.value(0), 42);
    let overall = batch
        .column(3)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert!((overall.value(0) - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_finalize_fails_on_missing_required_column() {
    let mut record = full_record(9, "Acme");
    record.remove("cultureAndValuesRating");
    let table = RawTable {
        rows: vec![(31, project(&record))],
    };

    let err = finalize(table).unwrap_err();
    match err {
        Error::TypeCoercion {
            column,
            document_id,
            ..
        } => {
            assert_eq!(column, "culture_rating");
            assert_eq!(document_id, 31);
        }
        other => panic!("expected TypeCoercion, got {other}"),
    }
}

#[test]
fn test_finalize_fails_on_non_numeric_required_column() {
    let mut record = full_record(9, "Acme");
    record.insert("numberOfRatings".into(), json!("many"));
    let table = RawTable {
        rows: vec![(5, project(&record))],
    };

    let err = finalize(table).unwrap_err();
    assert!(matches!(err, Error::TypeCoercion { ref column, .. } if column == "num_ratings"));
}

#[test]
fn test_finalize_nullable_columns_stay_nullable() {
    let mut record = full_record(9, "Acme");
    record.remove("recommendToFriendRating");
    record.remove("industryName");
    let table = RawTable {
        rows: vec![(1, project(&record))],
    };
    let batch = finalize(table).unwrap();

    let recommend = batch
        .column(4)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert!(recommend.is_null(0));
    let industry = batch
        .column(10)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(industry.is_null(0));
}

#[test]
fn test_finalize_empty_table() {
    let batch = finalize(RawTable::default()).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 11);
}

#[test_case(json!(42), Some(42); "integer number")]
#[test_case(json!(42.0), Some(42); "whole float")]
#[test_case(json!(4.5), None; "fractional float")]
#[test_case(json!("42"), Some(42); "integer string")]
#[test_case(json!(" 42 "), Some(42); "padded string")]
#[test_case(json!("4.5"), None; "fractional string")]
#[test_case(json!("many"), None; "non numeric string")]
#[test_case(json!(true), None; "boolean")]
fn test_coerce_i64(value: Value, expected: Option<i64>) {
    assert_eq!(super::finalize::coerce_i64(&value), expected);
}
