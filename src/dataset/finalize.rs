//! Finalization: enforce column types over the accumulated table

use super::accumulate::RawTable;
use super::row::EmployerRow;
use crate::error::{Error, Result};
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// The fixed output schema.
///
/// The id/count columns and the six rating columns are required; only
/// `company_name`, `recommend_pct` and `industry` admit nulls.
pub fn employers_schema() -> Schema {
    Schema::new(vec![
        Field::new("company_id", DataType::Int64, false),
        Field::new("company_name", DataType::Utf8, true),
        Field::new("num_ratings", DataType::Int64, false),
        Field::new("overall_rating", DataType::Float64, false),
        Field::new("recommend_pct", DataType::Float64, true),
        Field::new("culture_rating", DataType::Float64, false),
        Field::new("comp_rating", DataType::Float64, false),
        Field::new("opportunity_rating", DataType::Float64, false),
        Field::new("leader_rating", DataType::Float64, false),
        Field::new("work_life_rating", DataType::Float64, false),
        Field::new("industry", DataType::Utf8, true),
    ])
}

/// Coerce the accumulated table into one typed `RecordBatch`.
///
/// String-typed numerics pass ("42" becomes 42); a missing or non-numeric
/// value in a required column fails with the column name and the identity of
/// the offending document. An empty table finalizes to an empty batch.
pub fn finalize(table: RawTable) -> Result<RecordBatch> {
    let rows = table.rows;
    let mut company_id = Int64Builder::with_capacity(rows.len());
    let mut company_name = StringBuilder::new();
    let mut num_ratings = Int64Builder::with_capacity(rows.len());
    let mut overall_rating = Float64Builder::with_capacity(rows.len());
    let mut recommend_pct = Float64Builder::with_capacity(rows.len());
    let mut culture_rating = Float64Builder::with_capacity(rows.len());
    let mut comp_rating = Float64Builder::with_capacity(rows.len());
    let mut opportunity_rating = Float64Builder::with_capacity(rows.len());
    let mut leader_rating = Float64Builder::with_capacity(rows.len());
    let mut work_life_rating = Float64Builder::with_capacity(rows.len());
    let mut industry = StringBuilder::new();

    for (id, row) in &rows {
        let EmployerRow {
            company_id: c_id,
            company_name: c_name,
            num_ratings: n_ratings,
            overall_rating: overall,
            recommend_pct: recommend,
            culture_rating: culture,
            comp_rating: comp,
            opportunity_rating: opportunity,
            leader_rating: leader,
            work_life_rating: work_life,
            industry: ind,
        } = row;

        company_id.append_value(require_i64(c_id, "company_id", *id)?);
        company_name.append_option(as_text(c_name));
        num_ratings.append_value(require_i64(n_ratings, "num_ratings", *id)?);
        overall_rating.append_value(require_f64(overall, "overall_rating", *id)?);
        recommend_pct.append_option(optional_f64(recommend, "recommend_pct", *id)?);
        culture_rating.append_value(require_f64(culture, "culture_rating", *id)?);
        comp_rating.append_value(require_f64(comp, "comp_rating", *id)?);
        opportunity_rating.append_value(require_f64(opportunity, "opportunity_rating", *id)?);
        leader_rating.append_value(require_f64(leader, "leader_rating", *id)?);
        work_life_rating.append_value(require_f64(work_life, "work_life_rating", *id)?);
        industry.append_option(as_text(ind));
    }

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(company_id.finish()),
        Arc::new(company_name.finish()),
        Arc::new(num_ratings.finish()),
        Arc::new(overall_rating.finish()),
        Arc::new(recommend_pct.finish()),
        Arc::new(culture_rating.finish()),
        Arc::new(comp_rating.finish()),
        Arc::new(opportunity_rating.finish()),
        Arc::new(leader_rating.finish()),
        Arc::new(work_life_rating.finish()),
        Arc::new(industry.finish()),
    ];

    let batch = RecordBatch::try_new(Arc::new(employers_schema()), arrays)?;
    info!(rows = batch.num_rows(), "dataset finalized");
    Ok(batch)
}

/// Coerce a JSON value to an integer, accepting string-typed numerics
pub(crate) fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        }
        _ => None,
    }
}

/// Coerce a JSON value to a float, accepting string-typed numerics
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn require_i64(value: &Option<Value>, column: &str, document_id: i64) -> Result<i64> {
    match value {
        None | Some(Value::Null) => Err(Error::type_coercion(column, document_id, "value is missing")),
        Some(v) => coerce_i64(v).ok_or_else(|| {
            Error::type_coercion(column, document_id, format!("cannot coerce {v} to integer"))
        }),
    }
}

fn require_f64(value: &Option<Value>, column: &str, document_id: i64) -> Result<f64> {
    match value {
        None | Some(Value::Null) => Err(Error::type_coercion(column, document_id, "value is missing")),
        Some(v) => coerce_f64(v).ok_or_else(|| {
            Error::type_coercion(column, document_id, format!("cannot coerce {v} to float"))
        }),
    }
}

/// Nullable float column: absent stays null, present values must coerce
fn optional_f64(value: &Option<Value>, column: &str, document_id: i64) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => coerce_f64(v)
            .map(Some)
            .ok_or_else(|| {
                Error::type_coercion(column, document_id, format!("cannot coerce {v} to float"))
            }),
    }
}

/// Nullable text column: strings pass through, other values render as JSON
fn as_text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
