use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::catalog::{FieldResolver, Getter, ResolvedField};
use crate::types::LogicalType;

/// Convert records into one arrow batch with a column per scalar field. Nested record fields are
/// flattened into dotted column names such as `coach.name`.
pub fn records_to_batch<'a, R: 'a>(
    resolver: &dyn FieldResolver<R>,
    records: impl IntoIterator<Item = &'a R>,
) -> Result<RecordBatch, ArrowError> {
    let records = records.into_iter().collect::<Vec<_>>();
    let mut fields = Vec::new();
    let mut columns = Vec::new();
    collect_columns(resolver, "", &records, &mut fields, &mut columns)?;
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn collect_columns<R>(
    resolver: &dyn FieldResolver<R>,
    prefix: &str,
    records: &[&R],
    fields: &mut Vec<Field>,
    columns: &mut Vec<ArrayRef>,
) -> Result<(), ArrowError> {
    for name in resolver.field_names() {
        let column_name = format!("{}{}", prefix, name);
        match resolver.resolve(&name) {
            Some(ResolvedField::Scalar { data_type, getter }) => {
                let arrow_type = DataType::try_from(data_type.clone())
                    .map_err(|e| ArrowError::SchemaError(e.to_string()))?;
                fields.push(Field::new(&column_name, arrow_type, false));
                columns.push(build_column(&data_type, &getter, records));
            }
            Some(ResolvedField::Record(inner)) => {
                let prefix = format!("{}.", column_name);
                collect_columns(inner.as_ref(), &prefix, records, fields, columns)?;
            }
            None => {
                return Err(ArrowError::SchemaError(format!(
                    "field {} of {} can not be resolved",
                    name,
                    resolver.type_name()
                )))
            }
        }
    }
    Ok(())
}

fn build_column<R>(data_type: &LogicalType, getter: &Getter<R>, records: &[&R]) -> ArrayRef {
    match getter {
        Getter::Boolean(f) => Arc::new(BooleanArray::from(
            records.iter().map(|&r| f(r)).collect::<Vec<_>>(),
        )),
        // INTEGER fields are read as i32 and widened, narrowing back is lossless
        Getter::Integer(f) if *data_type == LogicalType::Integer => Arc::new(Int32Array::from(
            records.iter().map(|&r| f(r) as i32).collect::<Vec<_>>(),
        )),
        Getter::Integer(f) => Arc::new(Int64Array::from(
            records.iter().map(|&r| f(r)).collect::<Vec<_>>(),
        )),
        Getter::Double(f) => Arc::new(Float64Array::from(
            records.iter().map(|&r| f(r)).collect::<Vec<_>>(),
        )),
        Getter::Varchar(f) => Arc::new(StringArray::from(
            records.iter().map(|&r| f(r)).collect::<Vec<_>>(),
        )),
    }
}

/// Render records as an ascii table.
pub fn pretty_records<'a, R: 'a>(
    resolver: &dyn FieldResolver<R>,
    records: impl IntoIterator<Item = &'a R>,
) -> Result<String, ArrowError> {
    let batch = records_to_batch(resolver, records)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
