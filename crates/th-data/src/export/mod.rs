//! Tabular export of temple result sets

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use th_core::display::date_label;
use th_core::Temple;

use crate::DataError;

/// Schema of the exported temple table
pub fn temple_table_schema() -> Schema {
    Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Deity", DataType::Utf8, true),
        Field::new("Style", DataType::Utf8, true),
        Field::new("Built Year", DataType::Int32, true),
        Field::new("Location", DataType::Utf8, true),
        Field::new("Contributor", DataType::Utf8, true),
        Field::new("Added Date", DataType::Utf8, false),
    ])
}

/// Convert temples to a record batch, one row per temple
pub fn temples_to_record_batch(temples: &[Temple]) -> Result<RecordBatch, DataError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(temples.iter().map(|t| t.name.as_str()))),
        optional_text(temples, |t| t.deity.as_deref()),
        optional_text(temples, |t| t.architectural_style.as_deref()),
        Arc::new(temples.iter().map(|t| t.built_year).collect::<Int32Array>()),
        optional_text(temples, |t| t.location_address.as_deref()),
        optional_text(temples, |t| t.contributor_name.as_deref()),
        Arc::new(StringArray::from_iter_values(temples.iter().map(|t| date_label(&t.created_at)))),
    ];

    Ok(RecordBatch::try_new(Arc::new(temple_table_schema()), columns)?)
}

fn optional_text<'a, F>(temples: &'a [Temple], field: F) -> ArrayRef
where
    F: Fn(&'a Temple) -> Option<&'a str>,
{
    Arc::new(temples.iter().map(field).collect::<StringArray>())
}

/// Write temples as CSV with a header row
pub fn write_temples_csv<W: Write>(temples: &[Temple], writer: W) -> Result<(), DataError> {
    let batch = temples_to_record_batch(temples)?;
    let mut csv = arrow::csv::WriterBuilder::new().with_header(true).build(writer);
    csv.write(&batch)?;
    Ok(())
}

/// Render temples as a boxed text table
pub fn format_temple_table(temples: &[Temple]) -> Result<String, DataError> {
    let batch = temples_to_record_batch(temples)?;
    Ok(arrow::util::pretty::pretty_format_batches(&[batch])?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use chrono::NaiveDate;

    fn temple(name: &str, deity: Option<&str>, built_year: Option<i32>) -> Temple {
        Temple {
            id: 1,
            name: name.to_string(),
            deity: deity.map(str::to_string),
            architectural_style: Some("Dravidian".to_string()),
            built_year,
            location_address: None,
            latitude: None,
            longitude: None,
            history: None,
            contributor_name: None,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 17)
                .and_then(|d| d.and_hms_opt(10, 30, 0))
                .unwrap(),
        }
    }

    #[test]
    fn test_record_batch_keeps_nulls() {
        let batch = temples_to_record_batch(&[
            temple("Brihadeeswara", Some("Shiva"), Some(1010)),
            temple("Airavatesvara", None, None),
        ])
        .unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 7);

        let deity = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(deity.value(0), "Shiva");
        assert!(deity.is_null(1));

        let year = batch.column(3).as_any().downcast_ref::<Int32Array>().unwrap();
        assert_eq!(year.value(0), 1010);
        assert!(year.is_null(1));

        let added = batch.column(6).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(added.value(0), "2024-05-17");
    }

    #[test]
    fn test_empty_batch() {
        let batch = temples_to_record_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(0).name(), "Name");
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_temples_csv(&[temple("Brihadeeswara", Some("Shiva"), Some(1010))], &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Name,Deity,Style,Built Year,Location,Contributor,Added Date"));
        assert_eq!(lines.next(), Some("Brihadeeswara,Shiva,Dravidian,1010,,,2024-05-17"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_pretty_table() {
        let table = format_temple_table(&[temple("Brihadeeswara", Some("Shiva"), Some(1010))]).unwrap();
        assert!(table.contains("| Name"));
        assert!(table.contains("Brihadeeswara"));
        assert!(table.contains("1010"));
    }
}
