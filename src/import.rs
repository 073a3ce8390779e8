//! CSV bulk import.
//!
//! Expected columns (header row required, order free, extra columns ignored):
//!   model_name, brand, condition, specifications, stock_quantity, base_price[, tags]
//!
//! `specifications` holds a JSON object; `tags` is a `;`-separated list. Cells are trimmed and an
//! empty cell counts as missing. Parsing only fails for rows the CSV reader cannot read at all;
//! field problems are reported per row by [`ImportRow::to_create`].

use crate::model::{Condition, Phone, PhoneCreate};
use crate::phone_actor::PhoneError;
use crate::validation::FieldError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One CSV row as text, before any field is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportRow {
    pub model_name: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub specifications: Option<String>,
    pub stock_quantity: Option<String>,
    pub base_price: Option<String>,
    pub tags: Option<String>,
}

fn present(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(
    field: &str,
    cell: &'a Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let value = present(cell);
    if value.is_none() {
        errors.push(FieldError::new(field, "is required"));
    }
    value
}

fn parse_stock(raw: &str) -> Result<u32, FieldError> {
    raw.parse::<u32>().map_err(|_| match raw.parse::<i64>() {
        Ok(n) if n < 0 => FieldError::new("stock_quantity", "must not be negative"),
        _ => FieldError::new("stock_quantity", format!("'{raw}' is not a whole number")),
    })
}

/// Bad JSON is not fatal: the phone is imported without specifications.
fn parse_specifications(raw: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(raw) {
        Ok(map) => map
            .into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "Ignoring unparsable specifications");
            BTreeMap::new()
        }
    }
}

fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl ImportRow {
    /// Interprets the row with the same rules as a single create.
    ///
    /// Every missing or malformed field is reported, not just the first.
    pub fn to_create(&self) -> Result<PhoneCreate, Vec<FieldError>> {
        let mut errors = Vec::new();

        let model_name = required("model_name", &self.model_name, &mut errors);
        let brand = required("brand", &self.brand, &mut errors);
        let condition = required("condition", &self.condition, &mut errors).and_then(|raw| {
            Condition::from_str(raw)
                .map_err(|e| errors.push(FieldError::new("condition", e.to_string())))
                .ok()
        });
        let stock = required("stock_quantity", &self.stock_quantity, &mut errors)
            .and_then(|raw| parse_stock(raw).map_err(|e| errors.push(e)).ok());
        let base_price = required("base_price", &self.base_price, &mut errors).and_then(|raw| {
            Decimal::from_str(raw)
                .map_err(|_| {
                    errors.push(FieldError::new("base_price", format!("'{raw}' is not a number")))
                })
                .ok()
        });

        match (model_name, brand, condition, stock, base_price) {
            (Some(model_name), Some(brand), Some(condition), Some(stock), Some(base_price))
                if errors.is_empty() =>
            {
                let mut params = PhoneCreate::new(model_name, brand, condition, stock, base_price);
                params.specifications = present(&self.specifications)
                    .map(parse_specifications)
                    .unwrap_or_default();
                params.tags = present(&self.tags).map(parse_tags).unwrap_or_default();
                Ok(params)
            }
            _ => Err(errors),
        }
    }
}

/// Reads every data row. Fails only on rows the CSV reader cannot decode.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ImportRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: ImportRow = result.map_err(|source| ImportError::Csv {
            line: line_num + 2,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn parse_csv_file(path: impl AsRef<Path>) -> Result<Vec<ImportRow>, ImportError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_csv(file)
}

/// A row that did not become a phone. `row` is 1-based among the data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRejection {
    pub row: usize,
    pub input: ImportRow,
    pub reason: PhoneError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkImportOutcome {
    pub created: Vec<Phone>,
    pub rejected: Vec<ImportRejection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
model_name,brand,condition,specifications,stock_quantity,base_price,tags
iPhone 12, Apple ,good,\"{\"\"storage\"\": \"\"128GB\"\", \"\"ram_gb\"\": 4}\",5,320.00,flagship; ios
Galaxy S10,Samsung,Fair,not json,2,150,
Pixel 4a,Google,Excellent,,0,,budget
";

    #[test]
    fn load_sample_csv() {
        let rows = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].brand.as_deref(), Some("Apple"));
        assert_eq!(rows[1].tags, None);
        assert_eq!(rows[2].base_price, None);
    }

    #[test]
    fn rows_convert_with_json_specifications() {
        let rows = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let params = rows[0].to_create().unwrap();
        assert_eq!(params.condition, Condition::Good);
        assert_eq!(params.stock_quantity, 5);
        assert_eq!(params.specifications["storage"], "128GB");
        assert_eq!(params.specifications["ram_gb"], "4");
        assert_eq!(
            params.tags.into_iter().collect::<Vec<_>>(),
            vec!["flagship", "ios"]
        );
    }

    #[test]
    fn bad_specifications_become_empty() {
        let rows = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let params = rows[1].to_create().unwrap();
        assert!(params.specifications.is_empty());
        assert_eq!(params.base_price, Decimal::from(150));
    }

    #[test]
    fn missing_base_price_is_named() {
        let rows = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let errors = rows[2].to_create().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("base_price", "is required")]);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let row = ImportRow {
            model_name: Some("  ".into()),
            brand: Some("Nokia".into()),
            condition: Some("mint".into()),
            stock_quantity: Some("-4".into()),
            base_price: Some("cheap".into()),
            ..ImportRow::default()
        };
        let fields: Vec<_> = row
            .to_create()
            .unwrap_err()
            .into_iter()
            .map(|e| (e.field, e.message))
            .collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("model_name".to_string(), "is required".to_string()));
        assert_eq!(fields[1].0, "condition");
        assert_eq!(
            fields[2],
            ("stock_quantity".to_string(), "must not be negative".to_string())
        );
        assert_eq!(fields[3].0, "base_price");
    }

    #[test]
    fn missing_optional_column_is_fine() {
        let csv = "model_name,brand,condition,specifications,stock_quantity,base_price\n\
                   Moto G,Motorola,poor,{},1,60\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        let params = rows[0].to_create().unwrap();
        assert_eq!(params.condition, Condition::Poor);
        assert!(params.tags.is_empty());
    }

    #[test]
    fn unreadable_row_fails_with_line() {
        let csv = "model_name,brand,condition,specifications,stock_quantity,base_price\n\
                   A,B,good,{},1,10\n\
                   only,three,cells\n";
        match parse_csv(csv.as_bytes()) {
            Err(ImportError::Csv { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected CSV error, got {other:?}"),
        }
    }
}
