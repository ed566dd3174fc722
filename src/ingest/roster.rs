use crate::error::{LinkerError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use faculty_common::RawBaseRecord;
use std::collections::HashSet;
use std::path::Path;

const ROSTER_DELIMITER: u8 = b';';

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    degree: Option<usize>,
    university: Option<usize>,
    url_image: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String], artifact: &Path) -> Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
        };
        let name = find("name").ok_or_else(|| LinkerError::malformed(artifact.display(), "missing `name` column"))?;
        Ok(Self {
            name,
            degree: find("degree"),
            university: find("university"),
            url_image: find("url_image"),
        })
    }

    fn record(&self, row: &[String]) -> RawBaseRecord {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let url_image = cell(self.url_image);
        RawBaseRecord {
            name: cell(Some(self.name)),
            degree: cell(self.degree),
            university: cell(self.university),
            url_image: if url_image.is_empty() { None } else { Some(url_image) },
        }
    }
}

/// Load the roster, skipping nameless rows and keeping the first row per name
pub fn load_roster(path: &Path) -> Result<Vec<RawBaseRecord>> {
    if !path.exists() {
        return Err(LinkerError::MissingInput(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (headers, rows) = if matches!(extension.as_str(), "xlsx" | "xlsm" | "xls") {
        read_excel(path)?
    } else {
        read_delimited(path)?
    };

    let columns = Columns::resolve(&headers, path)?;
    let records: Vec<RawBaseRecord> = rows
        .iter()
        .map(|row| columns.record(row))
        .filter(|r| !r.name.is_empty())
        .collect();

    let total = records.len();
    let records = dedupe_roster(records);
    if records.len() < total {
        tracing::info!("dropped {} duplicate roster rows", total - records.len());
    }
    tracing::info!(rows = records.len(), "loaded roster from {}", path.display());

    Ok(records)
}

/// Exact-name deduplication, first occurrence kept
pub fn dedupe_roster(records: Vec<RawBaseRecord>) -> Vec<RawBaseRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect()
}

fn read_delimited(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let malformed = |e: csv::Error| LinkerError::malformed(path.display(), e);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(ROSTER_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(malformed)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let values: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(values);
    }

    Ok((headers, rows))
}

fn read_excel(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LinkerError::malformed(path.display(), e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LinkerError::malformed(path.display(), "workbook has no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LinkerError::malformed(path.display(), e))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| LinkerError::malformed(path.display(), "worksheet is empty"))?
        .iter()
        .map(cell_to_string)
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|values| values.iter().any(|v| !v.is_empty()))
        .collect();

    Ok((headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, degree: &str) -> RawBaseRecord {
        RawBaseRecord {
            name: name.into(),
            degree: degree.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let records = vec![raw("Ana Ruiz", "PhD"), raw("Luis Soto", ""), raw("Ana Ruiz", "MSc")];
        let deduped = dedupe_roster(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].degree, "PhD");
    }

    #[test]
    fn test_columns_case_insensitive_and_optional() {
        let headers = vec!["Name".to_string(), "University".to_string()];
        let columns = Columns::resolve(&headers, Path::new("roster.csv")).unwrap();
        let record = columns.record(&["Ana".to_string(), "PUCP".to_string()]);
        assert_eq!(record.name, "Ana");
        assert_eq!(record.university, "PUCP");
        assert_eq!(record.degree, "");
        assert_eq!(record.url_image, None);
    }

    #[test]
    fn test_missing_name_column() {
        let headers = vec!["degree".to_string()];
        let err = Columns::resolve(&headers, Path::new("roster.csv")).err().unwrap();
        assert!(matches!(err, LinkerError::MalformedInput { .. }));
    }
}
