pub mod excel;

use crate::error::Result;
use faculty_common::ClassifiedProfessorRecord;
use serde::Serialize;
use std::path::Path;

/// Write any serializable value as pretty JSON
///
/// The value is serialized in full before the file is touched, and written
/// through a sibling temp file so a failure never leaves a half-written
/// document behind.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut temp_path = output_path.as_os_str().to_owned();
    temp_path.push(".tmp");
    std::fs::write(&temp_path, json)?;
    std::fs::rename(&temp_path, output_path)?;
    Ok(())
}

/// Write the output document (complete replacement)
pub fn write_document(records: &[ClassifiedProfessorRecord], output_path: &Path) -> Result<()> {
    write_json(records, output_path)
}

/// Print a short sample of the interest areas
pub fn print_sample(records: &[ClassifiedProfessorRecord], limit: usize) {
    for record in records.iter().take(limit) {
        println!("\n{}:", record.name);
        if record.interest_areas.is_empty() {
            println!("  - no interest areas assigned");
        }
        for (area, score) in record.interests().iter() {
            println!("  - {}: {}", area, score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_document_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("professors.json");

        let first = vec![ClassifiedProfessorRecord { name: "Ana".into(), ..Default::default() }];
        write_document(&first, &path).unwrap();

        let second = vec![
            ClassifiedProfessorRecord { name: "Luis".into(), ..Default::default() },
            ClassifiedProfessorRecord { name: "Eva".into(), ..Default::default() },
        ];
        write_document(&second, &path).unwrap();

        let loaded: Vec<ClassifiedProfessorRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, second);
        assert!(!dir.path().join("out").join("professors.json.tmp").exists());
    }
}
