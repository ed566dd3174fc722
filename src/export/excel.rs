//! Excel report
//!
//! Sheet 1 lists every professor, sheet 2 the distributions.

use crate::error::Result;
use faculty_common::{ClassifiedProfessorRecord, Distributions};
use rust_xlsxwriter::*;
use std::path::Path;

const PROFESSOR_COLUMNS: &[(&str, f64)] = &[
    ("Name", 28.0),
    ("Degree level", 12.0),
    ("Specialization", 28.0),
    ("University", 28.0),
    ("Research papers", 10.0),
    ("Interest areas", 48.0),
    ("Original degree", 36.0),
    ("Original university", 36.0),
    ("Link score", 10.0),
];

fn format_interests(record: &ClassifiedProfessorRecord) -> String {
    record
        .interests()
        .iter()
        .map(|(label, score)| format!("{} ({:.3})", label, score))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn report_to_buffer(records: &[ClassifiedProfessorRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let professors = workbook.add_worksheet();
    professors.set_name("Professors")?;

    for (col, (title, width)) in PROFESSOR_COLUMNS.iter().enumerate() {
        let col = col as u16;
        professors.set_column_width(col, *width)?;
        professors.write_string_with_format(0, col, *title, &header_format)?;
    }
    professors.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        professors.write_string_with_format(row, 0, &record.name, &value_format)?;
        professors.write_string_with_format(row, 1, record.degree_level.as_str(), &value_format)?;
        professors.write_string_with_format(row, 2, &record.normalized_specialization, &value_format)?;
        professors.write_string_with_format(row, 3, &record.normalized_university, &value_format)?;
        professors.write_number_with_format(row, 4, record.research_papers as f64, &value_format)?;
        professors.write_string_with_format(row, 5, format_interests(record), &value_format)?;
        professors.write_string_with_format(row, 6, &record.original_degree, &value_format)?;
        professors.write_string_with_format(row, 7, &record.original_university, &value_format)?;
        match record.link_score {
            Some(score) => professors.write_number_with_format(row, 8, score, &value_format)?,
            None => professors.write_string_with_format(row, 8, "", &value_format)?,
        };
    }

    let distributions = Distributions::from_records(records);
    let summary = workbook.add_worksheet();
    summary.set_name("Distributions")?;
    summary.set_column_width(0, 36.0)?;
    summary.set_column_width(1, 10.0)?;

    summary.write_string_with_format(0, 0, "Professors", &header_format)?;
    summary.write_number(0, 1, distributions.total as f64)?;
    summary.write_string_with_format(1, 0, "Linked", &header_format)?;
    summary.write_number(1, 1, distributions.linked as f64)?;

    let sections = [
        ("Degree level", &distributions.degree_levels),
        ("Specialization", &distributions.specializations),
        ("University", &distributions.universities),
        ("Interest area", &distributions.interest_areas),
    ];

    let mut row: u32 = 3;
    for (title, counts) in sections {
        summary.write_string_with_format(row, 0, title, &header_format)?;
        summary.write_string_with_format(row, 1, "Count", &header_format)?;
        row += 1;
        for (value, count) in counts {
            summary.write_string(row, 0, value)?;
            summary.write_number(row, 1, *count as f64)?;
            row += 1;
        }
        row += 1;
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn generate_report(records: &[ClassifiedProfessorRecord], output_path: &Path) -> Result<()> {
    let buffer = report_to_buffer(records)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
