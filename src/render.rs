//! Output rendering for the CLI
//!
//! Lists print as an aligned table, pretty JSON, or CSV. Tables are for
//! people; JSON and CSV keep the backend field names so output can be piped
//! into other tools.

use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::models::{Assignment, ClassGroup, Course, DiaryEntry, User};

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A record that can be shown as one table row
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Write a list of records in the chosen format
pub fn render_list<T, W>(items: &[T], format: OutputFormat, mut out: W) -> Result<(), RenderError>
where
    T: Tabular + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, items)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(T::headers())?;
            for item in items {
                writer.write_record(item.row())?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = items.iter().map(T::row).collect();
            write_table(&mut out, T::headers(), &rows)?;
        }
    }
    Ok(())
}

/// Write one record; tables show it as `Field: value` lines
pub fn render_one<T, W>(item: &T, format: OutputFormat, mut out: W) -> Result<(), RenderError>
where
    T: Tabular + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Table => {
            let headers = T::headers();
            let width = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0) + 1;
            for (header, value) in headers.iter().zip(item.row()) {
                writeln!(out, "{:<width$} {}", format!("{}:", header), value, width = width)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, item)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => render_list(std::slice::from_ref(item), format, out),
    }
}

fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> std::io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    writeln!(out, "{}", line(headers.to_vec()))?;
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(total))?;
    for row in rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

impl Tabular for Assignment {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Status", "Result", "Deadline", "Weight"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.status().to_string(),
            self.result_label(),
            self.deadline_label(),
            self.weight.to_string(),
        ]
    }
}

impl Tabular for DiaryEntry {
    fn headers() -> &'static [&'static str] {
        &["ID", "Date", "Description", "Image"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.description.clone(),
            or_dash(self.image.as_deref()),
        ]
    }
}

impl Tabular for Course {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Subjects", "Students"]
    }

    fn row(&self) -> Vec<String> {
        let subjects: Vec<&str> = self.subjects.iter().map(|s| s.name.as_str()).collect();
        vec![
            self.id.clone(),
            self.name.clone(),
            or_dash(Some(&subjects.join(", "))),
            self.students.len().to_string(),
        ]
    }
}

impl Tabular for ClassGroup {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Program", "Course"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            or_dash(Some(&self.program)),
            or_dash(self.course_id.as_deref()),
        ]
    }
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Role", "Phone"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            if self.is_teacher { "teacher" } else { "student" }.to_string(),
            or_dash(self.phone.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entries() -> Vec<DiaryEntry> {
        vec![
            DiaryEntry {
                id: "d2".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                description: "Code review".to_string(),
                image: None,
            },
            DiaryEntry {
                id: "d1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                description: "Onboarding, met the team".to_string(),
                image: Some("https://img.example.com/1.png".to_string()),
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        render_list(&entries(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table() {
        let table = render(OutputFormat::Table);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID  Date        Description"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("d2  2024-01-02  Code review"));
        assert!(lines[2].ends_with('-'));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = render(OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "ID,Date,Description,Image");
        assert_eq!(lines[1], "d2,2024-01-02,Code review,-");
        assert_eq!(
            lines[2],
            "d1,2024-01-01,\"Onboarding, met the team\",https://img.example.com/1.png"
        );
    }

    #[test]
    fn test_json_uses_wire_names() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json[0]["datum"], "2024-01-02");
        assert_eq!(json[1]["beschrijving"], "Onboarding, met the team");
    }

    #[test]
    fn test_render_one_table() {
        let mut out = Vec::new();
        render_one(&entries()[0], OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Description: Code review"));
        assert!(text.lines().next().unwrap().starts_with("ID:"));
    }
}
