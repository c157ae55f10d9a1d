use time::{macros::format_description, Date};

use crate::waitlist::repo_types::SignupRecord;

pub const CSV_HEADER: [&str; 4] = ["Email", "Experience", "Interests", "Signed Up"];

/// Spreadsheets evaluate cells starting with these as formulas.
const FORMULA_LEADS: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

fn escape_field(field: &str) -> String {
    let mut cell = String::with_capacity(field.len() + 1);
    if field.starts_with(FORMULA_LEADS) {
        cell.push('\'');
    }
    cell.push_str(field);

    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell
    }
}

/// Short US-style date, e.g. `1/5/2026`.
fn short_date(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

/// One header line and one line per record, joined by `\n`.
pub fn export_csv(records: &[SignupRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for r in records {
        let row = [
            escape_field(&r.email),
            escape_field(r.experience.as_str()),
            escape_field(r.interests.as_deref().unwrap_or("")),
            short_date(r.created_at.date()),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// `waitlist-signups-YYYY-MM-DD.csv`
pub fn export_filename(today: Date) -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    let stamp = today
        .format(&fmt)
        .unwrap_or_else(|_| today.to_string());
    format!("waitlist-signups-{stamp}.csv")
}
