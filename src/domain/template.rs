//! CSV input template
//!
//! Operators download one line per OPD, fill in the six channel columns in
//! a spreadsheet and upload the file again.

use crate::domain::{AppData, ProgressData};
use crate::error::{MonitorError, Result};
use chrono::{DateTime, Utc};

pub const HEADER: [&str; 8] = [
    "ID OPD",
    "Nama Satuan Kerja",
    "Paket Penyedia",
    "Pagu Penyedia",
    "Paket Swakelola",
    "Pagu Swakelola",
    "Paket PdS",
    "Pagu PdS",
];

/// Default download name for a fiscal year
pub fn file_name(ta: &str) -> String {
    format!("TEMPLATE_INPUT_SIRUP_{}.csv", ta)
}

/// Render the template for every progress row, in progress order
pub fn render_template(data: &AppData) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for row in &data.progress {
        let name = data.opd(&row.opd_id).map(|o| o.name.as_str()).unwrap_or("");
        writer.write_record([
            row.opd_id.clone(),
            name.to_string(),
            row.today_penyedia_paket.to_string(),
            row.today_penyedia_pagu.to_string(),
            row.today_swakelola_paket.to_string(),
            row.today_swakelola_pagu.to_string(),
            row.today_pds_paket.to_string(),
            row.today_pds_pagu.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MonitorError::Import(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MonitorError::Import(e.to_string()))
}

/// Parse an uploaded template into updated copies of the matching rows.
///
/// Rows that name an unknown OPD or carry fewer than eight fields are
/// skipped. Target budget and previous percentage are kept.
pub fn parse_import(input: &[u8], data: &AppData, now: DateTime<Utc>) -> Result<Vec<ProgressData>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut updated: Vec<ProgressData> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            tracing::debug!(error = %e, "template tokenise failed");
            MonitorError::Import("unsupported or corrupt file".to_string())
        })?;
        if record.len() < HEADER.len() {
            continue;
        }

        let id = record[0].trim_matches('"');
        let Some(existing) = data.progress_for(id) else {
            tracing::debug!(opd_id = id, "skipping row for unknown OPD");
            continue;
        };

        let row = ProgressData {
            today_penyedia_paket: parse_count(&record[2]),
            today_penyedia_pagu: parse_budget(&record[3]),
            today_swakelola_paket: parse_count(&record[4]),
            today_swakelola_pagu: parse_budget(&record[5]),
            today_pds_paket: parse_count(&record[6]),
            today_pds_pagu: parse_budget(&record[7]),
            updated_at: now,
            ..existing.clone()
        };
        // a later line for the same OPD wins
        match updated.iter_mut().find(|p| p.opd_id == row.opd_id) {
            Some(slot) => *slot = row,
            None => updated.push(row),
        }
    }

    if updated.is_empty() {
        return Err(MonitorError::Import("no valid data found in file".to_string()));
    }
    Ok(updated)
}

/// Leading integer of `field`; anything unparsable or negative is 0.
fn parse_count(field: &str) -> u32 {
    let s = field.trim();
    let digits: &str = match s.strip_prefix('+') {
        Some(rest) => rest,
        None if s.starts_with('-') => return 0,
        None => s,
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

/// Leading decimal number of `field`, 0 when there is none.
fn parse_budget(field: &str) -> f64 {
    let s = field.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }
    // exponent only counts when digits follow it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::Channel;
    use crate::domain::state::Update;
    use crate::domain::Opd;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 2, 0, 0).unwrap()
    }

    fn sample() -> AppData {
        let mut data = AppData::default();
        data.apply(
            Update::ReplaceOpds(vec![
                Opd::new("opd-001", "Dinas Kesehatan", 1000.0),
                Opd::new("opd-002", "Biro Umum, Perlengkapan", 250.5),
            ]),
            now(),
        )
        .unwrap();
        let mut row = data.progress_for("opd-001").unwrap().clone();
        row.set_channel(Channel::Penyedia, 12, 345.75);
        row.set_channel(Channel::Pds, 1, 0.125);
        row.prev_percent = 33.0;
        data.apply(Update::UpsertProgress(row), now()).unwrap();
        data
    }

    #[test]
    fn test_render_has_header_and_rows() {
        let csv = render_template(&sample()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(lines[1], "opd-001,Dinas Kesehatan,12,345.75,0,0,1,0.125");
        assert_eq!(lines[2], "opd-002,\"Biro Umum, Perlengkapan\",0,0,0,0,0,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_round_trip_keeps_channel_values() {
        let data = sample();
        let csv = render_template(&data).unwrap();
        let rows = parse_import(csv.as_bytes(), &data, now()).unwrap();

        assert_eq!(rows.len(), data.progress.len());
        for row in &rows {
            let original = data.progress_for(&row.opd_id).unwrap();
            assert!(row.same_channels(original));
            assert_eq!(row.prev_percent, original.prev_percent);
            assert_eq!(row.pagu_target, original.pagu_target);
        }
    }

    #[test]
    fn test_import_lenient_fields() {
        let data = sample();
        let input = "header\n\n\"opd-002\" , x , 12.7 , 10.5abc , -3 , junk , 2 , 1e2\nopd-001,short\nghost,G,1,1,1,1,1,1\n";
        let rows = parse_import(input.as_bytes(), &data, now()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.opd_id, "opd-002");
        assert_eq!(row.channel(Channel::Penyedia), (12, 10.5));
        assert_eq!(row.channel(Channel::Swakelola), (0, 0.0));
        assert_eq!(row.channel(Channel::Pds), (2, 100.0));
        assert_eq!(row.updated_at, now());
    }

    #[test]
    fn test_import_nothing_matched() {
        let data = sample();
        let err = parse_import(b"ID OPD\nghost,G,1,1,1,1,1,1\n", &data, now()).unwrap_err();
        assert_eq!(err.to_string(), "Import failed: no valid data found in file");

        let err = parse_import(b"", &data, now()).unwrap_err();
        assert!(err.to_string().contains("no valid data"));
    }

    #[test]
    fn test_import_rejects_binary() {
        let data = sample();
        let input = b"ID OPD\nopd-001,\xff\xfe,1,1,1,1,1,1\n";
        let err = parse_import(input, &data, now()).unwrap_err();
        assert!(err.to_string().contains("unsupported or corrupt file"));
    }

    #[test]
    fn test_prefix_parsers() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count("+7x"), 7);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_budget("3.5e"), 3.5);
        assert_eq!(parse_budget(".5"), 0.5);
        assert_eq!(parse_budget("-2.25"), -2.25);
        assert_eq!(parse_budget("abc"), 0.0);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("2026"), "TEMPLATE_INPUT_SIRUP_2026.csv");
    }
}
