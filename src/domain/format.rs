//! Indonesian (id-ID) number and date presentation

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Whole number with `.` as thousands separator (e.g. `1.234.567`)
pub fn format_report_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.abs().round() as u64;
    let sign = if value < 0.0 && rounded != 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded))
}

/// Package counts use the same grouping as budgets
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

/// Two decimals with `,` as decimal separator (e.g. `1.234,50`)
pub fn format_report_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0,00".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!(
        "{}{},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_report_decimal(value))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// `02 Maret 2026`
pub fn long_date(date: NaiveDate) -> String {
    format!("{:02} {} {}", date.day(), month_name(date), date.year())
}

/// `Senin, 2 Maret 2026`
pub fn weekday_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date),
        date.year()
    )
}

/// `14.30.05`
pub fn clock(at: NaiveDateTime) -> String {
    format!("{:02}.{:02}.{:02}", at.hour(), at.minute(), at.second())
}

/// Report banner, e.g. `UPDATE 02 MARET 2026 - JAM : 14.30 WITA`
pub fn update_stamp(at: NaiveDateTime, timezone_label: &str) -> String {
    format!(
        "UPDATE {} - JAM : {:02}.{:02} {}",
        long_date(at.date()).to_uppercase(),
        at.hour(),
        at.minute(),
        timezone_label
    )
}
