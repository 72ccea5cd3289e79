//! Rows and totals of the progress table
//!
//! The same table appears on the public recap page, in the official report
//! and (reduced) on the TV monitor.

use crate::domain::progress::percent_of;
use crate::domain::{AppData, ProgressData, StatusBand};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// 1-based position across all pages
    pub number: usize,
    pub opd_id: String,
    pub name: String,
    pub pagu_target: f64,
    pub penyedia_paket: u32,
    pub penyedia_pagu: f64,
    pub swakelola_paket: u32,
    pub swakelola_pagu: f64,
    pub pds_paket: u32,
    pub pds_pagu: f64,
    pub total_paket: u64,
    pub total_pagu: f64,
    pub prev_percent: f64,
    pub today_percent: f64,
    pub prev_band: StatusBand,
    pub today_band: StatusBand,
}

impl ReportRow {
    pub fn new(number: usize, row: &ProgressData, name: &str) -> Self {
        let today_percent = row.percent_today();
        ReportRow {
            number,
            opd_id: row.opd_id.clone(),
            name: name.to_string(),
            pagu_target: row.pagu_target,
            penyedia_paket: row.today_penyedia_paket,
            penyedia_pagu: row.today_penyedia_pagu,
            swakelola_paket: row.today_swakelola_paket,
            swakelola_pagu: row.today_swakelola_pagu,
            pds_paket: row.today_pds_paket,
            pds_pagu: row.today_pds_pagu,
            total_paket: row.total_paket(),
            total_pagu: row.total_pagu(),
            prev_percent: row.prev_percent,
            today_percent,
            prev_band: StatusBand::from_percent(row.prev_percent),
            today_band: StatusBand::from_percent(today_percent),
        }
    }
}

/// Number rows starting at `first_number`, looking names up in `data`
pub fn build_rows(data: &AppData, rows: &[&ProgressData], first_number: usize) -> Vec<ReportRow> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let name = data.opd(&row.opd_id).map(|o| o.name.as_str()).unwrap_or("");
            ReportRow::new(first_number + i, row, name)
        })
        .collect()
}

/// Footer line ("TOTAL PROVINSI") over a filtered row set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTotals {
    pub pagu_target: f64,
    pub penyedia_paket: u64,
    pub penyedia_pagu: f64,
    pub swakelola_paket: u64,
    pub swakelola_pagu: f64,
    pub pds_paket: u64,
    pub pds_pagu: f64,
    pub total_paket: u64,
    pub total_pagu: f64,
    /// Mean of the rows' previous percentages
    pub average_prev_percent: f64,
    /// Σ pagu / Σ target
    pub today_percent: f64,
    pub prev_band: StatusBand,
    pub today_band: StatusBand,
}

impl ReportTotals {
    pub fn compute(rows: &[&ProgressData]) -> Self {
        let sum_f = |f: fn(&ProgressData) -> f64| rows.iter().map(|r| f(r)).sum::<f64>();
        let sum_u = |f: fn(&ProgressData) -> u32| rows.iter().map(|r| u64::from(f(r))).sum::<u64>();

        let pagu_target = sum_f(|r| r.pagu_target);
        let penyedia_paket = sum_u(|r| r.today_penyedia_paket);
        let penyedia_pagu = sum_f(|r| r.today_penyedia_pagu);
        let swakelola_paket = sum_u(|r| r.today_swakelola_paket);
        let swakelola_pagu = sum_f(|r| r.today_swakelola_pagu);
        let pds_paket = sum_u(|r| r.today_pds_paket);
        let pds_pagu = sum_f(|r| r.today_pds_pagu);
        let total_pagu = penyedia_pagu + swakelola_pagu + pds_pagu;

        let average_prev_percent = if rows.is_empty() {
            0.0
        } else {
            sum_f(|r| r.prev_percent) / rows.len() as f64
        };
        let today_percent = percent_of(total_pagu, pagu_target);

        ReportTotals {
            pagu_target,
            penyedia_paket,
            penyedia_pagu,
            swakelola_paket,
            swakelola_pagu,
            pds_paket,
            pds_pagu,
            total_paket: penyedia_paket + swakelola_paket + pds_paket,
            total_pagu,
            average_prev_percent,
            today_percent,
            prev_band: StatusBand::from_percent(average_prev_percent),
            today_band: StatusBand::from_percent(today_percent),
        }
    }
}
