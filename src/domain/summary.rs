//! Province-wide statistics shown on the recap page and the TV monitor

use crate::domain::progress::{percent_of, ProgressData};
use crate::domain::AppData;
use serde::Serialize;

/// Raw percentage below which an OPD needs leadership attention
pub const CRITICAL_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub opd_count: usize,
    /// Σ OPD budget ceilings
    pub total_pagu_murni: f64,
    /// Σ announced budget across all channels
    pub total_pagu_terinput: f64,
    pub total_paket: u64,
    pub average_percent: f64,
    /// Names of OPDs whose rounded percentage reached 100
    pub completed: Vec<String>,
    /// OPDs whose raw percentage is below 50
    pub critical_count: usize,
}

impl Summary {
    pub fn compute(data: &AppData) -> Self {
        let total_pagu_murni: f64 = data.opds.iter().map(|o| o.pagu_murni).sum();
        let total_pagu_terinput: f64 = data.progress.iter().map(|p| p.total_pagu()).sum();
        let total_paket: u64 = data
            .progress
            .iter()
            .map(ProgressData::total_paket)
            .sum();

        let completed = data
            .progress
            .iter()
            .filter(|p| p.percent_today().round() >= 100.0)
            .map(|p| {
                data.opd(&p.opd_id)
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string())
            })
            .collect();

        let critical_count = data
            .progress
            .iter()
            .filter(|p| p.percent_today() < CRITICAL_PERCENT)
            .count();

        Summary {
            opd_count: data.opds.len(),
            total_pagu_murni,
            total_pagu_terinput,
            total_paket,
            average_percent: percent_of(total_pagu_terinput, total_pagu_murni),
            completed,
            critical_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::Channel;
    use crate::domain::state::Update;
    use crate::domain::Opd;
    use chrono::Utc;

    fn data_with(rows: &[(&str, f64, f64)]) -> AppData {
        let mut data = AppData::default();
        let opds = rows
            .iter()
            .map(|(id, target, _)| Opd::new(*id, format!("OPD {}", id), *target))
            .collect();
        data.apply(Update::ReplaceOpds(opds), Utc::now()).unwrap();
        for (id, _, pagu) in rows {
            let mut row = data.progress_for(id).unwrap().clone();
            row.set_channel(Channel::Penyedia, 1, *pagu);
            data.apply(Update::UpsertProgress(row), Utc::now()).unwrap();
        }
        data
    }

    #[test]
    fn test_totals_and_average() {
        let data = data_with(&[("a", 100.0, 50.0), ("b", 300.0, 150.0)]);
        let summary = Summary::compute(&data);

        assert_eq!(summary.opd_count, 2);
        assert_eq!(summary.total_pagu_murni, 400.0);
        assert_eq!(summary.total_pagu_terinput, 200.0);
        assert_eq!(summary.total_paket, 2);
        assert_eq!(summary.average_percent, 50.0);
    }

    #[test]
    fn test_completed_uses_rounded_percent() {
        let data = data_with(&[("a", 1000.0, 996.0), ("b", 1000.0, 994.0), ("c", 10.0, 30.0)]);
        let summary = Summary::compute(&data);
        assert_eq!(summary.completed, vec!["OPD a", "OPD c"]);
    }

    #[test]
    fn test_critical_uses_raw_percent() {
        let data = data_with(&[("a", 100.0, 49.9), ("b", 100.0, 50.0), ("c", 0.0, 0.0)]);
        let summary = Summary::compute(&data);
        assert_eq!(summary.critical_count, 2);
    }

    #[test]
    fn test_empty_state() {
        let summary = Summary::compute(&AppData::default());
        assert_eq!(summary.average_percent, 0.0);
        assert!(summary.completed.is_empty());
        assert_eq!(summary.critical_count, 0);
    }

    #[test]
    fn test_total_paket_with_maximum_counts() {
        let mut data = data_with(&[("a", 100.0, 10.0), ("b", 100.0, 10.0)]);
        for id in ["a", "b"] {
            let mut row = data.progress_for(id).unwrap().clone();
            row.set_channel(Channel::Penyedia, u32::MAX, 10.0);
            row.set_channel(Channel::Swakelola, 1, 0.0);
            data.apply(Update::UpsertProgress(row), Utc::now()).unwrap();
        }

        let summary = Summary::compute(&data);
        assert_eq!(summary.total_paket, 2 * (u64::from(u32::MAX) + 1));
    }
}
