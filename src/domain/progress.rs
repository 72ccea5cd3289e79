//! Daily procurement progress per OPD
//!
//! Each OPD carries one progress row holding today's package counts and
//! budget values for the three procurement channels, the OPD's target
//! budget, and the percentage carried over from the last finalisation.

use crate::domain::Opd;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Procurement channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Procured through a vendor
    Penyedia,
    /// Self-managed
    Swakelola,
    /// Vendor within a self-managed package
    Pds,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Penyedia, Channel::Swakelola, Channel::Pds];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Penyedia => "Penyedia",
            Channel::Swakelola => "Swakelola",
            Channel::Pds => "PdS",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress row for one OPD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub opd_id: String,
    pub pagu_target: f64,
    #[serde(default)]
    pub prev_percent: f64,
    #[serde(default)]
    pub today_penyedia_paket: u32,
    #[serde(default)]
    pub today_penyedia_pagu: f64,
    #[serde(default)]
    pub today_swakelola_paket: u32,
    #[serde(default)]
    pub today_swakelola_pagu: f64,
    #[serde(default, rename = "todayPdSPaket")]
    pub today_pds_paket: u32,
    #[serde(default, rename = "todayPdSPagu")]
    pub today_pds_pagu: f64,
    pub updated_at: DateTime<Utc>,
}

impl ProgressData {
    /// Zeroed row for a newly tracked OPD
    pub fn for_opd(opd: &Opd, now: DateTime<Utc>) -> Self {
        ProgressData {
            opd_id: opd.id.clone(),
            pagu_target: opd.pagu_murni,
            prev_percent: 0.0,
            today_penyedia_paket: 0,
            today_penyedia_pagu: 0.0,
            today_swakelola_paket: 0,
            today_swakelola_pagu: 0.0,
            today_pds_paket: 0,
            today_pds_pagu: 0.0,
            updated_at: now,
        }
    }

    /// (paket, pagu) for one channel
    pub fn channel(&self, channel: Channel) -> (u32, f64) {
        match channel {
            Channel::Penyedia => (self.today_penyedia_paket, self.today_penyedia_pagu),
            Channel::Swakelola => (self.today_swakelola_paket, self.today_swakelola_pagu),
            Channel::Pds => (self.today_pds_paket, self.today_pds_pagu),
        }
    }

    pub fn set_channel(&mut self, channel: Channel, paket: u32, pagu: f64) {
        match channel {
            Channel::Penyedia => {
                self.today_penyedia_paket = paket;
                self.today_penyedia_pagu = pagu;
            }
            Channel::Swakelola => {
                self.today_swakelola_paket = paket;
                self.today_swakelola_pagu = pagu;
            }
            Channel::Pds => {
                self.today_pds_paket = paket;
                self.today_pds_pagu = pagu;
            }
        }
    }

    /// Sum of the three channel counts; `u64` holds three full `u32` counters
    pub fn total_paket(&self) -> u64 {
        u64::from(self.today_penyedia_paket)
            + u64::from(self.today_swakelola_paket)
            + u64::from(self.today_pds_paket)
    }

    pub fn total_pagu(&self) -> f64 {
        self.today_penyedia_pagu + self.today_swakelola_pagu + self.today_pds_pagu
    }

    /// Today's budget coverage in percent; 0 when the target is not positive.
    pub fn percent_today(&self) -> f64 {
        percent_of(self.total_pagu(), self.pagu_target)
    }

    /// True when both rows carry the same six channel values
    pub fn same_channels(&self, other: &ProgressData) -> bool {
        Channel::ALL
            .iter()
            .all(|c| self.channel(*c) == other.channel(*c))
    }
}

/// `part / whole * 100`, or 0 when `whole` is not positive
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Partial update of a row's channel values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressUpdate {
    pub penyedia_paket: Option<u32>,
    pub penyedia_pagu: Option<f64>,
    pub swakelola_paket: Option<u32>,
    pub swakelola_pagu: Option<f64>,
    pub pds_paket: Option<u32>,
    pub pds_pagu: Option<f64>,
}

impl ProgressUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProgressUpdate::default()
    }

    /// Apply the present fields to a copy of `row`, stamping `now`
    pub fn apply_to(&self, row: &ProgressData, now: DateTime<Utc>) -> ProgressData {
        let mut updated = row.clone();
        if let Some(v) = self.penyedia_paket {
            updated.today_penyedia_paket = v;
        }
        if let Some(v) = self.penyedia_pagu {
            updated.today_penyedia_pagu = v;
        }
        if let Some(v) = self.swakelola_paket {
            updated.today_swakelola_paket = v;
        }
        if let Some(v) = self.swakelola_pagu {
            updated.today_swakelola_pagu = v;
        }
        if let Some(v) = self.pds_paket {
            updated.today_pds_paket = v;
        }
        if let Some(v) = self.pds_pagu {
            updated.today_pds_pagu = v;
        }
        updated.updated_at = now;
        updated
    }
}

/// Rebuild the progress list so every OPD has exactly one row, in OPD order.
///
/// Existing rows keep their counters and take the OPD's current budget as
/// target; OPDs without a row get a zeroed one; rows for removed OPDs are dropped.
pub fn sync_with_opds(
    opds: &[Opd],
    existing: &[ProgressData],
    now: DateTime<Utc>,
) -> Vec<ProgressData> {
    opds.iter()
        .map(|opd| match existing.iter().find(|p| p.opd_id == opd.id) {
            Some(row) => ProgressData {
                pagu_target: opd.pagu_murni,
                ..row.clone()
            },
            None => ProgressData::for_opd(opd, now),
        })
        .collect()
}

/// Carry today's percentage into `prev_percent` for every row.
pub fn finalize(rows: &[ProgressData], now: DateTime<Utc>) -> Vec<ProgressData> {
    rows.iter()
        .map(|row| ProgressData {
            prev_percent: row.percent_today(),
            updated_at: now,
            ..row.clone()
        })
        .collect()
}
