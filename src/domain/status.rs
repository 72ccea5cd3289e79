//! Status colour bands for percentages

use serde::Serialize;

/// Four-band classification of a rounded percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    /// 0–50% (red)
    Critical,
    /// 51–99% (yellow)
    InProgress,
    /// exactly 100% (green)
    Complete,
    /// above 100% (blue)
    Exceeded,
}

impl StatusBand {
    pub const ALL: [StatusBand; 4] = [
        StatusBand::Critical,
        StatusBand::InProgress,
        StatusBand::Complete,
        StatusBand::Exceeded,
    ];

    /// Classify `percent` after rounding to the nearest whole number.
    pub fn from_percent(percent: f64) -> Self {
        let value = if percent.is_finite() {
            percent.round()
        } else {
            0.0
        };

        if value <= 50.0 {
            StatusBand::Critical
        } else if value < 100.0 {
            StatusBand::InProgress
        } else if value == 100.0 {
            StatusBand::Complete
        } else {
            StatusBand::Exceeded
        }
    }

    /// Background colour used in printed reports
    pub fn hex_color(&self) -> &'static str {
        match self {
            StatusBand::Critical => "#FF0000",
            StatusBand::InProgress => "#FFFF00",
            StatusBand::Complete => "#00B050",
            StatusBand::Exceeded => "#00B0F0",
        }
    }

    /// Legend text printed under the official report
    pub fn legend(&self) -> &'static str {
        match self {
            StatusBand::Critical => "Terumumkan (0% - 50%)",
            StatusBand::InProgress => "Sudah Mengumumkan (51% - 99%)",
            StatusBand::Complete => "Sudah Sesuai (100%)",
            StatusBand::Exceeded => "Kelebihan Mengumumkan (>100%)",
        }
    }

    /// `band-` followed by the serialized name, so templates can build it too
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBand::Critical => "band-critical",
            StatusBand::InProgress => "band-in_progress",
            StatusBand::Complete => "band-complete",
            StatusBand::Exceeded => "band-exceeded",
        }
    }

    /// One-letter marker for plain-text tables
    pub fn marker(&self) -> char {
        match self {
            StatusBand::Critical => 'R',
            StatusBand::InProgress => 'Y',
            StatusBand::Complete => 'G',
            StatusBand::Exceeded => 'B',
        }
    }
}
