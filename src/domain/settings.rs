//! Report signature settings

use serde::{Deserialize, Serialize};

/// Keys accepted by `sirup settings`
pub const SETTING_KEYS: [&str; 4] = ["pejabat_nama", "pejabat_nip", "pejabat_jabatan", "ta"];

/// Official who signs the printed report, and the fiscal year it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[serde(default)]
    pub pejabat_nama: String,
    #[serde(default)]
    pub pejabat_nip: String,
    #[serde(default)]
    pub pejabat_jabatan: String,
    pub ta: String,
}

impl SystemSettings {
    pub fn for_fiscal_year(ta: impl Into<String>) -> Self {
        SystemSettings {
            pejabat_nama: String::new(),
            pejabat_nip: String::new(),
            pejabat_jabatan: String::new(),
            ta: ta.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "pejabat_nama" => Some(&self.pejabat_nama),
            "pejabat_nip" => Some(&self.pejabat_nip),
            "pejabat_jabatan" => Some(&self.pejabat_jabatan),
            "ta" => Some(&self.ta),
            _ => None,
        }
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        SystemSettings::for_fiscal_year("2026")
    }
}
