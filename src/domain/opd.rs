//! Government work unit (OPD) records

use serde::{Deserialize, Serialize};

/// A tracked work unit and its procurement budget ceiling (millions of rupiah)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opd {
    pub id: String,
    pub name: String,
    pub pagu_murni: f64,
}

impl Opd {
    pub fn new(id: impl Into<String>, name: impl Into<String>, pagu_murni: f64) -> Self {
        Opd {
            id: id.into(),
            name: name.into(),
            pagu_murni,
        }
    }

    /// Case-insensitive substring match on the unit name
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Next free id of the form `opd-NNN`, one past the highest numeric suffix in use.
pub fn next_opd_id(opds: &[Opd]) -> String {
    let highest = opds
        .iter()
        .filter_map(|o| o.id.strip_prefix("opd-"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("opd-{:03}", highest + 1)
}
