//! Read-only views: public recap, official report and TV monitor
//!
//! The builders are pure functions of the snapshot, the config and the
//! current time so the CLI and the web server render identical numbers.

use crate::domain::format::{clock, long_date, update_stamp, weekday_date};
use crate::domain::listing::{search, PAGE_SIZES};
use crate::domain::report::build_rows;
use crate::domain::{
    AppData, Pagination, ReportRow, ReportTotals, StatusBand, Summary, SystemSettings,
};
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, MonitorRepository};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Data sources cited under the official report
pub const REPORT_SOURCES: [&str; 2] = ["SiRUP LKPP RI", "BPKAD Prov. NTB"];

pub const REPORT_NOTES: [&str; 2] = [
    "Data pagu ditampilkan dalam satuan jutaan rupiah;",
    "Pagu Pengadaan (selain dari kode akun : 5.1.01 , 5.1.03 , 5.1.04 dan 5.4 dan tagging NP) \
     otomatis terisi apabila sudah melakukan penarikan data RKAD dari aplikasi SIPD.",
];

/// Search term and page requested by the caller
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub search: String,
    pub page: usize,
    /// Falls back to the configured page size
    pub page_size: Option<usize>,
}

/// One page of the progress table plus totals over every matching row
#[derive(Debug, Clone, Serialize)]
pub struct ProgressPage {
    pub title: String,
    pub region: String,
    pub ta: String,
    pub stamp: String,
    pub search: String,
    pub page_sizes: Vec<usize>,
    pub pagination: Pagination,
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    /// `Mataram, 19 Oktober 2026`
    pub place_date: String,
    pub jabatan: String,
    pub nama: String,
    pub nip: String,
}

/// The printable report: the paginated screen view, every matching row for print,
/// and the legend and signature block.
#[derive(Debug, Clone, Serialize)]
pub struct OfficialReport {
    pub page: ProgressPage,
    pub all_rows: Vec<ReportRow>,
    pub sources: Vec<&'static str>,
    pub notes: Vec<&'static str>,
    pub legend: Vec<LegendEntry>,
    pub signature: Signature,
}

#[derive(Debug, Clone, Serialize)]
pub struct TvRow {
    pub number: usize,
    pub name: String,
    pub pagu_target: f64,
    /// Rounded for the large display
    pub percent: i64,
    pub band: StatusBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct TvView {
    pub region: String,
    pub ta: String,
    pub date_label: String,
    pub clock: String,
    pub timezone_label: String,
    pub summary: Summary,
    pub rows: Vec<TvRow>,
    pub ticker: Vec<String>,
}

pub fn legend() -> Vec<LegendEntry> {
    StatusBand::ALL
        .iter()
        .map(|band| LegendEntry {
            label: band.legend(),
            color: band.hex_color(),
            css_class: band.css_class(),
        })
        .collect()
}

pub fn recap_title(config: &Config) -> String {
    format!("DATA REALTIME PROGRES RUP PROVINSI {}", config.region.to_uppercase())
}

pub fn report_title(config: &Config, settings: &SystemSettings) -> String {
    format!(
        "PROGRES RENCANA UMUM PENGADAAN (RUP) APBD PEMPROV {} TA. {}",
        config.region.to_uppercase(),
        settings.ta
    )
}

/// Build one page of the searchable progress table
pub fn progress_page(
    data: &AppData,
    config: &Config,
    query: &ListingQuery,
    title: String,
    now: DateTime<Utc>,
) -> ProgressPage {
    let matching = search(data, query.search.trim());
    let page_size = query.page_size.unwrap_or(config.page_size);
    let pagination = Pagination::new(matching.len(), query.page, page_size);
    let rows = build_rows(data, pagination.slice(&matching), pagination.offset() + 1);

    ProgressPage {
        title,
        region: config.region.clone(),
        ta: data.settings.ta.clone(),
        stamp: update_stamp(config.local_time(now), &config.timezone_label),
        search: query.search.trim().to_string(),
        page_sizes: PAGE_SIZES.to_vec(),
        pagination,
        rows,
        totals: ReportTotals::compute(&matching),
    }
}

pub fn official_report(
    data: &AppData,
    config: &Config,
    query: &ListingQuery,
    now: DateTime<Utc>,
) -> OfficialReport {
    let title = report_title(config, &data.settings);
    let page = progress_page(data, config, query, title, now);
    let matching = search(data, query.search.trim());
    let settings = &data.settings;

    OfficialReport {
        page,
        all_rows: build_rows(data, &matching, 1),
        sources: REPORT_SOURCES.to_vec(),
        notes: REPORT_NOTES.to_vec(),
        legend: legend(),
        signature: Signature {
            place_date: format!(
                "{}, {}",
                config.city,
                long_date(config.local_time(now).date())
            ),
            jabatan: settings.pejabat_jabatan.clone(),
            nama: settings.pejabat_nama.clone(),
            nip: settings.pejabat_nip.clone(),
        },
    }
}

pub fn tv_view(data: &AppData, config: &Config, now: DateTime<Utc>) -> TvView {
    let local = config.local_time(now);
    let rows = data
        .progress
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let percent = row.percent_today();
            TvRow {
                number: i + 1,
                name: data
                    .opd(&row.opd_id)
                    .map(|o| o.name.clone())
                    .unwrap_or_default(),
                pagu_target: row.pagu_target,
                percent: percent.round() as i64,
                band: StatusBand::from_percent(percent),
            }
        })
        .collect();

    TvView {
        region: config.region.clone(),
        ta: data.settings.ta.clone(),
        date_label: weekday_date(local.date()).to_uppercase(),
        clock: clock(local),
        timezone_label: config.timezone_label.clone(),
        summary: Summary::compute(data),
        rows,
        ticker: data.news.iter().map(|n| n.ticker_line()).collect(),
    }
}

/// Loads the snapshot and config for each view
pub struct ReportService {
    repository: FileSystemRepository,
}

impl ReportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ReportService { repository }
    }

    fn load(&self) -> Result<(AppData, Config)> {
        Ok((self.repository.load_data()?, self.repository.load_config()?))
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary::compute(&self.repository.load_data()?))
    }

    pub fn recap(&self, query: &ListingQuery) -> Result<ProgressPage> {
        let (data, config) = self.load()?;
        let title = recap_title(&config);
        Ok(progress_page(&data, &config, query, title, Utc::now()))
    }

    pub fn report(&self, query: &ListingQuery) -> Result<OfficialReport> {
        let (data, config) = self.load()?;
        Ok(official_report(&data, &config, query, Utc::now()))
    }

    pub fn tv(&self) -> Result<TvView> {
        let (data, config) = self.load()?;
        Ok(tv_view(&data, &config, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, NewsItem, Opd, Update};
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 1, 5, 9).unwrap()
    }

    fn sample() -> AppData {
        let mut data = AppData::default();
        let opds = (1..=12)
            .map(|i| Opd::new(format!("opd-{:03}", i), format!("Dinas {:02}", i), 100.0))
            .collect();
        data.apply(Update::ReplaceOpds(opds), now()).unwrap();
        for i in 1..=12 {
            let mut row = data.progress_for(&format!("opd-{:03}", i)).unwrap().clone();
            row.set_channel(Channel::Penyedia, 1, f64::from(i) * 10.0);
            data.apply(Update::UpsertProgress(row), now()).unwrap();
        }
        data.settings.pejabat_nama = "Budi".to_string();
        data.settings.pejabat_jabatan = "Kepala Biro".to_string();
        data
    }

    #[test]
    fn test_page_numbering_and_totals_cover_all_matches() {
        let data = sample();
        let query = ListingQuery {
            page: 2,
            page_size: Some(5),
            ..Default::default()
        };
        let page = progress_page(&data, &Config::default(), &query, "T".to_string(), now());

        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0].number, 6);
        assert_eq!(page.rows[0].name, "Dinas 06");
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.totals.total_paket, 12);
        assert_eq!(page.stamp, "UPDATE 19 OKTOBER 2026 - JAM : 09.05 WITA");
    }

    #[test]
    fn test_search_narrows_rows_and_totals() {
        let data = sample();
        let query = ListingQuery {
            search: " dinas 1 ".to_string(),
            page: 1,
            page_size: None,
        };
        let page = progress_page(&data, &Config::default(), &query, "T".to_string(), now());

        let names: Vec<_> = page.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Dinas 10", "Dinas 11", "Dinas 12"]);
        assert_eq!(page.totals.pagu_target, 300.0);
        assert_eq!(page.search, "dinas 1");
    }

    #[test]
    fn test_official_report_has_all_rows_and_signature() {
        let data = sample();
        let report = official_report(&data, &Config::default(), &ListingQuery::default(), now());

        assert_eq!(report.page.rows.len(), 10);
        assert_eq!(report.all_rows.len(), 12);
        assert_eq!(report.legend.len(), 4);
        assert_eq!(report.signature.place_date, "Mataram, 19 Oktober 2026");
        assert_eq!(report.signature.nama, "Budi");
        assert!(report.page.title.ends_with("TA. 2026"));
    }

    #[test]
    fn test_tv_view() {
        let mut data = sample();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        data.apply(Update::UpsertNews(NewsItem::new("Info", "x".repeat(150), day)), now())
            .unwrap();

        let tv = tv_view(&data, &Config::default(), now());
        assert_eq!(tv.rows.len(), 12);
        assert_eq!(tv.rows[11].percent, 120);
        assert_eq!(tv.rows[11].band, StatusBand::Exceeded);
        assert_eq!(tv.summary.completed.len(), 3);
        assert_eq!(tv.summary.critical_count, 4);
        assert_eq!(tv.date_label, "SENIN, 19 OKTOBER 2026");
        assert_eq!(tv.clock, "09.05.09");
        assert_eq!(tv.ticker[0], format!("INFO: {}...", "x".repeat(100)));
    }
}
