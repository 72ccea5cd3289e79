//! Output formatting utilities

use crate::application::reports::{ProgressPage, TvView};
use crate::domain::format::{
    format_count, format_percent, format_report_decimal, format_report_number, long_date,
};
use crate::domain::{Channel, NewsItem, Opd, ProgressData, StatusBand, Summary, SystemSettings, User};
use crate::infrastructure::Config;

const NAME_WIDTH: usize = 32;

/// Cut `name` to the table column, marking the cut with `~`
fn fit(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(width - 1).collect();
    cut.push('~');
    cut
}

fn band_cell(percent: f64, band: StatusBand) -> String {
    format!("{} {}", format_report_decimal(percent), band.marker())
}

pub fn format_opd_list(opds: &[Opd]) -> String {
    if opds.is_empty() {
        return "No OPDs found".to_string();
    }

    let mut output = format!(
        "{:<10}  {:<w$}  {:>15}\n",
        "ID",
        "Satuan Kerja",
        "Pagu (Jt)",
        w = NAME_WIDTH
    );
    for opd in opds {
        output.push_str(&format!(
            "{:<10}  {:<w$}  {:>15}\n",
            opd.id,
            fit(&opd.name, NAME_WIDTH),
            format_report_number(opd.pagu_murni),
            w = NAME_WIDTH
        ));
    }
    output
}

/// Detail view of one progress row
pub fn format_progress_row(opd: &Opd, row: &ProgressData) -> String {
    let mut output = format!("{} ({})\n", opd.name, opd.id);
    output.push_str(&format!(
        "  Pagu target      {:>15}\n",
        format_report_number(row.pagu_target)
    ));
    for channel in Channel::ALL {
        let (paket, pagu) = row.channel(channel);
        output.push_str(&format!(
            "  {:<10} paket {:>6}  pagu {:>15}\n",
            channel.label(),
            format_count(u64::from(paket)),
            format_report_decimal(pagu)
        ));
    }
    output.push_str(&format!(
        "  Total      paket {:>6}  pagu {:>15}\n",
        format_count(row.total_paket()),
        format_report_decimal(row.total_pagu())
    ));
    let today = row.percent_today();
    output.push_str(&format!(
        "  Sebelumnya {}   Hari ini {}\n",
        band_cell(row.prev_percent, StatusBand::from_percent(row.prev_percent)),
        band_cell(today, StatusBand::from_percent(today))
    ));
    output.push_str(&format!(
        "  Updated    {}\n",
        row.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output
}

/// Paginated progress table with the totals line and entry range
pub fn format_progress_page(page: &ProgressPage) -> String {
    let mut output = format!("{}\n{}\n\n", page.title, page.stamp);
    output.push_str(&format!(
        "{:>4}  {:<w$}  {:>13}  {:>6}  {:>13}  {:>10}  {:>10}\n",
        "No",
        "Satuan Kerja",
        "Pagu",
        "Paket",
        "Terumumkan",
        "Sblm %",
        "Hari ini %",
        w = NAME_WIDTH
    ));

    if page.rows.is_empty() {
        output.push_str("  (no matching OPD)\n");
    }
    for row in &page.rows {
        output.push_str(&format!(
            "{:>4}  {:<w$}  {:>13}  {:>6}  {:>13}  {:>10}  {:>10}\n",
            row.number,
            fit(&row.name.to_uppercase(), NAME_WIDTH),
            format_report_number(row.pagu_target),
            format_count(row.total_paket),
            format_report_number(row.total_pagu),
            band_cell(row.prev_percent, row.prev_band),
            band_cell(row.today_percent, row.today_band),
            w = NAME_WIDTH
        ));
    }

    let totals = &page.totals;
    output.push_str(&format!(
        "{:>4}  {:<w$}  {:>13}  {:>6}  {:>13}  {:>10}  {:>10}\n",
        "",
        "TOTAL PROVINSI",
        format_report_number(totals.pagu_target),
        format_report_number(totals.total_paket as f64),
        format_report_number(totals.total_pagu),
        band_cell(totals.average_prev_percent, totals.prev_band),
        band_cell(totals.today_percent, totals.today_band),
        w = NAME_WIDTH
    ));

    let p = &page.pagination;
    output.push_str(&format!(
        "\nMenampilkan {} sampai {} dari {} entri (halaman {}/{})\n",
        p.start_entry,
        p.end_entry,
        p.total_entries,
        p.page,
        p.total_pages.max(1)
    ));
    output.push_str("R <=50%  Y 51-99%  G 100%  B >100%\n");
    output
}

pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Total progres provinsi  {}\n\
         Pagu terumumkan         Rp {} Jt (target Rp {} Jt)\n\
         Total paket RUP         {}\n\
         Satker tuntas 100%      {} OPD\n\
         Progres di bawah 50%    {} OPD\n",
        format_percent(summary.average_percent),
        format_report_number(summary.total_pagu_terinput),
        format_report_number(summary.total_pagu_murni),
        format_report_number(summary.total_paket as f64),
        summary.completed.len(),
        summary.critical_count
    )
}

pub fn format_tv(tv: &TvView) -> String {
    let mut output = format!(
        "LIVE MONITORING SIRUP {} {}\n{}  {} {}\n\n",
        tv.region.to_uppercase(),
        tv.ta,
        tv.date_label,
        tv.clock,
        tv.timezone_label
    );
    output.push_str(&format_summary(&tv.summary));

    output.push_str("\nOPD INPUT 100%\n");
    if tv.summary.completed.is_empty() {
        output.push_str("  Belum ada OPD yang mencapai 100%\n");
    }
    for name in &tv.summary.completed {
        output.push_str(&format!("  * {}\n", name.to_uppercase()));
    }

    output.push('\n');
    for row in &tv.rows {
        output.push_str(&format!(
            "{:>4}  {:<w$}  Rp {:>13} Jt  {:>5}% {}\n",
            row.number,
            fit(&row.name.to_uppercase(), NAME_WIDTH),
            format_report_number(row.pagu_target),
            row.percent,
            row.band.marker(),
            w = NAME_WIDTH
        ));
    }

    if !tv.ticker.is_empty() {
        output.push_str("\nNEWS & UPDATES\n");
        for line in &tv.ticker {
            output.push_str(&format!("  - {}\n", line));
        }
    }
    output
}

pub fn format_news_list(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return "No news found".to_string();
    }

    let mut output = String::new();
    for item in news {
        output.push_str(&format!(
            "{}  {}  {}\n",
            item.id,
            item.date.format("%d-%m-%Y"),
            item.title
        ));
    }
    output
}

pub fn format_news_item(item: &NewsItem) -> String {
    format!(
        "{}\n{}\n\n{}\n",
        item.title,
        long_date(item.date),
        item.excerpt
    )
}

pub fn format_user_list(users: &[User]) -> String {
    let mut output = String::new();
    for user in users {
        output.push_str(&format!(
            "{:<32}  {:<16}  {:<8}  {}\n",
            user.id,
            user.username,
            user.role.to_string(),
            user.name
        ));
    }
    output
}

pub fn format_settings(settings: &SystemSettings) -> String {
    format!(
        "pejabat_nama = {}\npejabat_nip = {}\npejabat_jabatan = {}\nta = {}\n",
        settings.pejabat_nama, settings.pejabat_nip, settings.pejabat_jabatan, settings.ta
    )
}

pub fn format_config(config: &Config) -> String {
    format!(
        "region = {}\ncity = {}\ntimezone_label = {}\nutc_offset_hours = {}\n\
         page_size = {}\nlisten_addr = {}\ncontact.address = {}\ncontact.phone = {}\n\
         contact.email = {}\ncreated = {}\n",
        config.region,
        config.city,
        config.timezone_label,
        config.utc_offset_hours,
        config.page_size,
        config.listen_addr,
        config.contact.address,
        config.contact.phone,
        config.contact.email,
        config.created.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reports::{progress_page, ListingQuery};
    use crate::domain::{AppData, Role, Update};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> AppData {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let mut data = AppData::default();
        data.apply(
            Update::ReplaceOpds(vec![
                Opd::new("opd-001", "Dinas Pekerjaan Umum dan Penataan Ruang Provinsi", 2500.0),
                Opd::new("opd-002", "Biro Umum", 100.0),
            ]),
            now,
        )
        .unwrap();
        let mut row = data.progress_for("opd-002").unwrap().clone();
        row.set_channel(Channel::Penyedia, 2, 100.0);
        data.apply(Update::UpsertProgress(row), now).unwrap();
        data
    }

    #[test]
    fn test_fit_truncates_long_names() {
        assert_eq!(fit("Biro", 6), "Biro");
        assert_eq!(fit("Dinas Kesehatan", 6), "Dinas~");
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_opd_list(&[]), "No OPDs found");
        assert_eq!(format_news_list(&[]), "No news found");
    }

    #[test]
    fn test_format_opd_list() {
        let output = format_opd_list(&sample().opds);
        assert!(output.contains("opd-001"));
        assert!(output.contains("2.500"));
        assert!(output.contains("Dinas Pekerjaan Umum dan Penata~"));
    }

    #[test]
    fn test_format_progress_page() {
        let data = sample();
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let page = progress_page(
            &data,
            &Config::default(),
            &ListingQuery::default(),
            "REKAP".to_string(),
            now,
        );
        let output = format_progress_page(&page);

        assert!(output.starts_with("REKAP\nUPDATE 02 MARET 2026 - JAM : 08.00 WITA"));
        assert!(output.contains("BIRO UMUM"));
        assert!(output.contains("100,00 G"));
        assert!(output.contains("TOTAL PROVINSI"));
        assert!(output.contains("Menampilkan 1 sampai 2 dari 2 entri (halaman 1/1)"));
    }

    #[test]
    fn test_format_progress_row() {
        let data = sample();
        let output = format_progress_row(&data.opds[1], &data.progress[1]);
        assert!(output.contains("Biro Umum (opd-002)"));
        assert!(output.contains("Penyedia"));
        assert!(output.contains("Hari ini 100,00 G"));
    }

    #[test]
    fn test_format_progress_row_large_counts() {
        let data = sample();
        let mut row = data.progress[0].clone();
        row.set_channel(Channel::Penyedia, u32::MAX, 0.0);
        row.set_channel(Channel::Swakelola, u32::MAX, 0.0);
        let output = format_progress_row(&data.opds[0], &row);
        assert!(output.contains("paket 8.589.934.590"));
    }

    #[test]
    fn test_format_news_and_users() {
        let item = NewsItem::new(
            "Rapat",
            "Rapat koordinasi",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );
        assert!(format_news_list(std::slice::from_ref(&item)).contains("02-03-2026  Rapat"));
        assert!(format_news_item(&item).contains("02 Maret 2026"));

        let user = User::new("admin", "Administrator", Role::Admin, "pw");
        let output = format_user_list(&[user]);
        assert!(output.contains("admin"));
        assert!(!output.contains("pw"));
    }
}
