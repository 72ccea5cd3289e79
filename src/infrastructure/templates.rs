//! HTML rendering with embedded minijinja templates

use crate::domain::format::{format_percent, format_report_decimal, format_report_number, long_date};
use crate::error::Result;
use chrono::NaiveDate;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("macros.html", include_str!("../../templates/macros.html")),
    ("recap.html", include_str!("../../templates/recap.html")),
    ("report.html", include_str!("../../templates/report.html")),
    ("tv.html", include_str!("../../templates/tv.html")),
    ("news.html", include_str!("../../templates/news.html")),
    ("news_detail.html", include_str!("../../templates/news_detail.html")),
    ("contact.html", include_str!("../../templates/contact.html")),
];

/// Template environment shared by the CLI export and the web server
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        env.add_filter("num", format_report_number);
        env.add_filter("dec", format_report_decimal);
        env.add_filter("pct", format_percent);
        // ISO date -> "19 Oktober 2026"; anything else is shown as is
        env.add_filter("tanggal", |value: String| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map(long_date)
                .unwrap_or(value)
        });

        Ok(Renderer { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}
