//! Company report grouped into the four display tabs.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::format::{
    format_magnitude, format_percent, format_price, format_ratio, format_text, truncate_summary,
    with_currency, NOT_AVAILABLE,
};
use crate::{CompanyField, CompanyInfo, Ticker};

/// Business summaries are cut to this many characters.
pub const SUMMARY_MAX_CHARS: usize = 500;

const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: &'static str,
    pub value: String,
}

impl ReportLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: &'static str,
    pub lines: Vec<ReportLine>,
}

impl ReportSection {
    pub fn new(title: &'static str, lines: Vec<ReportLine>) -> Self {
        Self { title, lines }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// Formatted view over one [`CompanyInfo`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyReport {
    pub ticker: Ticker,
    pub sections: Vec<ReportSection>,
}

impl CompanyReport {
    pub fn from_info(info: &CompanyInfo) -> Self {
        Self {
            ticker: info.ticker.clone(),
            sections: vec![
                company_section(info),
                market_section(info),
                financial_section(info),
                analysis_section(info),
            ],
        }
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title == title)
    }
}

impl Display for CompanyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_sections(f, &self.sections)
    }
}

/// Shared plain-text layout for report-like section lists.
pub(crate) fn write_sections(
    f: &mut Formatter<'_>,
    sections: &[ReportSection],
) -> std::fmt::Result {
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            writeln!(f)?;
        }
        writeln!(f, "== {} ==", section.title)?;

        let width = section
            .lines
            .iter()
            .map(|line| line.label.len())
            .max()
            .unwrap_or(0);
        for line in &section.lines {
            let label = format!("{}:", line.label);
            writeln!(f, "{label:<pad$}  {}", line.value, pad = width + 1)?;
        }
    }
    Ok(())
}

fn money_magnitude(info: &CompanyInfo, field: CompanyField) -> String {
    with_currency(format_magnitude(info.number(field)))
}

fn money_price(info: &CompanyInfo, field: CompanyField) -> String {
    with_currency(format_price(info.number(field)))
}

fn text(info: &CompanyInfo, field: CompanyField) -> String {
    format_text(info.text(field))
}

fn company_section(info: &CompanyInfo) -> ReportSection {
    let summary = match info.text(CompanyField::LongBusinessSummary) {
        Some(summary) if !summary.trim().is_empty() => {
            truncate_summary(summary.trim(), SUMMARY_MAX_CHARS)
        }
        _ => NO_DESCRIPTION.to_owned(),
    };

    ReportSection::new(
        "Company",
        vec![
            ReportLine::new(
                "Company",
                format!("{} ({})", text(info, CompanyField::LongName), info.ticker),
            ),
            ReportLine::new("Sector", text(info, CompanyField::Sector)),
            ReportLine::new("Industry", text(info, CompanyField::Industry)),
            ReportLine::new("Exchange", text(info, CompanyField::Exchange)),
            ReportLine::new("Website", text(info, CompanyField::Website)),
            ReportLine::new("Business Summary", summary),
        ],
    )
}

fn market_section(info: &CompanyInfo) -> ReportSection {
    let ratio = |field: CompanyField| format_ratio(info.number(field));

    ReportSection::new(
        "Market",
        vec![
            ReportLine::new("Market Cap", money_magnitude(info, CompanyField::MarketCap)),
            ReportLine::new("P/E Ratio (TTM)", ratio(CompanyField::TrailingPe)),
            ReportLine::new("PEG Ratio", ratio(CompanyField::PegRatio)),
            ReportLine::new("Price to Book", ratio(CompanyField::PriceToBook)),
            ReportLine::new("Forward P/E", ratio(CompanyField::ForwardPe)),
            ReportLine::new("Current Price", money_price(info, CompanyField::CurrentPrice)),
            ReportLine::new("52-Week High", money_price(info, CompanyField::FiftyTwoWeekHigh)),
            ReportLine::new("52-Week Low", money_price(info, CompanyField::FiftyTwoWeekLow)),
        ],
    )
}

fn financial_section(info: &CompanyInfo) -> ReportSection {
    let percent = |field: CompanyField| format_percent(info.number(field));
    let ratio = |field: CompanyField| format_ratio(info.number(field));

    ReportSection::new(
        "Financial",
        vec![
            ReportLine::new("ROE", percent(CompanyField::ReturnOnEquity)),
            ReportLine::new("ROA", percent(CompanyField::ReturnOnAssets)),
            ReportLine::new("Profit Margin", percent(CompanyField::ProfitMargins)),
            ReportLine::new("Revenue (TTM)", money_magnitude(info, CompanyField::TotalRevenue)),
            ReportLine::new("Gross Profit", money_magnitude(info, CompanyField::GrossProfits)),
            ReportLine::new("Net Income", money_magnitude(info, CompanyField::NetIncomeToCommon)),
            ReportLine::new("Total Debt", money_magnitude(info, CompanyField::TotalDebt)),
            ReportLine::new("Current Ratio", ratio(CompanyField::CurrentRatio)),
            ReportLine::new("Debt to Equity", ratio(CompanyField::DebtToEquity)),
        ],
    )
}

fn analysis_section(info: &CompanyInfo) -> ReportSection {
    let recommendation = info
        .text(CompanyField::RecommendationKey)
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let percent = |field: CompanyField| format_percent(info.number(field));

    ReportSection::new(
        "Analysis",
        vec![
            ReportLine::new("Recommendation", recommendation),
            ReportLine::new("Target Mean Price", money_price(info, CompanyField::TargetMeanPrice)),
            ReportLine::new("Target High Price", money_price(info, CompanyField::TargetHighPrice)),
            ReportLine::new("Target Low Price", money_price(info, CompanyField::TargetLowPrice)),
            ReportLine::new("Dividend Yield", percent(CompanyField::DividendYield)),
            ReportLine::new("Dividend Rate", money_price(info, CompanyField::DividendRate)),
            ReportLine::new("Payout Ratio", percent(CompanyField::PayoutRatio)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    fn ticker() -> Ticker {
        Ticker::parse("ry.to").expect("valid ticker")
    }

    fn sample() -> CompanyInfo {
        CompanyInfo::empty(ticker())
            .with_field("longName", FieldValue::Text("Royal Bank of Canada".into()))
            .with_field("sector", FieldValue::Text("Financial Services".into()))
            .with_field("marketCap", FieldValue::Number(1.9e11))
            .with_field("trailingPE", FieldValue::Number(12.5))
            .with_field("currentPrice", FieldValue::Number(140.0))
            .with_field("returnOnEquity", FieldValue::Number(0.1534))
            .with_field("totalRevenue", FieldValue::Number(5.6e10))
            .with_field("recommendationKey", FieldValue::Text("strong_buy".into()))
            .with_field("dividendYield", FieldValue::Number(0.04))
    }

    #[test]
    fn sections_follow_tab_order() {
        let report = CompanyReport::from_info(&sample());
        let titles = report
            .sections
            .iter()
            .map(|section| section.title)
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Company", "Market", "Financial", "Analysis"]);
    }

    #[test]
    fn present_values_are_formatted() {
        let report = CompanyReport::from_info(&sample());

        let company = report.section("Company").expect("company tab");
        assert_eq!(company.value("Company"), Some("Royal Bank of Canada (RY.TO)"));
        assert_eq!(company.value("Business Summary"), Some("No description available"));

        let market = report.section("Market").expect("market tab");
        assert_eq!(market.value("Market Cap"), Some("$190.00B"));
        assert_eq!(market.value("P/E Ratio (TTM)"), Some("12.50"));
        assert_eq!(market.value("Current Price"), Some("$140.00"));

        let financial = report.section("Financial").expect("financial tab");
        assert_eq!(financial.value("ROE"), Some("15.34%"));
        assert_eq!(financial.value("Revenue (TTM)"), Some("$56.00B"));

        let analysis = report.section("Analysis").expect("analysis tab");
        assert_eq!(analysis.value("Recommendation"), Some("STRONG_BUY"));
        assert_eq!(analysis.value("Dividend Yield"), Some("4.00%"));
    }

    #[test]
    fn absent_values_never_get_currency_prefix() {
        let report = CompanyReport::from_info(&CompanyInfo::empty(ticker()));

        for section in &report.sections {
            for line in &section.lines {
                assert!(!line.value.contains("$N/A"), "{}: {}", line.label, line.value);
            }
        }
        let market = report.section("Market").expect("market tab");
        assert_eq!(market.value("Market Cap"), Some("N/A"));
        assert_eq!(
            report.section("Company").and_then(|s| s.value("Company")),
            Some("N/A (RY.TO)")
        );
    }

    #[test]
    fn long_summary_is_truncated() {
        let info = CompanyInfo::empty(ticker())
            .with_field("longBusinessSummary", FieldValue::Text("x".repeat(600)));
        let report = CompanyReport::from_info(&info);
        let summary = report
            .section("Company")
            .and_then(|section| section.value("Business Summary"))
            .expect("summary line");

        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn renders_plain_text() {
        let text = CompanyReport::from_info(&sample()).to_string();
        assert!(text.starts_with("== Company ==\n"));
        assert!(text.contains("== Analysis =="));
        assert!(text.contains("Market Cap:"));
        assert!(text.contains("$190.00B"));
    }
}
