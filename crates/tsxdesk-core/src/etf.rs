//! ETF overview and the "strong ETF" screen.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::format::{
    format_count, format_magnitude, format_percent, format_price, format_ratio, format_text,
    with_currency,
};
use crate::report::{write_sections, ReportLine, ReportSection};
use crate::{CompanyInfo, Ticker};

pub const MAX_EXPENSE_RATIO: f64 = 0.2;
pub const MIN_TOTAL_ASSETS: f64 = 1_000_000_000.0;
pub const MIN_OVERALL_RATING: f64 = 4.0;

/// Yahoo reports fund fees as `defaultKeyStatistics.annualReportExpenseRatio`;
/// `expenseRatio` is accepted from providers that use the shorter name.
fn expense_ratio(info: &CompanyInfo) -> Option<f64> {
    info.number("annualReportExpenseRatio").or_else(|| info.number("expenseRatio"))
}

/// Sectioned ETF view over a provider record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtfReport {
    pub ticker: Ticker,
    pub name: String,
    pub sections: Vec<ReportSection>,
}

impl EtfReport {
    pub fn from_info(info: &CompanyInfo) -> Self {
        let text = |field: &str| format_text(info.text(field));
        let price = |field: &str| with_currency(format_price(info.number(field)));
        let ratio = |field: &str| format_ratio(info.number(field));
        let count = |field: &str| format_count(info.number(field));

        let line = |label: &'static str, value: String| ReportLine { label, value };

        let sections = vec![
            ReportSection::new(
                "Overview",
                vec![
                    line("Fund Family", text("fundFamily")),
                    line("Category", text("category")),
                    line("Exchange", text("exchange")),
                ],
            ),
            ReportSection::new(
                "Price & Performance",
                vec![
                    line("Current Price", price("currentPrice")),
                    line("52-Week High", price("fiftyTwoWeekHigh")),
                    line("52-Week Low", price("fiftyTwoWeekLow")),
                    line("1y Return", format_percent(info.number("yield"))),
                ],
            ),
            ReportSection::new(
                "Fees & Yield",
                vec![
                    line("Expense Ratio", format_percent(expense_ratio(info))),
                    line("Dividend Yield", format_percent(info.number("dividendYield"))),
                    line("Annual Dividend", price("dividendRate")),
                ],
            ),
            ReportSection::new(
                "Risk & Volatility",
                vec![
                    line("Beta", ratio("beta")),
                    line("Morningstar Risk Rating", count("morningStarRiskRating")),
                    line("Morningstar Overall Rating", count("morningStarOverallRating")),
                ],
            ),
            ReportSection::new(
                "Fund Size & Liquidity",
                vec![
                    line(
                        "AUM",
                        with_currency(format_magnitude(info.number("totalAssets"))),
                    ),
                    line("Volume", count("volume")),
                    line("Average Volume", count("averageVolume")),
                ],
            ),
        ];

        Self {
            ticker: info.ticker.clone(),
            name: text("longName"),
            sections,
        }
    }
}

impl Display for EtfReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.ticker)?;
        writeln!(f)?;
        write_sections(f, &self.sections)
    }
}

/// Outcome of [`screen_etf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum EtfVerdict {
    /// Low fees, large fund, highly rated.
    Strong,
    /// At least one criterion failed or could not be checked.
    NeedsReview { issues: Vec<String> },
}

impl EtfVerdict {
    pub const fn is_strong(&self) -> bool {
        matches!(self, Self::Strong)
    }
}

impl Display for EtfVerdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong => f.write_str(
                "This ETF looks strong based on low fees, high AUM, and performance.",
            ),
            Self::NeedsReview { issues } => {
                f.write_str("This ETF may not meet best-in-class criteria. Investigate further.")?;
                for issue in issues {
                    write!(f, "\n  - {issue}")?;
                }
                Ok(())
            }
        }
    }
}

/// Check expense ratio, fund size and Morningstar rating against fixed bars.
pub fn screen_etf(info: &CompanyInfo) -> EtfVerdict {
    let mut issues = Vec::new();

    match expense_ratio(info) {
        Some(ratio) if ratio < MAX_EXPENSE_RATIO => {}
        Some(ratio) => issues.push(format!(
            "expense ratio {ratio} is not below {MAX_EXPENSE_RATIO}"
        )),
        None => issues.push(String::from("expense ratio is absent")),
    }

    match info.number("totalAssets") {
        Some(assets) if assets > MIN_TOTAL_ASSETS => {}
        Some(assets) => issues.push(format!(
            "totalAssets {} does not exceed {}",
            format_magnitude(Some(assets)),
            format_magnitude(Some(MIN_TOTAL_ASSETS))
        )),
        None => issues.push(String::from("totalAssets is absent")),
    }

    match info.number("morningStarOverallRating") {
        Some(rating) if rating >= MIN_OVERALL_RATING => {}
        Some(rating) => issues.push(format!(
            "morningStarOverallRating {rating} is below {MIN_OVERALL_RATING}"
        )),
        None => issues.push(String::from("morningStarOverallRating is absent")),
    }

    if issues.is_empty() {
        EtfVerdict::Strong
    } else {
        EtfVerdict::NeedsReview { issues }
    }
}
