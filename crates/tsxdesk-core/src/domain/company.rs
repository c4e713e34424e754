use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Ticker;

/// Field names the front ends read from a company record.
///
/// The names are the provider's own keys and are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    LongName,
    Sector,
    Industry,
    Exchange,
    Website,
    LongBusinessSummary,
    MarketCap,
    TrailingPe,
    PegRatio,
    PriceToBook,
    ForwardPe,
    CurrentPrice,
    FiftyTwoWeekHigh,
    FiftyTwoWeekLow,
    ReturnOnEquity,
    ReturnOnAssets,
    ProfitMargins,
    TotalRevenue,
    GrossProfits,
    NetIncomeToCommon,
    TotalDebt,
    CurrentRatio,
    DebtToEquity,
    RecommendationKey,
    TargetMeanPrice,
    TargetHighPrice,
    TargetLowPrice,
    DividendYield,
    DividendRate,
    PayoutRatio,
}

impl CompanyField {
    pub const ALL: [Self; 30] = [
        Self::LongName,
        Self::Sector,
        Self::Industry,
        Self::Exchange,
        Self::Website,
        Self::LongBusinessSummary,
        Self::MarketCap,
        Self::TrailingPe,
        Self::PegRatio,
        Self::PriceToBook,
        Self::ForwardPe,
        Self::CurrentPrice,
        Self::FiftyTwoWeekHigh,
        Self::FiftyTwoWeekLow,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::ProfitMargins,
        Self::TotalRevenue,
        Self::GrossProfits,
        Self::NetIncomeToCommon,
        Self::TotalDebt,
        Self::CurrentRatio,
        Self::DebtToEquity,
        Self::RecommendationKey,
        Self::TargetMeanPrice,
        Self::TargetHighPrice,
        Self::TargetLowPrice,
        Self::DividendYield,
        Self::DividendRate,
        Self::PayoutRatio,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LongName => "longName",
            Self::Sector => "sector",
            Self::Industry => "industry",
            Self::Exchange => "exchange",
            Self::Website => "website",
            Self::LongBusinessSummary => "longBusinessSummary",
            Self::MarketCap => "marketCap",
            Self::TrailingPe => "trailingPE",
            Self::PegRatio => "pegRatio",
            Self::PriceToBook => "priceToBook",
            Self::ForwardPe => "forwardPE",
            Self::CurrentPrice => "currentPrice",
            Self::FiftyTwoWeekHigh => "fiftyTwoWeekHigh",
            Self::FiftyTwoWeekLow => "fiftyTwoWeekLow",
            Self::ReturnOnEquity => "returnOnEquity",
            Self::ReturnOnAssets => "returnOnAssets",
            Self::ProfitMargins => "profitMargins",
            Self::TotalRevenue => "totalRevenue",
            Self::GrossProfits => "grossProfits",
            Self::NetIncomeToCommon => "netIncomeToCommon",
            Self::TotalDebt => "totalDebt",
            Self::CurrentRatio => "currentRatio",
            Self::DebtToEquity => "debtToEquity",
            Self::RecommendationKey => "recommendationKey",
            Self::TargetMeanPrice => "targetMeanPrice",
            Self::TargetHighPrice => "targetHighPrice",
            Self::TargetLowPrice => "targetLowPrice",
            Self::DividendYield => "dividendYield",
            Self::DividendRate => "dividendRate",
            Self::PayoutRatio => "payoutRatio",
        }
    }
}

impl AsRef<str> for CompanyField {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for CompanyField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single provider value. Absent fields are simply missing from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Numeric view; text, flags and non-finite numbers read as absent.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Flat company/financial record returned by a provider for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub ticker: Ticker,
    pub fields: BTreeMap<String, FieldValue>,
}

impl CompanyInfo {
    pub fn new(ticker: Ticker, fields: BTreeMap<String, FieldValue>) -> Self {
        Self { ticker, fields }
    }

    /// A record with every field absent.
    pub fn empty(ticker: Ticker) -> Self {
        Self::new(ticker, BTreeMap::new())
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, field: impl AsRef<str>) -> Option<&FieldValue> {
        self.fields.get(field.as_ref())
    }

    pub fn number(&self, field: impl AsRef<str>) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    pub fn text(&self, field: impl AsRef<str>) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
