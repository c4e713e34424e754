//! Domain types shared by the fetchers, the exporter and the front ends.

mod company;
mod ticker;

pub use company::{CompanyField, CompanyInfo, FieldValue};
pub use ticker::Ticker;
