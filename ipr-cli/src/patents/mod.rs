//! Patent portfolio domain: records, payments and the views built over them

pub mod edit;
pub mod filter;
pub mod renewals;
pub mod stats;
pub mod status;
pub mod types;

pub use edit::PatentEdit;
pub use filter::{DateCriterion, DateField, DueWindow, PatentFilter};
pub use renewals::{RenewalAlert, days_until, due_within, renewal_alert, render_renewal_table};
pub use stats::PortfolioStats;
pub use status::StatusCategory;
pub use types::{
    CellValue, DEFAULT_STATUS, IPINDIA_PUBLIC_SEARCH_URL, NewPayment, Patent, PatentRecord,
    RawMetadata, RenewalPayment,
};
