//! Directory-rooted persistence for JSON records and CSV row sets, plus
//! descriptive statistics over number sequences.

pub mod error;
pub mod report;
pub mod stats;
pub mod store;

pub use error::StoreError;
pub use report::{LogReporter, Reporter, Severity};
pub use stats::{summarize, Summary};
pub use store::{DataStore, Row};
