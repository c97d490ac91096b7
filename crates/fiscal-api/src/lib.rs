#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fiscal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! HTTP source of financial rows.
//!
//! # Example
//!
//! ```no_run
//! use fiscal_api::{ClientConfig, FinancialsClient};
//! use fiscal_core::{FinancialRowSource, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FinancialsClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     let rows = client.fetch_annual_rows(&Symbol::new("AAPL")).await?;
//!     for row in rows {
//!         println!("{} {}", row.ticker, row.year);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Rate-limited HTTP client.
pub mod client;
/// Client configuration.
pub mod config;

pub use client::{FinancialsClient, RemoteCacheState, RemoteCacheStatus};
pub use config::ClientConfig;
