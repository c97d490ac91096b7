#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fiscal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for fetched rows and resolved statements.
//!
//! This crate provides implementations of the [`MetricsCache`] trait from `fiscal-core`:
//!
//! - [`InMemoryCache`] - In-memory cache with TTL-based invalidation
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use fiscal_core::{CacheStatus, MetricsCache};

pub use memory::InMemoryCache;
pub use noop::NoopCache;
