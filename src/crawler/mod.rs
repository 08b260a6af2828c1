//! Crawl orchestration: builder, two-phase crawler, and run report.
//!
//! This module owns the pipeline: [`CrawlerBuilder`] assembles a run,
//! [`Crawler`] executes its two phases (sequential listing resolution, then
//! the bounded download pool), and [`CrawlReport`] with its [`FailureSet`]
//! carries the outcome back to the caller.

pub mod builder;
pub mod crawler;
pub mod report;

pub use builder::CrawlerBuilder;
pub use crawler::Crawler;
pub use report::{CrawlReport, FailureSet};
