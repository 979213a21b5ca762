//! Real-time throughput and latency monitor for a single HTTP endpoint.
//!
//! A fixed pool of worker threads issues blocking requests back-to-back and
//! records each outcome into shared state; a reporter thread drains that state
//! once a second and prints latency quartiles, throughput, recommendation rate
//! and error count.

pub mod config;
pub mod control;
pub mod monitor;
pub mod reporter;
pub mod signals;
pub mod stats;
pub mod worker;

pub use config::MonitorConfig;
pub use monitor::{Monitor, MonitorSummary};
pub use reporter::Signal;
