#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod config;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod tui;
