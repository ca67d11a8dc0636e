//! Risk scoring and population simulation for broker portfolio analytics.
//!
//! The crate synthesizes per-segment populations of brokers as 100-bin score
//! histograms, scores individual entities from fifteen business inputs,
//! simulates how named improvement measures reshape a population under
//! diminishing returns, and aggregates business KPIs over the result. All
//! randomness flows through injectable seeded RNGs; there is no global state.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod generator;
pub mod measures;
pub mod profiles;
pub mod score;
pub mod stats;
pub mod types;
