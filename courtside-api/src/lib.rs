//! Client for the NBA statistics API and the pipeline sources built on it.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod parse;
pub mod sources;

pub use client::StatsClient;
pub use error::ApiError;
pub use sources::{
    BoxscoreFetcher, GameLogScope, PlayerInfoFetcher, ScheduleFetcher, TableSource,
    TeamInfoFetcher,
};
