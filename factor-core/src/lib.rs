//! Domain types and pure logic behind the factorlab UI: deriving the
//! portfolio mapping from editable rows, validating a model run, the run
//! lifecycle the submit flow mirrors, trailing moving averages for the
//! result charts, and the numeric formatting the result tables rely on.
//!
//! Everything here compiles natively and carries the unit-test weight; the
//! `ui` and `chart-render` crates stay thin over it.

pub mod catalog;
pub mod format;
pub mod model;
pub mod portfolio;
pub mod run;
pub mod series;
pub mod validate;

pub use catalog::Security;
pub use model::{
    FactorCoefficient, FactorDef, LineSeriesData, ModelResult, ModelStats, R2Chart,
    RunModelRequest, ScatterSeries, FACTORS,
};
pub use portfolio::{build_portfolio, PortfolioRow, PortfolioSummary, Preset, WeightBalance};
pub use run::{RunController, RunPhase};
pub use validate::ValidationError;
