//! Tracklab: Music-Track Statistical Analysis Library
//!
//! A library for analyzing tabular music-track datasets: deriving ordinal
//! band features from continuous measures and running a fixed battery of
//! hypothesis tests (correlation, one-way ANOVA with post-hoc ranking, and
//! goodness-of-fit to a normal distribution).

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
