pub mod config;
pub mod crossover;
pub mod error;
pub mod lag;
pub mod momentum;
pub mod moving_average;
pub mod pipeline;
pub mod target;
