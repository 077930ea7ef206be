pub mod error;
pub mod matrix;
pub mod model;
pub mod regressor;
