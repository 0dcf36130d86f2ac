pub mod expression;
pub mod fitness;

pub use expression::{evaluate, predict};
pub use fitness::{fitness, mean_squared_error, median, DEFAULT_COMPLEXITY_EXPONENT};
