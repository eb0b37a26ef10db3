pub mod sm2;

pub use sm2::{calculate_sm2, process_result, Sm2Result, DEFAULT_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR};
