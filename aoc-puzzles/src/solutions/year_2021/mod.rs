pub mod day_15;
pub mod day_17;
pub mod day_21;
