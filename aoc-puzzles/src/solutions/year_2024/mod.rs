pub mod day_11;
pub mod day_13;
pub mod day_16;
pub mod day_17;
