pub mod day_1;
pub mod day_12;
pub mod day_18;
pub mod day_24;
pub mod day_3;
pub mod day_8;
