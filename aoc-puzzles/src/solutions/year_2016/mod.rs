pub mod assembunny;
pub mod day_1;
pub mod day_12;
pub mod day_13;
pub mod day_17;
pub mod day_23;
pub mod day_25;
