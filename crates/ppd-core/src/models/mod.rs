pub mod demographics;
pub mod features;
pub mod outcome;
pub mod risk;
pub mod score;
