pub mod health;
pub mod instruments;
pub mod prediction;
pub mod reports;
pub mod sessions;
