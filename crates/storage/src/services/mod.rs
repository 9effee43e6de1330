pub mod seed;
pub mod standings;
