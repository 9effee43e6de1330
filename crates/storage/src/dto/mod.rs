pub mod event;
pub mod house;
pub mod result;
pub mod standings;
