pub mod events;
pub mod houses;
pub mod results;
pub mod standings;
pub mod store;
