mod event;
mod house;
pub mod points_policy;
mod result;

pub use event::Event;
pub use house::House;
pub use points_policy::{PointsPolicy, PolicySource, ResolvedPolicy};
pub use result::EventResult;
