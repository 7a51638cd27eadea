mod aggregator;
mod builder;
mod map_lifecycle;
mod menu_throttle;
mod tracker;


pub use aggregator::*;
pub use builder::*;
pub use map_lifecycle::*;
pub use menu_throttle::*;
pub use tracker::*;
