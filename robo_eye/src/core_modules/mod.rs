pub mod color;
pub mod detection;
pub mod direction_advisor;
pub mod navigation;
pub mod point;
pub mod snapshot;
pub mod target;
