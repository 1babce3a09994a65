pub mod clock;
pub mod frames;
pub mod platform;
pub mod scroll;
