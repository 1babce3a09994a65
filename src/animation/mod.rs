pub mod cue;
pub mod ease;
pub mod look;
pub mod typed;
