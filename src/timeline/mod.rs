pub mod phase;
pub mod track;
