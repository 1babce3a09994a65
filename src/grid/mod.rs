pub mod cells;
pub mod word;
