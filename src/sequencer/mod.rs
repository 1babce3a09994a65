pub mod backdrop;
pub mod config;
pub mod machine;
pub mod trace;
