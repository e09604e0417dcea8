pub mod constants;
pub mod keys;
pub mod render;
pub mod terminal;
