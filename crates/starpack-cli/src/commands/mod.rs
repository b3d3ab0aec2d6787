pub mod align;
pub mod config;
pub mod pipeline;
pub mod stack;
pub mod starmap;
