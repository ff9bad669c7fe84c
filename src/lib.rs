pub mod cli;
pub mod config;
pub mod core;
pub mod loaders;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod types;
