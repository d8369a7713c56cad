pub mod config;
pub mod engine;
pub mod error;
pub mod sampler;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::InterpretError;
