pub mod config;
pub mod error;
pub mod types;

pub use config::VitalsConfig;
pub use error::{Result, VitalsError};
pub use types::*;
