pub mod config;
pub mod text;
pub mod types;

pub use config::Config;
pub use types::{PostRecord, ScrapedPost};
