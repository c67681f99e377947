pub mod classifier;
pub mod engine;
pub mod outcome;
pub mod similarity;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;


pub use engine::LinkResolver;
pub use outcome::ResolveOutcome;
pub use source::{PostSource, PostStream};
