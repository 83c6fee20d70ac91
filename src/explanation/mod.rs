pub mod types;
pub mod generator;
pub mod formatters;

pub use types::{Explanation, ScoreTier};
pub use generator::{ExplanationGenerator, DETAIL_SEPARATOR};
pub use formatters::{JsonFormatter, MarkdownFormatter};
