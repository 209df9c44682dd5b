//! Resume analysis: keyword extraction, scoring and suggestions

pub mod knowledge;
pub mod matcher;
pub mod keywords;
pub mod scorer;
pub mod suggestions;
pub mod analyzer;
