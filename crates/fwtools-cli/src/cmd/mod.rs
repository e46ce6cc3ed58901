pub mod cut;
pub mod merge;
pub mod swap;
