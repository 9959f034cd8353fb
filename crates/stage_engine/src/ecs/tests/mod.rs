//! Cross-entity lifecycle scenarios

mod indexing;
mod lifecycle_scenarios;
