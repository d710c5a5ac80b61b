mod strategy;
mod summary;
mod value_objects;

#[cfg(test)]
mod summary_test;
#[cfg(test)]
mod value_objects_test;

pub use strategy::{CheckinStrategy, StrategyError, StrategyFactory, StrategyKind};
pub use summary::{RunStatus, RunSummary, TopicOutcome};
pub use value_objects::{CheckinOutcome, CheckinStatus, Topic};
