/// CSV export of sizing results.
pub mod export;
