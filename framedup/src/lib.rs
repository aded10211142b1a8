pub mod dedup;
pub mod frames;
pub mod grouping;
pub mod output;
pub mod pipeline;
pub mod timestamp;
