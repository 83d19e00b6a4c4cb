//! Configuration sources, added to the builder in precedence order.

pub mod dataset_file;
pub mod environment;
