mod cluster;
mod common;

pub use cluster::cluster_prompt;
pub use common::*;
