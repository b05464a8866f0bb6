//! Library side of the rostermerge CLI: logging setup and the merge and
//! check pipelines.

pub mod logging;
pub mod pipeline;
pub mod types;
