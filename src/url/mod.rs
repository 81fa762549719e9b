//! URL handling module for kb-harvest
//!
//! Every task URL passes through [`validate_task_url`] before the scheduler
//! hands it to a worker.

mod normalize;

pub use normalize::validate_task_url;
