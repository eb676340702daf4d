//! API Gateway feature compilers.
//!
//! Each compiler patches the shared template document in turn:
//!
//! ```text
//! RestApi → Deployment → Stage
//!    ↓          ↓          ↓
//!  RestApi  Deployment   Stage (+ LogGroup/LogsRole/Account when
//!           + endpoint     logging is enabled)
//!             output
//! ```
//!
//! The stage compiler is the only one that patches a resource emitted by
//! an earlier step: once it inserts a dedicated Stage resource, it
//! strips `StageName` from the Deployment resource so exactly one
//! resource owns the stage-name binding.

mod deployment;
mod rest_api;
mod stage;
mod tags;

pub use deployment::DeploymentCompiler;
pub use rest_api::RestApiCompiler;
pub use stage::{StageCompiler, StageSettings, StageTrigger};
pub use tags::{merge_tags, TagEntry};

use stackform_core::ResourceCompiler;

/// The gateway compilers in the order the pipeline driver runs them.
pub fn default_compilers() -> Vec<Box<dyn ResourceCompiler>> {
    vec![
        Box::new(RestApiCompiler),
        Box::new(DeploymentCompiler),
        Box::new(StageCompiler),
    ]
}
