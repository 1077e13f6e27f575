pub mod orchestration;

pub use orchestration::{run_release_scope, ReleaseScope, ScopeWorkflowArgs};
