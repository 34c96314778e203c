mod install;
mod plan;

pub use install::cmd_install;
pub use plan::cmd_plan;
