mod commands;
mod environment;
mod paths;

pub use commands::HideWindow;
pub use environment::{HostContext, TargetPlatform};
pub use paths::{AppPaths, AppPathsError};
