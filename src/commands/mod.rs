//! Command implementations for the `posturemap` binary.
//!
//! - **assess**: run snapshot files through the assessment engine
//! - **init**: write a default `.posturemap.toml`

pub mod assess;
pub mod init;

pub use assess::{handle_assess, AssessConfig};
pub use init::init_config;
