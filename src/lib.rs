pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::ImportConfig;
pub use crate::core::{
    engine::{ImportEngine, ImportReport},
    importer::MemberImporter,
    user_service::HttpUserService,
};
pub use crate::utils::error::{ImportError, Result};
