//! Shared vocabulary for signalscope: the closed set of OSINT sections, the
//! status and confidence taxonomies, typed signal profiles as delivered by the
//! collectors, and application configuration.

pub mod app_config;
pub mod cohorts;
pub mod config;
pub mod profile;
pub mod section;

pub use app_config::{AppConfig, Environment};
pub use cohorts::{load_cohorts, CohortRecord, CohortsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{
    is_truthy, AdsData, CompanyInfo, HiringData, JobResult, JobStatus, ReviewsData, SeoData,
    SignalProfile, SocialData, SocialPlatform, TechStackData, WebData, WebMeta,
};
pub use section::{Confidence, DataStatus, Section};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read cohorts file {path}: {source}")]
    CohortsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cohorts file: {0}")]
    CohortsFileParse(#[source] serde_yaml::Error),

    #[error("cohort validation failed: {0}")]
    Validation(String),
}
