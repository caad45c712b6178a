pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod generate;
pub mod matcher;
pub mod pacing;
pub mod query;
pub mod report;
pub mod resolve;
pub mod types;

pub use auth::AuthClient;
pub use client::IgdbClient;
pub use config::{ClientCredentials, IgdbConfig, IgdbFileConfig, config_path};
pub use credentials::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{GenerateAborted, IgdbError};
pub use generate::{GenerateEvent, GenerateOptions, Generator};
pub use matcher::{MatchResult, best_match, similarity};
pub use pacing::{Pacer, PacingOptions, TokioPacer, sample_delay};
pub use query::Query;
pub use report::{EntryReport, GenerateReport, ReportSummary};
pub use resolve::MetadataSource;
pub use types::{GameRecord, SearchCandidate};
