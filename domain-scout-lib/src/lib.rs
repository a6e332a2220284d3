//! # Domain Scout Library
//!
//! A library for checking domain availability using DNS probes with a WHOIS fallback.
//!
//! Checks run in two stages: a DNS probe over A, NS and MX records settles
//! clearly taken domains without leaving the resolver, and a whois lookup
//! classifies everything else. Batches run sequentially with a fixed delay
//! between checks, and results always come back in input order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::DomainChecker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = DomainChecker::new();
//!     let result = checker.check_domain("example.com").await;
//!
//!     println!("{} is {}", result.domain, result.available);
//! }
//! ```
//!
//! ## Features
//!
//! - **DNS First**: A, NS and MX probes settle taken domains quickly
//! - **WHOIS Fallback**: subprocess lookup for anything DNS leaves open
//! - **Deterministic Order**: results arrive in the same order as inputs
//! - **Rate Limited**: fixed delay after every check, batch and stream alike
//! - **Configurable**: TLD presets, config files, environment variables

// Re-export main public API types and functions
// This makes them available as domain_scout_lib::TypeName
pub use checker::DomainChecker;
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::DomainScoutError;
pub use presets::{get_available_presets, get_preset_tlds, get_preset_tlds_with_custom};
pub use protocols::{
    classify_whois_output, is_whois_available, DnsProber, ProbeOutcome, WhoisClient, WhoisVerdict,
    WHOIS_FREE_PHRASES, WHOIS_TAKEN_PHRASES,
};
pub use types::{
    Availability, CheckConfig, CheckMethod, CheckResult, ProbeRecord, DNS_PROBE_ORDER,
};
pub use utils::expand_domain_inputs;

// Internal modules - these are not part of the public API
mod checker;
mod config;
mod error;
mod presets;
mod protocols;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainScoutError>;

// Library version for display purposes
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
