//! Protocol implementations for domain availability checking.
//!
//! This module contains the two probes the checker runs in order:
//! DNS resolution first, then a whois lookup for anything DNS
//! could not settle.

/// DNS record probing
pub mod dns;

/// WHOIS subprocess implementation
pub mod whois;

// Re-export commonly used functions and types
pub use dns::{DnsProber, ProbeOutcome};
pub use whois::{
    classify_whois_output, is_whois_available, WhoisClient, WhoisVerdict, WHOIS_FREE_PHRASES,
    WHOIS_TAKEN_PHRASES,
};
