//! Core data types for domain availability screening.
//!
//! This module defines the result record produced by every check, the
//! tri-state availability value, the closed set of provenance tags, and the
//! configuration struct consumed by the checker.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::time::Duration;

/// Result of a single domain availability check.
///
/// One of these is produced for every domain handed to the checker, exactly
/// once, and is never mutated afterward. Serializes to
/// `{"domain": ..., "available": true|false|null, "method": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The fully qualified domain that was checked (e.g., "example.com")
    pub domain: String,

    /// Tri-state verdict. Serialized as `true`, `false`, or `null`.
    pub available: Availability,

    /// Which signal produced the verdict (see [`CheckMethod`])
    pub method: CheckMethod,
}

impl CheckResult {
    /// Build a taken verdict with the signal that proved registration.
    pub fn taken<D: Into<String>>(domain: D, method: CheckMethod) -> Self {
        Self {
            domain: domain.into(),
            available: Availability::Taken,
            method,
        }
    }

    /// Build an available verdict with the signal that suggested it.
    pub fn available<D: Into<String>>(domain: D, method: CheckMethod) -> Self {
        Self {
            domain: domain.into(),
            available: Availability::Available,
            method,
        }
    }

    /// Build the undetermined verdict used when the whois stage fails or
    /// times out. The method tag is always `timeout`.
    pub fn undetermined<D: Into<String>>(domain: D) -> Self {
        Self {
            domain: domain.into(),
            available: Availability::Undetermined,
            method: CheckMethod::Timeout,
        }
    }
}

/// Tri-state availability verdict.
///
/// Kept as a real enum rather than `Option<bool>` so that downstream
/// `match`es are forced to handle the undetermined case. On the wire it
/// still reads as a nullable boolean: `true` for available, `false` for
/// taken, `null` for undetermined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The domain looks registrable (hard or soft signal, see the method tag)
    Available,

    /// The domain is registered
    Taken,

    /// The check could not decide (whois failed or timed out)
    Undetermined,
}

impl Availability {
    /// The nullable-boolean view used by serialization and sinks.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Availability::Available => Some(true),
            Availability::Taken => Some(false),
            Availability::Undetermined => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, Availability::Taken)
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Availability::Undetermined)
    }
}

impl Serialize for Availability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_bool() {
            Some(value) => serializer.serialize_bool(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => Availability::Available,
            Some(false) => Availability::Taken,
            None => Availability::Undetermined,
        })
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Taken => write!(f, "taken"),
            Availability::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// DNS record type probed during the first stage of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRecord {
    A,
    Ns,
    Mx,
}

impl ProbeRecord {
    /// Canonical upper-case name as it appears in method tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeRecord::A => "A",
            ProbeRecord::Ns => "NS",
            ProbeRecord::Mx => "MX",
        }
    }
}

impl std::fmt::Display for ProbeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record types tried during the DNS stage, in order.
///
/// The first type that resolves decides the check, so order here only
/// affects which `dns:<TYPE>` tag gets reported. Adding a record type means
/// extending this table; the probe loop itself is generic over it.
pub const DNS_PROBE_ORDER: [ProbeRecord; 3] = [ProbeRecord::A, ProbeRecord::Ns, ProbeRecord::Mx];

/// Provenance tag explaining which signal produced a verdict.
///
/// The textual form (via `Display` and serde) is part of the output format:
///
/// | tag | meaning |
/// |-----|---------|
/// | `dns:A` / `dns:NS` / `dns:MX` | taken, a DNS record of that type resolved |
/// | `whois:record` | taken, whois printed an explicit record line |
/// | `whois:registrar` | taken, registrar/creation-date wording matched |
/// | `whois:free` | available, an explicit free-signal phrase matched |
/// | `dns-clean+whois-tld` | available (soft), no DNS and no whois signal |
/// | `timeout` | undetermined, whois failed or exceeded its time bound |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMethod {
    /// A DNS record of the carried type resolved
    Dns(ProbeRecord),

    /// Whois output contained an explicit domain record line
    WhoisRecord,

    /// Whois output matched registrar/creation-date wording
    WhoisRegistrar,

    /// Whois output matched an explicit free-signal phrase
    WhoisFree,

    /// Clean DNS plus whois boilerplate with no signal either way
    DnsCleanWhoisTld,

    /// Whois invocation failed or exceeded its time bound
    Timeout,
}

impl CheckMethod {
    /// True for the `dns:<TYPE>` tags. Every such tag implies a taken verdict.
    pub fn is_dns(&self) -> bool {
        matches!(self, CheckMethod::Dns(_))
    }
}

impl std::fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMethod::Dns(record) => write!(f, "dns:{}", record),
            CheckMethod::WhoisRecord => write!(f, "whois:record"),
            CheckMethod::WhoisRegistrar => write!(f, "whois:registrar"),
            CheckMethod::WhoisFree => write!(f, "whois:free"),
            CheckMethod::DnsCleanWhoisTld => write!(f, "dns-clean+whois-tld"),
            CheckMethod::Timeout => write!(f, "timeout"),
        }
    }
}

impl std::str::FromStr for CheckMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns:A" => Ok(CheckMethod::Dns(ProbeRecord::A)),
            "dns:NS" => Ok(CheckMethod::Dns(ProbeRecord::Ns)),
            "dns:MX" => Ok(CheckMethod::Dns(ProbeRecord::Mx)),
            "whois:record" => Ok(CheckMethod::WhoisRecord),
            "whois:registrar" => Ok(CheckMethod::WhoisRegistrar),
            "whois:free" => Ok(CheckMethod::WhoisFree),
            "dns-clean+whois-tld" => Ok(CheckMethod::DnsCleanWhoisTld),
            "timeout" => Ok(CheckMethod::Timeout),
            other => Err(format!("unrecognized method tag: {}", other)),
        }
    }
}

impl Serialize for CheckMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CheckMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Configuration options for domain checking operations.
///
/// Tunes politeness and timeout behavior. Checks always run one at a time;
/// the delay below is what keeps bulk runs from hammering whois servers that
/// rate-limit or block bursts.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Pause inserted after every single check, regardless of which stage
    /// resolved it. Default: 350ms
    pub delay: Duration,

    /// Wall-clock bound on one whois subprocess invocation.
    /// Default: 8 seconds
    pub whois_timeout: Duration,

    /// Bound on one DNS lookup during the probe stage (per record type).
    /// Default: 5 seconds
    pub dns_timeout: Duration,

    /// List of TLDs to expand base domain names with.
    /// If None, defaults to ["com"]
    pub tlds: Option<Vec<String>>,

    /// Custom user-defined TLD presets from config files
    /// Default: empty
    pub custom_presets: HashMap<String, Vec<String>>,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// The 350ms delay and 8s whois bound match the behavior bulk whois
    /// servers tolerate; both can be tuned per run.
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(350),
            whois_timeout: Duration::from_secs(8),
            dns_timeout: Duration::from_secs(5),
            tlds: None, // Will default to ["com"] when needed
            custom_presets: HashMap::new(),
        }
    }
}

impl CheckConfig {
    /// Set the pause inserted after each check.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the wall-clock bound for whois invocations.
    pub fn with_whois_timeout(mut self, timeout: Duration) -> Self {
        self.whois_timeout = timeout;
        self
    }

    /// Set the per-lookup bound for the DNS probe stage.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Set TLDs to expand base domain names with.
    pub fn with_tlds(mut self, tlds: Vec<String>) -> Self {
        self.tlds = Some(tlds);
        self
    }
}
