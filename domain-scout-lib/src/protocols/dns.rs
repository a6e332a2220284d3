//! DNS probe stage.
//!
//! First stage of every check: resolve the domain for each record type in
//! [`DNS_PROBE_ORDER`] and stop at the first hit. Any resolving record proves
//! registration without touching whois, which is both faster and kinder to
//! rate-limited whois servers. A clean probe proves nothing on its own (many
//! registered domains have no DNS configured), so the caller falls through to
//! the whois stage.

use crate::types::{ProbeRecord, DNS_PROBE_ORDER};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;

/// Outcome of the DNS stage for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A record of the carried type resolved; the domain is registered
    Resolved(ProbeRecord),

    /// No probed record type resolved
    Clean,
}

/// DNS prober wrapping the system resolver.
#[derive(Clone)]
pub struct DnsProber {
    resolver: TokioAsyncResolver,
    /// Bound on one lookup; an expired lookup is a miss, not an error
    timeout: Duration,
}

impl DnsProber {
    /// Create a prober with the default per-lookup timeout (5 seconds).
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5))
    }

    /// Create a prober with a custom per-lookup timeout.
    ///
    /// Reads the OS resolver configuration (/etc/resolv.conf or platform
    /// equivalent) and falls back to the library's default public resolvers
    /// when no usable system config exists.
    pub fn with_timeout(timeout: Duration) -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        Self { resolver, timeout }
    }

    /// Probe the fixed record-type list in order, returning on the first hit.
    ///
    /// Every failure mode of a single lookup (NXDOMAIN, SERVFAIL, empty
    /// answer, network error, timeout) counts as a miss for that record type
    /// and the next one is tried. The probe itself never fails.
    pub async fn probe(&self, domain: &str) -> ProbeOutcome {
        probe_in_order(domain, move |record| self.record_resolves(domain, record)).await
    }

    /// One bounded lookup; true iff at least one record came back.
    async fn record_resolves(&self, domain: &str, record: ProbeRecord) -> bool {
        let lookup = tokio::time::timeout(
            self.timeout,
            self.resolver.lookup(domain, record_type(record)),
        )
        .await;

        match lookup {
            Ok(Ok(answer)) if !answer.records().is_empty() => true,
            Ok(Ok(_)) => {
                // Answered but empty, treat like a miss
                tracing::trace!(domain = %domain, record = %record, "dns probe empty answer");
                false
            }
            Ok(Err(e)) => {
                tracing::trace!(domain = %domain, record = %record, error = %e, "dns probe miss");
                false
            }
            Err(_) => {
                tracing::trace!(domain = %domain, record = %record, "dns probe lookup timed out");
                false
            }
        }
    }
}

/// Walk [`DNS_PROBE_ORDER`] with `lookup`, stopping at the first hit.
///
/// The loop is separate from `DnsProber` so the first-hit-wins ordering can
/// be exercised against a stub lookup without a resolver.
async fn probe_in_order<F, Fut>(domain: &str, mut lookup: F) -> ProbeOutcome
where
    F: FnMut(ProbeRecord) -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for record in DNS_PROBE_ORDER {
        if lookup(record).await {
            tracing::debug!(domain = %domain, record = %record, "dns probe hit");
            return ProbeOutcome::Resolved(record);
        }
    }

    tracing::debug!(domain = %domain, "dns probe clean");
    ProbeOutcome::Clean
}

impl Default for DnsProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a probe table entry onto the resolver's record type.
fn record_type(record: ProbeRecord) -> RecordType {
    match record {
        ProbeRecord::A => RecordType::A,
        ProbeRecord::Ns => RecordType::NS,
        ProbeRecord::Mx => RecordType::MX,
    }
}
