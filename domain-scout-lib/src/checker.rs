//! Main domain checker implementation.
//!
//! This module provides the primary `DomainChecker` struct that sequences
//! the two stages of a check: the DNS probe and the whois text heuristic.

use crate::protocols::{DnsProber, ProbeOutcome, WhoisClient, WhoisVerdict};
use crate::types::{CheckConfig, CheckMethod, CheckResult};
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

/// Coordinates availability checks for one or many domains.
///
/// Every check runs the same pipeline:
/// 1. DNS probe over the fixed record-type list; any hit ends the check as
///    taken with a `dns:<TYPE>` tag.
/// 2. Whois query and substring classification of its output.
/// 3. Whois failure of any kind collapses to the undetermined verdict.
///
/// A check never returns an error and never panics; the undetermined
/// outcome is the floor every failure lands on.
///
/// # Example
///
/// ```rust,no_run
/// use domain_scout_lib::DomainChecker;
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::new();
///     let result = checker.check_domain("example.com").await;
///     println!("{}: {} ({})", result.domain, result.available, result.method);
/// }
/// ```
pub struct DomainChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// DNS prober for the first stage
    prober: DnsProber,
    /// Whois client for the second stage
    whois_client: WhoisClient,
}

impl DomainChecker {
    /// Create a new domain checker with default configuration.
    ///
    /// Default settings:
    /// - Delay between checks: 350ms
    /// - Whois timeout: 8 seconds
    /// - DNS per-lookup timeout: 5 seconds
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new domain checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use domain_scout_lib::{CheckConfig, DomainChecker};
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let config = CheckConfig::default()
    ///         .with_delay(Duration::from_millis(500))
    ///         .with_whois_timeout(Duration::from_secs(10));
    ///
    ///     let checker = DomainChecker::with_config(config);
    ///     let _ = checker.check_domain("example.org").await;
    /// }
    /// ```
    pub fn with_config(config: CheckConfig) -> Self {
        let prober = DnsProber::with_timeout(config.dns_timeout);
        let whois_client = WhoisClient::with_timeout(config.whois_timeout);

        Self {
            config,
            prober,
            whois_client,
        }
    }

    /// Check availability of a single domain.
    ///
    /// Infallible: whatever happens underneath (resolver errors, missing
    /// whois binary, timeouts), the caller gets exactly one `CheckResult`
    /// for the domain. The inter-check delay is not applied here; it
    /// belongs to the multi-domain drivers below.
    pub async fn check_domain(&self, domain: &str) -> CheckResult {
        run_stages(
            domain,
            self.prober.probe(domain),
            self.whois_client.check_domain(domain),
        )
        .await
    }

    /// Check a batch of domains, one at a time, in the given order.
    ///
    /// After every single check (whichever stage resolved it) the
    /// configured delay is awaited before the next domain starts. The
    /// returned Vec is in input order.
    pub async fn check_domains(&self, domains: &[String]) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(domains.len());

        for domain in domains {
            results.push(self.check_domain(domain).await);
            tokio::time::sleep(self.config.delay).await;
        }

        results
    }

    /// Check domains and yield results as a stream, in input order.
    ///
    /// The stream is strictly sequential: the next check only starts after
    /// the previous result was yielded and the delay elapsed, so consumers
    /// see results in exactly the order the domains were supplied.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use domain_scout_lib::DomainChecker;
    /// use futures::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let checker = DomainChecker::new();
    ///     let domains = vec!["example.com".to_string(), "example.io".to_string()];
    ///
    ///     let mut stream = checker.check_domains_stream(&domains);
    ///     while let Some(result) = stream.next().await {
    ///         println!("{}: {}", result.domain, result.available);
    ///     }
    /// }
    /// ```
    pub fn check_domains_stream(
        &self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = CheckResult> + Send + '_>> {
        let domains = domains.to_vec();
        let stream = futures::stream::iter(domains).then(move |domain| async move {
            let result = self.check_domain(&domain).await;
            tokio::time::sleep(self.config.delay).await;
            result
        });

        Box::pin(stream)
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequence the two stages of a check.
///
/// The whois future is only polled when the probe comes back clean, so a
/// DNS hit never costs a subprocess. Generic over the stage futures so the
/// branching can be tested with injected outcomes.
async fn run_stages<P, W>(domain: &str, probe: P, whois: W) -> CheckResult
where
    P: std::future::Future<Output = ProbeOutcome>,
    W: std::future::Future<Output = crate::Result<WhoisVerdict>>,
{
    if let ProbeOutcome::Resolved(record) = probe.await {
        return CheckResult::taken(domain, CheckMethod::Dns(record));
    }

    match whois.await {
        Ok(verdict) => whois_result(domain, verdict),
        Err(e) => {
            tracing::debug!(domain = %domain, error = %e, "whois stage failed, marking undetermined");
            CheckResult::undetermined(domain)
        }
    }
}

/// Map a whois verdict onto the final result record.
fn whois_result(domain: &str, verdict: WhoisVerdict) -> CheckResult {
    match verdict {
        WhoisVerdict::Record => CheckResult::taken(domain, CheckMethod::WhoisRecord),
        WhoisVerdict::Free => CheckResult::available(domain, CheckMethod::WhoisFree),
        WhoisVerdict::Registrar => CheckResult::taken(domain, CheckMethod::WhoisRegistrar),
        WhoisVerdict::NoSignal => CheckResult::available(domain, CheckMethod::DnsCleanWhoisTld),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;
    use std::time::Duration;

    #[test]
    fn whois_verdicts_map_onto_results() {
        let cases = [
            (
                WhoisVerdict::Record,
                Availability::Taken,
                CheckMethod::WhoisRecord,
            ),
            (
                WhoisVerdict::Free,
                Availability::Available,
                CheckMethod::WhoisFree,
            ),
            (
                WhoisVerdict::Registrar,
                Availability::Taken,
                CheckMethod::WhoisRegistrar,
            ),
            (
                WhoisVerdict::NoSignal,
                Availability::Available,
                CheckMethod::DnsCleanWhoisTld,
            ),
        ];

        for (verdict, availability, method) in cases {
            let result = whois_result("example.com", verdict);
            assert_eq!(result.domain, "example.com");
            assert_eq!(result.available, availability);
            assert_eq!(result.method, method);
        }
    }

    #[tokio::test]
    async fn dns_hit_is_taken_with_that_records_tag() {
        for record in crate::types::DNS_PROBE_ORDER {
            let result = run_stages(
                "stub.com",
                async move { ProbeOutcome::Resolved(record) },
                async { unreachable!("whois stage must not run after a dns hit") },
            )
            .await;

            assert_eq!(result.available, Availability::Taken);
            assert_eq!(result.method, CheckMethod::Dns(record));
        }
    }

    #[tokio::test]
    async fn clean_probe_falls_through_to_whois() {
        let result = run_stages(
            "stub.com",
            async { ProbeOutcome::Clean },
            async { Ok(WhoisVerdict::Free) },
        )
        .await;

        assert_eq!(result.available, Availability::Available);
        assert_eq!(result.method, CheckMethod::WhoisFree);
    }

    #[tokio::test]
    async fn whois_failure_collapses_to_undetermined() {
        let timeout = crate::DomainScoutError::timeout("whois query", Duration::from_secs(8));
        let spawn = crate::DomainScoutError::whois("stub.com", "Failed to execute whois command");

        for error in [timeout, spawn] {
            let result = run_stages(
                "stub.com",
                async { ProbeOutcome::Clean },
                async move { Err(error) },
            )
            .await;

            assert_eq!(result.available, Availability::Undetermined);
            assert_eq!(result.method, CheckMethod::Timeout);
            assert_eq!(
                serde_json::to_string(&result).unwrap(),
                r#"{"domain":"stub.com","available":null,"method":"timeout"}"#
            );
        }
    }

    #[tokio::test]
    async fn checker_carries_its_config() {
        let config = CheckConfig::default().with_delay(Duration::ZERO);
        let checker = DomainChecker::with_config(config);
        assert_eq!(checker.config().delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn empty_batch_yields_no_results() {
        let checker = DomainChecker::with_config(CheckConfig::default().with_delay(Duration::ZERO));
        let results = checker.check_domains(&[]).await;
        assert!(results.is_empty());

        let mut stream = checker.check_domains_stream(&[]);
        assert!(stream.next().await.is_none());
    }

    // This hits the network so it's marked #[ignore] for CI unless explicitly run
    #[tokio::test]
    #[ignore]
    async fn live_check_flags_a_registered_domain_as_taken() {
        let checker = DomainChecker::new();
        let result = checker.check_domain("google.com").await;
        assert!(result.available.is_taken());
        assert!(result.method.is_dns());
    }
}
