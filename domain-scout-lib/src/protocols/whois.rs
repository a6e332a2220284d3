//! Whois heuristic stage.
//!
//! Second stage of a check, reached only when the DNS probe found nothing.
//! Runs the system `whois` command and classifies the raw text output with
//! ordered substring heuristics. Whois responses are unstructured and differ
//! per registry, so this is a screening signal with a known accuracy
//! ceiling, not an authoritative answer.

use crate::error::DomainScoutError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Phrases that signal the registry holds no record for the queried name.
///
/// Checked before [`WHOIS_TAKEN_PHRASES`]; registries that print "not found"
/// often also print field labels in their boilerplate, and the explicit free
/// signal wins. Extend this table when a registry shows up with new wording,
/// keep the matching itself untouched.
pub const WHOIS_FREE_PHRASES: &[&str] = &[
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "status: free",
    "is available",
    "domain not found",
];

/// Phrases that signal an existing registration when no free signal matched.
pub const WHOIS_TAKEN_PHRASES: &[&str] = &["registrar:", "creation date:", "created:"];

/// Classification of one whois response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhoisVerdict {
    /// Output contained an explicit record line for the queried domain
    Record,

    /// Output matched a free-signal phrase
    Free,

    /// Output matched registrar/creation-date wording
    Registrar,

    /// No signal either way, typically TLD-level registry boilerplate
    NoSignal,
}

/// Whois client driving the system's `whois` command.
///
/// The command is treated as a black box: stderr discarded, stdout captured
/// as text, one invocation per domain, no retries.
#[derive(Clone)]
pub struct WhoisClient {
    /// Wall-clock bound on one invocation
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new whois client with the default 8 second bound.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(8),
        }
    }

    /// Create a new whois client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Query whois for a domain and classify the response.
    ///
    /// # Errors
    ///
    /// Returns `DomainScoutError` if:
    /// - The `whois` command is missing or cannot be spawned
    /// - The command exits with a non-zero status
    /// - The invocation exceeds the wall-clock bound
    ///
    /// Callers that need a verdict regardless map these to the undetermined
    /// outcome; see `DomainChecker::check_domain`.
    pub async fn check_domain(&self, domain: &str) -> Result<WhoisVerdict, DomainScoutError> {
        let result = tokio::time::timeout(self.timeout, self.execute_whois_command(domain)).await;

        match result {
            Ok(Ok(output)) => {
                let verdict = classify_whois_output(&output, domain);
                tracing::debug!(domain = %domain, verdict = ?verdict, "whois classified");
                Ok(verdict)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DomainScoutError::timeout("whois query", self.timeout)),
        }
    }

    /// Execute the system whois command and capture stdout.
    async fn execute_whois_command(&self, domain: &str) -> Result<String, DomainScoutError> {
        let output = Command::new("whois")
            .arg(domain)
            .stderr(Stdio::null())
            // Reap the child if the wall clock fires before it finishes
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainScoutError::whois(
                    domain,
                    format!(
                        "Failed to execute whois command: {}. Make sure 'whois' is installed.",
                        e
                    ),
                )
            })?;

        if !output.status.success() {
            return Err(DomainScoutError::whois(
                domain,
                format!("whois exited with {}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify raw whois output for `domain`.
///
/// Both the output and the domain are lowercased, then the checks run in a
/// fixed order:
///
/// 1. An explicit record line for the queried domain
///    (`domain name: <domain>` or `domain: <domain>`) => [`WhoisVerdict::Record`]
/// 2. Any phrase from [`WHOIS_FREE_PHRASES`] => [`WhoisVerdict::Free`]
/// 3. Any phrase from [`WHOIS_TAKEN_PHRASES`] => [`WhoisVerdict::Registrar`]
/// 4. Otherwise => [`WhoisVerdict::NoSignal`]
///
/// Matching is plain substring search. The phrase tables and this order are
/// part of the observable output contract (they select the method tag), so
/// changes here change what consumers see.
pub fn classify_whois_output(output: &str, domain: &str) -> WhoisVerdict {
    let output = output.to_lowercase();
    let domain = domain.to_lowercase();

    if output.contains(&format!("domain name: {}", domain))
        || output.contains(&format!("domain: {}", domain))
    {
        return WhoisVerdict::Record;
    }

    if WHOIS_FREE_PHRASES.iter().any(|p| output.contains(p)) {
        return WhoisVerdict::Free;
    }

    if WHOIS_TAKEN_PHRASES.iter().any(|p| output.contains(p)) {
        return WhoisVerdict::Registrar;
    }

    WhoisVerdict::NoSignal
}

/// Check if the system has a `whois` command at all.
///
/// Spawn success is enough; BSD whois has no `--version` flag and exits
/// non-zero with a usage message, which still proves the binary is there.
pub async fn is_whois_available() -> bool {
    Command::new("whois")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .is_ok()
}
