//! Pretty-mode display logic for the domain-scout CLI.
//!
//! This module handles all terminal output: colored result lines,
//! grouped batch output, spinner animation, progress counters,
//! headers, and summaries. Uses only the `console` crate (already a dependency).

use console::{pad_str, style, Alignment, Term};
use domain_scout_lib::{Availability, CheckResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::Args;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Checking 8 domains...").
    ///
    /// Returns None when stderr is not a terminal.
    pub fn start(message: String) -> Option<Self> {
        let term = Term::stderr();
        if !term.is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(domain_count: usize, delay: Duration, args: &Args) {
    println!(
        "{} {} {}",
        style("domain-scout").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} domain{}",
            domain_count,
            if domain_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let mut meta_parts: Vec<String> = Vec::new();

    if let Some(preset) = &args.preset {
        meta_parts.push(format!("Preset: {}", preset));
    }
    meta_parts.push(format!("Delay: {}ms", delay.as_millis()));

    println!("{}", style(meta_parts.join(" | ")).dim());
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print a single domain result with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]` is shown.
pub fn print_result(result: &CheckResult, debug: bool, counter: Option<(usize, usize)>) {
    let domain_width = 30;
    let padded_domain = pad_str(&result.domain, domain_width, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => {
            format!("{} ", style(format!("[{}/{}]", cur, total)).dim())
        }
        None => String::new(),
    };

    match result.available {
        Availability::Available => {
            println!(
                "  {}{}  {}",
                prefix,
                style(&padded_domain).white(),
                style("AVAILABLE").green().bold(),
            );
        }
        Availability::Taken => {
            println!(
                "  {}{}  {}",
                prefix,
                style(&padded_domain).white(),
                style("TAKEN").red().bold(),
            );
        }
        Availability::Undetermined => {
            println!(
                "  {}{}  {}  {}",
                prefix,
                style(&padded_domain).white(),
                style("UNDETERMINED").yellow(),
                style(format!("({})", result.method)).dim(),
            );
        }
    }

    if debug {
        println!("    {} via {}", style("└─").dim(), result.method);
    }
}

// ── Grouped batch output ─────────────────────────────────────────────────────

/// Print results grouped by status: Available, Taken, Undetermined.
/// Empty sections are omitted entirely.
pub fn print_grouped_results(results: &[CheckResult], debug: bool) {
    let mut available: Vec<&CheckResult> = Vec::new();
    let mut taken: Vec<&CheckResult> = Vec::new();
    let mut undetermined: Vec<&CheckResult> = Vec::new();

    for r in results {
        match r.available {
            Availability::Available => available.push(r),
            Availability::Taken => taken.push(r),
            Availability::Undetermined => undetermined.push(r),
        }
    }

    if !available.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Available ({}) ", available.len()))
                .green()
                .bold(),
            style("─".repeat(40)).green().dim(),
        );
        for r in &available {
            print_grouped_line(r, debug);
        }
        println!();
    }

    if !taken.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Taken ({}) ", taken.len())).red().bold(),
            style("─".repeat(44)).red().dim(),
        );
        for r in &taken {
            print_grouped_line(r, debug);
        }
        println!();
    }

    if !undetermined.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Undetermined ({}) ", undetermined.len()))
                .yellow()
                .bold(),
            style("─".repeat(37)).yellow().dim(),
        );
        for r in &undetermined {
            print_grouped_line(r, debug);
        }
        println!();
    }
}

/// Print a single line inside a grouped section.
fn print_grouped_line(result: &CheckResult, debug: bool) {
    let domain_width = 30;
    let padded = pad_str(&result.domain, domain_width, Alignment::Left, Some(".."));

    match result.available {
        Availability::Undetermined => {
            println!(
                "    {}  {}",
                style(&padded).white(),
                style(format!("({})", result.method)).dim(),
            );
        }
        _ => {
            println!("    {}", style(&padded).white());
        }
    }

    if debug {
        println!("      {} via {}", style("└─").dim(), result.method);
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(
    total: usize,
    available: usize,
    taken: usize,
    undetermined: usize,
    duration: Duration,
) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(total).bold(),
        if total == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", available)).green(),
        style("|").dim(),
        style(format!("{} taken", taken)).red(),
        style("|").dim(),
        style(format!("{} undetermined", undetermined)).yellow(),
    );
}

// ── Undetermined listing ─────────────────────────────────────────────────────

/// Print the domains whose status could not be settled.
pub fn print_undetermined(domains: &[String]) {
    if domains.is_empty() {
        return;
    }

    println!(
        "  {}",
        style("Some domains could not be settled:").yellow()
    );
    println!(
        "  {} {} undetermined: {}",
        style("•").dim(),
        domains.len(),
        format_domain_list(domains, 5),
    );
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Join a domain list, truncating to `max_show` entries with an "and X more" tail.
fn format_domain_list(domains: &[String], max_show: usize) -> String {
    if domains.len() <= max_show {
        domains.join(", ")
    } else {
        let shown = &domains[..max_show];
        let remaining = domains.len() - max_show;
        format!("{}, ... and {} more", shown.join(", "), remaining)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_domain_lists_are_not_truncated() {
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        assert_eq!(format_domain_list(&domains, 5), "a.com, b.com");
    }

    #[test]
    fn domain_lists_at_the_limit_stay_whole() {
        let domains: Vec<String> = (0..5).map(|i| format!("d{}.com", i)).collect();
        assert_eq!(
            format_domain_list(&domains, 5),
            "d0.com, d1.com, d2.com, d3.com, d4.com"
        );
    }

    #[test]
    fn long_domain_lists_get_a_more_tail() {
        let domains: Vec<String> = (0..8).map(|i| format!("d{}.com", i)).collect();
        let formatted = format_domain_list(&domains, 5);
        assert!(formatted.starts_with("d0.com, d1.com, d2.com, d3.com, d4.com"));
        assert!(formatted.ends_with("... and 3 more"));
    }
}
