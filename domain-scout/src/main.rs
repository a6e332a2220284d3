//! Domain Scout CLI Application
//!
//! A command-line interface for checking domain availability using DNS probes
//! with a WHOIS fallback. This CLI provides a user-friendly interface to the
//! domain-scout-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_scout_lib::{
    expand_domain_inputs, get_available_presets, get_preset_tlds, get_preset_tlds_with_custom,
    is_whois_available, load_env_config, parse_timeout_string, Availability, CheckConfig,
    CheckResult, ConfigManager, DomainChecker, EnvConfig, FileConfig,
};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-scout
#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Jonas Brecht <jbrecht@mailbox.org>")]
#[command(about = "Check domain availability using DNS probes with WHOIS fallback")]
#[command(
    long_about = "Check domain availability using DNS record probes with an automatic WHOIS fallback.\n\nChecks run one at a time with a fixed delay between them, so results arrive in input order and registries stay friendly. Supports TLD presets, input files, and multiple output formats."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain names to check (base names or FQDNs)
    #[arg(value_name = "DOMAINS", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// TLDs to check (comma-separated or multiple -t flags)
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Domain Selection")]
    pub tlds: Option<Vec<String>>,

    /// Use a predefined TLD preset (use --list-presets to see all)
    #[arg(
        long = "preset",
        value_name = "NAME",
        help_heading = "Domain Selection"
    )]
    pub preset: Option<String>,

    /// List all available TLD presets and exit
    #[arg(long = "list-presets", help_heading = "Domain Selection")]
    pub list_presets: bool,

    /// Input file with domains (one per line)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<String>,

    /// Preview expanded domains without checking availability
    #[arg(long = "dry-run", help_heading = "Domain Selection")]
    pub dry_run: bool,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Enable grouped, structured output with section headers
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Collect all results before displaying
    #[arg(long = "batch", help_heading = "Output Format")]
    pub batch: bool,

    /// Show results as they complete
    #[arg(long = "streaming", help_heading = "Output Format")]
    pub streaming: bool,

    /// Delay between checks in milliseconds (default: 350)
    #[arg(long = "delay", value_name = "MS", help_heading = "Performance")]
    pub delay: Option<u64>,

    /// Use specific config file instead of automatic discovery
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help_heading = "Configuration"
    )]
    pub config: Option<String>,

    /// Show structured debug logging on stderr
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Handle --list-presets early
    if args.list_presets {
        print_presets();
        return;
    }

    // The environment is read exactly once per run
    let env_config = load_env_config(args.verbose);

    init_debug_logging(&args, &env_config);

    if args.verbose {
        println!(
            "🔧 Domain Scout CLI v{} starting...",
            env!("CARGO_PKG_VERSION")
        );
    }

    // Run the domain checking
    if let Err(e) = run_domain_scout(args, env_config).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the tracing subscriber when --debug or DS_DEBUG asks for it.
///
/// Events go to stderr so stdout stays parseable. RUST_LOG overrides the
/// default filter.
fn init_debug_logging(args: &Args, env_config: &EnvConfig) {
    let env_debug = env_config.debug.unwrap_or(false);
    if !(args.debug || env_debug) {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("domain_scout_lib=debug,domain_scout=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // --list-presets is self-contained, skip other validation
    if args.list_presets {
        return Ok(());
    }

    // Must have either domains or a file
    if args.domains.is_empty() && args.file.is_none() {
        return Err("You must specify domain names or a file with --file".to_string());
    }

    // Can't have conflicting output modes
    if args.batch && args.streaming {
        return Err("Cannot specify both --batch and --streaming modes".to_string());
    }

    // Can't have multiple output formats
    let output_formats = [args.json, args.csv].iter().filter(|&&x| x).count();
    if output_formats > 1 {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    // Streaming mode doesn't support structured output formats
    if args.streaming && (args.json || args.csv) {
        return Err(
            "Cannot use --streaming with --json or --csv. Use --batch for structured output"
                .to_string(),
        );
    }

    // Check for conflicting TLD sources
    if args.tlds.is_some() && args.preset.is_some() {
        return Err(
            "Cannot specify multiple TLD sources. Use only one of: -t/--tld or --preset"
                .to_string(),
        );
    }

    Ok(())
}

/// Print all available TLD presets with their TLDs, then exit.
fn print_presets() {
    use console::Style;

    let heading = Style::new().yellow().bold();
    let name_style = Style::new().green().bold();
    let count_style = Style::new().cyan();

    println!();
    println!("{}", heading.apply_to("Available TLD Presets:"));
    println!();

    for preset_name in get_available_presets() {
        if let Some(tlds) = get_preset_tlds(preset_name) {
            let tld_list = tlds.join(", ");
            println!(
                "  {} {}  {}",
                name_style.apply_to(format!("{:<12}", preset_name)),
                count_style.apply_to(format!("({})", tlds.len())),
                tld_list,
            );
        }
    }

    println!();
    println!("Use: domain-scout <name> --preset <preset>");
}

/// Main domain checking logic
async fn run_domain_scout(
    mut args: Args,
    env_config: EnvConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if env_config.has_output_format_conflict() && args.verbose {
        eprintln!("⚠️ Both DS_JSON and DS_CSV are set, CLI flags take precedence");
    }

    let file_config = load_file_config(&args, &env_config)?;

    // Propagate resolved output preferences back to args for display logic
    apply_output_preferences(&mut args, &file_config, &env_config);

    let csv_headers = file_config
        .output
        .as_ref()
        .and_then(|o| o.csv_headers)
        .unwrap_or(true);

    // Build check configuration with file/env/CLI precedence
    let config = resolve_check_config(&args, file_config, &env_config)?;

    tracing::debug!(
        delay_ms = config.delay.as_millis() as u64,
        whois_timeout_s = config.whois_timeout.as_secs(),
        "resolved configuration"
    );

    // Determine domains to check
    let domains = get_domains_to_check(&args, &config, &env_config).await?;

    // Dry-run: print domains and exit without checking
    if args.dry_run {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&domains)?);
        } else {
            for d in &domains {
                println!("{}", d);
            }
        }
        eprintln!("{} domains would be checked", domains.len());
        return Ok(());
    }

    // Warn early when the whois binary is missing, instead of surfacing a
    // wall of undetermined results at the end
    if args.verbose && !is_whois_available().await {
        eprintln!("⚠️ 'whois' binary not found. Checks that need whois will come back undetermined.");
    }

    // Create domain checker
    let checker = DomainChecker::with_config(config.clone());

    // Decide on processing mode based on domain count and user preferences
    let use_streaming = should_use_streaming(&args, domains.len());

    if use_streaming {
        // Streaming mode shows each result as its check finishes
        run_streaming_check(&checker, &domains, &args, &config.tlds).await?;
    } else {
        // Batch mode collects everything first, for single domains or structured output
        run_batch_check(&checker, &domains, &args, csv_headers).await?;
    }

    Ok(())
}

/// Determine whether to use streaming or batch mode
fn should_use_streaming(args: &Args, domain_count: usize) -> bool {
    // Force batch mode if explicitly requested
    if args.batch {
        return false;
    }

    // Force streaming mode if explicitly requested
    if args.streaming {
        return true;
    }

    // Use streaming for multiple domains unless in JSON/CSV mode
    if domain_count > 1 && !args.json && !args.csv {
        return true;
    }

    // Default to batch mode for single domains or structured output
    false
}

/// Run domain check in streaming mode with real-time progress
async fn run_streaming_check(
    checker: &DomainChecker,
    domains: &[String],
    args: &Args,
    tlds: &Option<Vec<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    use futures::StreamExt;

    // Show initial progress message
    if args.pretty {
        ui::print_header(domains.len(), checker.config().delay, args);
    } else if args.verbose {
        println!(
            "🔍 Checking {} domains with {}ms delay between checks",
            domains.len(),
            checker.config().delay.as_millis()
        );

        if args.debug {
            println!("🔧 Domains: {}", domains.join(", "));
        }

        if let Some(preset) = &args.preset {
            if let Some(tld_list) = tlds {
                println!("🎯 Using '{}' preset ({} TLDs)", preset, tld_list.len());
            } else {
                println!("🎯 Using '{}' preset", preset);
            }
        }

        println!(); // Empty line for readability
    }

    // Track statistics for summary
    let mut available_count = 0;
    let mut taken_count = 0;
    let mut undetermined_count = 0;
    let mut undetermined_domains: Vec<String> = Vec::new();
    let mut completed = 0usize;
    let total = domains.len();

    let start_time = std::time::Instant::now();

    // Results arrive strictly in input order, one check at a time
    let mut stream = checker.check_domains_stream(domains);

    while let Some(result) = stream.next().await {
        match result.available {
            Availability::Available => available_count += 1,
            Availability::Taken => taken_count += 1,
            Availability::Undetermined => {
                undetermined_count += 1;
                undetermined_domains.push(result.domain.clone());
            }
        }

        completed += 1;

        // Show result immediately
        let counter = if total > 1 {
            Some((completed, total))
        } else {
            None
        };
        ui::print_result(&result, args.debug, counter);
    }

    let duration = start_time.elapsed();

    // Show final summary for multiple domains
    if total > 1 {
        println!();
        ui::print_summary(
            completed,
            available_count,
            taken_count,
            undetermined_count,
            duration,
        );
        if !undetermined_domains.is_empty() {
            println!();
            ui::print_undetermined(&undetermined_domains);
        }
    }

    Ok(())
}

/// Run domain check in batch mode (collect all results first)
async fn run_batch_check(
    checker: &DomainChecker,
    domains: &[String],
    args: &Args,
    csv_headers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let is_structured = args.json || args.csv;

    // Show header (pretty only, default mode lets the spinner + summary speak)
    if args.pretty && !is_structured && domains.len() > 1 {
        ui::print_header(domains.len(), checker.config().delay, args);
    } else if domains.len() > 1 && args.verbose {
        println!("🔍 Checking {} domains...", domains.len());
        if let Some(preset) = &args.preset {
            if let Some(preset_tlds) = get_preset_tlds(preset) {
                println!("🎯 Using '{}' preset ({} TLDs)", preset, preset_tlds.len());
            }
        }
    }

    // Start spinner for batch mode with multiple domains (all text modes).
    // Spinner::start returns None if stderr isn't a TTY.
    let spinner = if !is_structured && domains.len() > 1 {
        ui::Spinner::start(format!("Checking {} domains...", domains.len()))
    } else {
        None
    };

    let start_time = std::time::Instant::now();

    // Check all domains, one at a time with the configured delay
    let results = checker.check_domains(domains).await;

    let duration = start_time.elapsed();

    // Stop spinner before printing results
    if let Some(s) = spinner {
        s.stop().await;
    }

    // Display results based on format
    display_results(&results, args, duration, csv_headers)?;

    Ok(())
}

/// Load the file configuration: explicit --config, DS_CONFIG, or discovery.
///
/// An explicit config path that fails to load is a hard error. Discovery
/// failures degrade to defaults.
fn load_file_config(
    args: &Args,
    env_config: &EnvConfig,
) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    if let Some(explicit_config_path) = &args.config {
        if args.verbose {
            println!(
                "🔧 Using explicit config file (CLI --config): {}",
                explicit_config_path
            );
        }

        let file_config = config_manager.load_file(explicit_config_path).map_err(|e| {
            format!(
                "Failed to load config file '{}': {}",
                explicit_config_path, e
            )
        })?;

        return Ok(file_config);
    }

    if let Some(env_config_path) = &env_config.config {
        if args.verbose {
            println!(
                "🔧 Using explicit config file (DS_CONFIG env var): {}",
                env_config_path
            );
        }

        let file_config = config_manager
            .load_file(env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?;

        return Ok(file_config);
    }

    // No explicit config: use automatic discovery
    if args.verbose {
        println!("🔧 Discovering config files...");
    }

    match config_manager.discover_and_load() {
        Ok(file_config) => Ok(file_config),
        Err(e) => {
            if args.verbose {
                eprintln!("⚠️ Config discovery warning: {}", e);
            }
            Ok(FileConfig::default())
        }
    }
}

/// Fill in output format flags from environment and config file.
///
/// Explicit CLI flags always win. An explicit env value (even `false`)
/// suppresses the config file default.
fn apply_output_preferences(args: &mut Args, file_config: &FileConfig, env_config: &EnvConfig) {
    if !args.json && !args.csv {
        if env_config.json == Some(true) {
            args.json = true;
        } else if env_config.csv == Some(true) {
            args.csv = true;
        } else if env_config.json.is_none() && env_config.csv.is_none() {
            if let Some(output) = &file_config.output {
                match output.default_format.as_deref() {
                    Some("json") => args.json = true,
                    Some("csv") => args.csv = true,
                    _ => {}
                }
            }
        }
    }

    if !args.pretty {
        if let Some(pretty) = env_config.pretty {
            args.pretty = pretty;
        } else if let Some(pretty) = file_config.defaults.as_ref().and_then(|d| d.pretty) {
            args.pretty = pretty;
        }
    }
}

/// Build CheckConfig with proper precedence.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DS_*)
/// 3. Local config file (./domain-scout.toml or ./.domain-scout.toml)
/// 4. Global config file (~/.domain-scout.toml)
/// 5. XDG config file (~/.config/domain-scout/config.toml)
/// 6. Built-in defaults
fn resolve_check_config(
    args: &Args,
    file_config: FileConfig,
    env_config: &EnvConfig,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();

    config = merge_file_config_into_check_config(config, file_config)?;
    config = apply_environment_config(config, env_config, args.verbose);
    config = apply_cli_args_to_config(config, args)?;

    Ok(config)
}

/// Merge FileConfig into CheckConfig
fn merge_file_config_into_check_config(
    mut config: CheckConfig,
    file_config: FileConfig,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    // Custom presets first, so file defaults can reference them
    if let Some(custom_presets) = file_config.custom_presets {
        config.custom_presets = custom_presets;
    }

    if let Some(defaults) = file_config.defaults {
        if let Some(delay_ms) = defaults.delay_ms {
            config.delay = Duration::from_millis(delay_ms);
        }

        // Explicit TLD list wins over preset; the loader rejects both at once
        if let Some(tlds) = defaults.tlds {
            config.tlds = Some(tlds);
        } else if let Some(preset_name) = defaults.preset {
            match get_preset_tlds_with_custom(&preset_name, Some(&config.custom_presets)) {
                Some(preset_tlds) => config.tlds = Some(preset_tlds),
                None => {
                    return Err(format!(
                        "Unknown preset '{}' in config file. Use --list-presets to see built-in presets",
                        preset_name
                    )
                    .into());
                }
            }
        }

        if let Some(timeout_str) = defaults.whois_timeout {
            if let Some(timeout_secs) = parse_timeout_string(&timeout_str) {
                config.whois_timeout = Duration::from_secs(timeout_secs);
            }
        }
    }

    Ok(config)
}

/// Apply environment variables to config with comprehensive DS_* support.
fn apply_environment_config(
    mut config: CheckConfig,
    env_config: &EnvConfig,
    verbose: bool,
) -> CheckConfig {
    if let Some(delay_ms) = env_config.delay_ms {
        config.delay = Duration::from_millis(delay_ms);
    }

    // Handle TLD precedence: explicit TLDs beat presets
    if let Some(tlds) = &env_config.tlds {
        config.tlds = Some(tlds.clone());
    } else if let Some(preset) = env_config.get_effective_preset() {
        match get_preset_tlds_with_custom(&preset, Some(&config.custom_presets)) {
            Some(preset_tlds) => config.tlds = Some(preset_tlds),
            None => {
                if verbose {
                    eprintln!("⚠️ Unknown preset '{}' in DS_PRESET, ignoring", preset);
                }
            }
        }
    }

    if let Some(timeout_str) = &env_config.whois_timeout {
        match parse_timeout_string(timeout_str) {
            Some(timeout_secs) if timeout_secs > 0 => {
                config.whois_timeout = Duration::from_secs(timeout_secs);
            }
            _ => {
                if verbose {
                    eprintln!("⚠️ Ignoring DS_TIMEOUT='{}'", timeout_str);
                }
            }
        }
    }

    config
}

/// Apply CLI arguments to config (highest precedence).
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    args: &Args,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    if let Some(delay_ms) = args.delay {
        config.delay = Duration::from_millis(delay_ms);
    }

    // Handle TLD precedence: CLI explicit > CLI preset > env vars > config file
    if args.tlds.is_some() {
        config.tlds = args.tlds.clone();
    } else if let Some(preset) = &args.preset {
        match get_preset_tlds_with_custom(preset, Some(&config.custom_presets)) {
            Some(preset_tlds) => config.tlds = Some(preset_tlds),
            None => {
                return Err(format!(
                    "Unknown preset: '{}'. Use --list-presets to see available presets",
                    preset
                )
                .into());
            }
        }
    }
    // Otherwise keep TLDs from environment or config file (already applied)

    Ok(config)
}

/// Get the list of domains to check from CLI args, environment, or file
async fn get_domains_to_check(
    args: &Args,
    config: &CheckConfig,
    env_config: &EnvConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut base_names = Vec::new();

    // Collect raw inputs from args and file
    base_names.extend(args.domains.clone());

    if let Some(cli_file) = &args.file {
        if args.verbose {
            println!("🔧 Reading domains from file (CLI --file): {}", cli_file);
        }
        let file_domains = read_domains_from_file(cli_file).await?;
        base_names.extend(file_domains);
    } else if let Some(env_file_path) = &env_config.file {
        if args.verbose {
            println!(
                "🔧 Reading domains from file (DS_FILE env var): {}",
                env_file_path
            );
        }
        let file_domains = read_domains_from_file(env_file_path).await?;
        base_names.extend(file_domains);
    }

    // TLD expansion: name-major, extension-minor
    let expanded_domains = expand_domain_inputs(&base_names, &config.tlds);

    if expanded_domains.is_empty() {
        return Err("No valid domains found to check".into());
    }

    Ok(expanded_domains)
}

/// Read domains from a file
async fn read_domains_from_file(
    file_path: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {}", file_path).into());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut domains = Vec::new();
    let mut invalid_lines = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Handle inline comments
        let domain_part = trimmed.split('#').next().unwrap_or("").trim();
        if domain_part.is_empty() {
            continue;
        }

        if domain_part.len() < 2 {
            invalid_lines.push(format!(
                "Line {}: '{}' - entry too short",
                idx + 1,
                domain_part
            ));
            continue;
        }

        // Base names get expanded later with TLDs
        domains.push(domain_part.to_string());
    }

    // Report invalid lines if any
    if !invalid_lines.is_empty() {
        eprintln!(
            "⚠️ Found {} invalid entries in the file:",
            invalid_lines.len()
        );
        for invalid in &invalid_lines[..invalid_lines.len().min(5)] {
            eprintln!("  {}", invalid);
        }
        if invalid_lines.len() > 5 {
            eprintln!("  ... and {} more invalid entries", invalid_lines.len() - 5);
        }
        eprintln!();
    }

    if domains.is_empty() {
        return Err("No valid domains found in the file.".into());
    }

    Ok(domains)
}

fn display_results(
    results: &[CheckResult],
    args: &Args,
    duration: std::time::Duration,
    csv_headers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        display_json_results(results)?;
    } else if args.csv {
        display_csv_results(results, csv_headers);
    } else {
        display_text_results(results, args, duration);
    }

    Ok(())
}

/// Display results in JSON format
fn display_json_results(results: &[CheckResult]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}

/// Display results in CSV format
fn display_csv_results(results: &[CheckResult], csv_headers: bool) {
    if csv_headers {
        println!("domain,available,method");
    }

    for result in results {
        let available = match result.available {
            Availability::Available => "true",
            Availability::Taken => "false",
            Availability::Undetermined => "undetermined",
        };

        println!("{},{},{}", result.domain, available, result.method);
    }
}

/// Display results in human-readable text format
fn display_text_results(results: &[CheckResult], args: &Args, duration: std::time::Duration) {
    if args.pretty {
        // Pretty mode: grouped layout with section headers
        ui::print_grouped_results(results, args.debug);
    } else {
        // Default mode: colored flat list
        for result in results {
            ui::print_result(result, args.debug, None);
        }
    }

    // Shared summary for both modes
    if results.len() > 1 {
        let available = results
            .iter()
            .filter(|r| r.available.is_available())
            .count();
        let taken = results.iter().filter(|r| r.available.is_taken()).count();
        let undetermined: Vec<String> = results
            .iter()
            .filter(|r| r.available.is_undetermined())
            .map(|r| r.domain.clone())
            .collect();

        println!();
        ui::print_summary(
            results.len(),
            available,
            taken,
            undetermined.len(),
            duration,
        );
        if !undetermined.is_empty() {
            println!();
            ui::print_undetermined(&undetermined);
        }
    }
}

// domain-scout/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;
    use domain_scout_lib::{DefaultsConfig, OutputConfig};
    use std::collections::HashMap;

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            domains: vec![],
            tlds: None,
            preset: None,
            list_presets: false,
            file: None,
            dry_run: false,
            json: false,
            csv: false,
            pretty: false,
            batch: false,
            streaming: false,
            delay: None,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn validate_rejects_missing_inputs() {
        let args = create_test_args();

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("domain names"));
    }

    #[test]
    fn validate_rejects_conflicting_tld_sources() {
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.tlds = Some(vec!["com".to_string()]);
        args.preset = Some("startup".to_string());

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("Cannot specify multiple TLD sources"));
    }

    #[test]
    fn validate_rejects_batch_with_streaming() {
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.batch = true;
        args.streaming = true;

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn validate_rejects_json_with_csv() {
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.json = true;
        args.csv = true;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("multiple output formats"));
    }

    #[test]
    fn validate_rejects_streaming_with_json() {
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.streaming = true;
        args.json = true;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--streaming"));
    }

    #[test]
    fn validate_allows_batch_with_json() {
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.batch = true;
        args.json = true;

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn validate_allows_unknown_preset() {
        // Unknown presets pass validation and fail later during config
        // resolution, where custom presets from config files are visible
        let mut args = create_test_args();
        args.domains = vec!["test".to_string()];
        args.preset = Some("invalid_preset".to_string());

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn streaming_is_default_for_multiple_text_domains() {
        let args = create_test_args();
        assert!(should_use_streaming(&args, 4));
        assert!(!should_use_streaming(&args, 1));
    }

    #[test]
    fn structured_output_forces_batch() {
        let mut args = create_test_args();
        args.json = true;
        assert!(!should_use_streaming(&args, 4));
    }

    #[test]
    fn explicit_mode_flags_win() {
        let mut args = create_test_args();
        args.streaming = true;
        assert!(should_use_streaming(&args, 1));

        let mut args = create_test_args();
        args.batch = true;
        assert!(!should_use_streaming(&args, 4));
    }

    #[test]
    fn cli_delay_overrides_config() {
        let mut args = create_test_args();
        args.delay = Some(50);
        let config = CheckConfig::default().with_delay(Duration::from_millis(1000));

        let result = apply_cli_args_to_config(config, &args).unwrap();
        assert_eq!(result.delay, Duration::from_millis(50));
    }

    #[test]
    fn absent_cli_delay_preserves_config() {
        let args = create_test_args();
        let config = CheckConfig::default().with_delay(Duration::from_millis(1000));

        let result = apply_cli_args_to_config(config, &args).unwrap();
        assert_eq!(result.delay, Duration::from_millis(1000));
    }

    #[test]
    fn unknown_cli_preset_is_an_error() {
        let mut args = create_test_args();
        args.preset = Some("no-such".to_string());

        let result = apply_cli_args_to_config(CheckConfig::default(), &args);
        assert!(result.is_err());
    }

    #[test]
    fn cli_preset_resolves_against_custom_presets() {
        let mut args = create_test_args();
        args.preset = Some("mine".to_string());
        let mut config = CheckConfig::default();
        config
            .custom_presets
            .insert("mine".to_string(), vec!["io".to_string()]);

        let result = apply_cli_args_to_config(config, &args).unwrap();
        assert_eq!(result.tlds, Some(vec!["io".to_string()]));
    }

    #[test]
    fn file_delay_and_timeout_apply() {
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                delay_ms: Some(500),
                whois_timeout: Some("30s".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config =
            merge_file_config_into_check_config(CheckConfig::default(), file_config).unwrap();
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.whois_timeout, Duration::from_secs(30));
    }

    #[test]
    fn file_preset_resolves_against_custom_presets() {
        let mut custom = HashMap::new();
        custom.insert(
            "mine".to_string(),
            vec!["com".to_string(), "dev".to_string()],
        );
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                preset: Some("mine".to_string()),
                ..Default::default()
            }),
            custom_presets: Some(custom),
            ..Default::default()
        };

        let config =
            merge_file_config_into_check_config(CheckConfig::default(), file_config).unwrap();
        assert_eq!(
            config.tlds,
            Some(vec!["com".to_string(), "dev".to_string()])
        );
    }

    #[test]
    fn unknown_file_preset_is_an_error() {
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                preset: Some("no-such".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(merge_file_config_into_check_config(CheckConfig::default(), file_config).is_err());
    }

    #[test]
    fn env_delay_applies_to_config() {
        let env_config = EnvConfig {
            delay_ms: Some(25),
            ..Default::default()
        };

        let config = apply_environment_config(CheckConfig::default(), &env_config, false);
        assert_eq!(config.delay, Duration::from_millis(25));
    }

    #[test]
    fn env_tlds_beat_env_preset() {
        let env_config = EnvConfig {
            tlds: Some(vec!["net".to_string()]),
            preset: Some("startup".to_string()),
            ..Default::default()
        };

        let config = apply_environment_config(CheckConfig::default(), &env_config, false);
        assert_eq!(config.tlds, Some(vec!["net".to_string()]));
    }

    #[test]
    fn env_json_enables_json_output() {
        let mut args = create_test_args();
        let env_config = EnvConfig {
            json: Some(true),
            ..Default::default()
        };

        apply_output_preferences(&mut args, &FileConfig::default(), &env_config);
        assert!(args.json);
        assert!(!args.csv);
    }

    #[test]
    fn file_default_format_fills_in_when_nothing_explicit() {
        let mut args = create_test_args();
        let file_config = FileConfig {
            output: Some(OutputConfig {
                default_format: Some("csv".to_string()),
                csv_headers: None,
            }),
            ..Default::default()
        };

        apply_output_preferences(&mut args, &file_config, &EnvConfig::default());
        assert!(args.csv);
        assert!(!args.json);
    }

    #[test]
    fn explicit_cli_format_wins_over_env() {
        let mut args = create_test_args();
        args.csv = true;
        let env_config = EnvConfig {
            json: Some(true),
            ..Default::default()
        };

        apply_output_preferences(&mut args, &FileConfig::default(), &env_config);
        assert!(args.csv);
        assert!(!args.json);
    }

    #[test]
    fn env_pretty_false_suppresses_file_pretty() {
        let mut args = create_test_args();
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                pretty: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let env_config = EnvConfig {
            pretty: Some(false),
            ..Default::default()
        };

        apply_output_preferences(&mut args, &file_config, &env_config);
        assert!(!args.pretty);
    }
}
