//! Utility functions for domain input expansion and validation.
//!
//! The expander turns a mixed list of base names and FQDNs plus an optional
//! TLD list into the ordered list of fully qualified domains a run will
//! check.

use std::collections::HashSet;

/// Expand domain inputs into fully qualified domains.
///
/// Rules:
/// - Inputs are trimmed; empty entries are skipped.
/// - Duplicate inputs are dropped, first occurrence wins, order otherwise
///   preserved.
/// - An input containing a dot is treated as an FQDN and passed through
///   unexpanded (after validation).
/// - An input without a dot is a base name and is crossed with the TLD
///   list: name-major, extension-minor, so `[b1, b2]` with `[com, io]`
///   yields `[b1.com, b1.io, b2.com, b2.io]`.
/// - TLD entries may carry a leading dot (`.com` and `com` are equivalent).
/// - With no TLD list, base names default to `.com`.
/// - Inputs failing validation are silently skipped.
///
/// # Arguments
///
/// * `domains` - Input domain names (base names and/or FQDNs)
/// * `tlds` - TLDs to use for expansion (defaults to ["com"] if None)
///
/// # Returns
///
/// Vector of fully qualified domain names ready for checking.
pub fn expand_domain_inputs(domains: &[String], tlds: &Option<Vec<String>>) -> Vec<String> {
    let mut results = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for domain in domains {
        let trimmed = domain.trim();

        if trimmed.is_empty() {
            continue;
        }

        // First occurrence wins
        if !seen.insert(trimmed.to_string()) {
            continue;
        }

        if trimmed.contains('.') {
            // Has dot = treat as FQDN, no expansion
            if is_valid_fqdn(trimmed) {
                results.push(trimmed.to_string());
            }
        } else {
            // No dot = base name, expand with TLDs
            if is_valid_base_name(trimmed) {
                match tlds {
                    Some(tld_list) => {
                        for tld in tld_list {
                            let tld_clean = tld.trim().trim_start_matches('.');
                            if !tld_clean.is_empty() {
                                results.push(format!("{}.{}", trimmed, tld_clean));
                            }
                        }
                    }
                    None => {
                        // Default to .com if no TLDs specified
                        results.push(format!("{}.com", trimmed));
                    }
                }
            }
        }
    }

    results
}

/// Validate that a base domain name (without TLD) is acceptable.
fn is_valid_base_name(domain: &str) -> bool {
    if domain.len() < 2 {
        return false;
    }

    // Cannot start or end with hyphen
    if domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    // Only allow alphanumeric and hyphens
    domain.chars().all(|c| c.is_alphanumeric() || c == '-')
}

/// Validate that an FQDN has basic valid structure.
fn is_valid_fqdn(domain: &str) -> bool {
    if domain.len() < 4 || domain.len() > 253 {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }

    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    for part in parts {
        if part.is_empty() || part.len() > 63 {
            return false;
        }

        // Labels cannot start or end with hyphen
        if part.starts_with('-') || part.ends_with('-') {
            return false;
        }

        if !part.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_preserves_name_major_extension_minor_order() {
        let domains = vec!["b1".to_string(), "b2".to_string()];
        let tlds = Some(vec![".com".to_string(), ".io".to_string()]);

        let result = expand_domain_inputs(&domains, &tlds);
        assert_eq!(result, vec!["b1.com", "b1.io", "b2.com", "b2.io"]);
    }

    #[test]
    fn tlds_work_with_and_without_leading_dot() {
        let domains = vec!["mysite".to_string()];
        let tlds = Some(vec!["com".to_string(), ".io".to_string()]);

        let result = expand_domain_inputs(&domains, &tlds);
        assert_eq!(result, vec!["mysite.com", "mysite.io"]);
    }

    #[test]
    fn duplicate_inputs_expand_once_keeping_first_position() {
        let domains = vec![
            "mysite".to_string(),
            "other".to_string(),
            "mysite".to_string(),
        ];
        let tlds = Some(vec!["com".to_string()]);

        let result = expand_domain_inputs(&domains, &tlds);
        assert_eq!(result, vec!["mysite.com", "other.com"]);

        let fqdns = vec!["test.com".to_string(), "test.com".to_string()];
        assert_eq!(expand_domain_inputs(&fqdns, &None), vec!["test.com"]);
    }

    #[test]
    fn fqdn_inputs_pass_through_unexpanded() {
        let domains = vec!["example".to_string(), "test.com".to_string()];
        let tlds = Some(vec!["com".to_string(), "org".to_string()]);

        let result = expand_domain_inputs(&domains, &tlds);
        assert_eq!(result, vec!["example.com", "example.org", "test.com"]);
    }

    #[test]
    fn base_names_default_to_com() {
        let domains = vec!["example".to_string()];
        let result = expand_domain_inputs(&domains, &None);
        assert_eq!(result, vec!["example.com"]);
    }

    #[test]
    fn invalid_inputs_are_skipped() {
        let domains = vec![
            "".to_string(),
            "a".to_string(),
            "valid".to_string(),
            "test.com".to_string(),
        ];
        let tlds = Some(vec!["com".to_string(), "org".to_string()]);

        let result = expand_domain_inputs(&domains, &tlds);
        assert_eq!(result, vec!["valid.com", "valid.org", "test.com"]);
    }

    #[test]
    fn base_name_validation() {
        assert!(is_valid_base_name("example"));
        assert!(is_valid_base_name("test-domain"));
        assert!(is_valid_base_name("abc123"));

        assert!(!is_valid_base_name(""));
        assert!(!is_valid_base_name("a"));
        assert!(!is_valid_base_name("-example"));
        assert!(!is_valid_base_name("example-"));
        assert!(!is_valid_base_name("test.com")); // Contains dot
    }

    #[test]
    fn fqdn_validation() {
        assert!(is_valid_fqdn("example.com"));
        assert!(is_valid_fqdn("test.co.uk"));
        assert!(is_valid_fqdn("sub.example.com"));

        assert!(!is_valid_fqdn("example"));
        assert!(!is_valid_fqdn(".com"));
        assert!(!is_valid_fqdn("example."));
        assert!(!is_valid_fqdn("-example.com"));
        assert!(!is_valid_fqdn("example.com-"));
        assert!(!is_valid_fqdn("ex."));
    }
}
