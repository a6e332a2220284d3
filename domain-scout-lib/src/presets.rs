//! Named TLD groups for bulk expansion.
//!
//! Presets save users from typing the same TLD lists over and over. Config
//! files can define custom presets that shadow the built-in ones.

use std::collections::HashMap;

/// Get predefined TLD presets for common use cases.
///
/// For custom preset support, use [`get_preset_tlds_with_custom`].
///
/// # Arguments
///
/// * `preset` - The preset name ("startup", "enterprise", "country", ...)
///
/// # Returns
///
/// Optional vector of TLD strings, None if preset doesn't exist.
///
/// # Examples
///
/// ```rust
/// use domain_scout_lib::get_preset_tlds;
///
/// let startup_tlds = get_preset_tlds("startup").unwrap();
/// assert!(startup_tlds.contains(&"io".to_string()));
/// ```
pub fn get_preset_tlds(preset: &str) -> Option<Vec<String>> {
    let tlds: Option<Vec<&str>> = match preset.to_lowercase().as_str() {
        "startup" => Some(vec!["com", "org", "io", "ai", "tech", "app", "dev", "xyz"]),
        "enterprise" => Some(vec!["com", "org", "net", "info", "biz", "us"]),
        "country" => Some(vec!["us", "uk", "de", "fr", "ca", "au", "br", "in", "nl"]),
        "popular" => Some(vec![
            "com", "net", "org", "io", "ai", "app", "dev", "tech", "me", "co", "xyz",
        ]),
        "classic" => Some(vec!["com", "net", "org", "info", "biz"]),
        _ => None,
    };
    tlds.map(|v| v.into_iter().map(|s| s.to_string()).collect())
}

/// Get predefined TLD presets with custom preset support.
///
/// Custom presets from config files are checked first and shadow built-in
/// names.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use domain_scout_lib::get_preset_tlds_with_custom;
///
/// let mut custom = HashMap::new();
/// custom.insert("my_preset".to_string(), vec!["com".to_string(), "dev".to_string()]);
///
/// let tlds = get_preset_tlds_with_custom("my_preset", Some(&custom)).unwrap();
/// assert_eq!(tlds, vec!["com", "dev"]);
/// ```
pub fn get_preset_tlds_with_custom(
    preset: &str,
    custom_presets: Option<&HashMap<String, Vec<String>>>,
) -> Option<Vec<String>> {
    let preset_lower = preset.to_lowercase();

    // Custom presets win over built-ins; check both spellings
    if let Some(custom_map) = custom_presets {
        if let Some(custom_tlds) = custom_map
            .get(preset)
            .or_else(|| custom_map.get(&preset_lower))
        {
            return Some(custom_tlds.clone());
        }
    }

    get_preset_tlds(&preset_lower)
}

/// Get available built-in preset names.
///
/// Useful for CLI help text and validation.
pub fn get_available_presets() -> Vec<&'static str> {
    vec!["classic", "country", "enterprise", "popular", "startup"]
}
