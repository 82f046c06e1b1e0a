//! Utility functions for the voicescribe dictation backend

use std::path::Path;

/// Validate file extension against an allow-list
#[must_use]
pub fn validate_file_extension(filename: &str, allowed: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            allowed
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Generate a unique filename for staging
#[must_use]
pub fn generate_staging_filename(original: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("{uuid}_{}", sanitize_filename(original))
}

/// Sanitize filename for safe storage
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            match c {
                // Keep alphanumeric, dots, underscores, and hyphens
                c if c.is_alphanumeric() || c == '.' || c == '_' || c == '-' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}
