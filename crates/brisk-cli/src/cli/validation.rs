use brisk_bundler::is_valid_identifier;

/// Parse and validate a global variable name for IIFE bundles.
///
/// Accepts ASCII identifiers and dotted paths (`MyLib.tools`). Reserved words
/// are rejected.
///
/// # Errors
///
/// Returns an error message if the name is not usable as a global.
pub fn parse_global(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Global name cannot be empty".to_string());
    }

    if !is_valid_identifier(s) {
        return Err(format!(
            "Global name must be a JavaScript identifier (letters, digits, '_' or '$', not starting with a digit): '{}'",
            s
        ));
    }

    Ok(s.to_string())
}
