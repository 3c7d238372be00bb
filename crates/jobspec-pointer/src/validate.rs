//! Length limits for JSON Pointers.

use crate::PointerError;

/// Maximum allowed pointer string length.
pub const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validates the shape of a JSON Pointer string.
///
/// ```
/// use jobspec_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/spec/template").unwrap();
/// validate_json_pointer("spec").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), PointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::MissingLeadingSlash(pointer.to_string()));
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(PointerError::TooLong(pointer.len()));
    }
    Ok(())
}

/// Validates the depth of a path.
pub fn validate_path(path: &[String]) -> Result<(), PointerError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PointerError::PathTooLong(path.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_pointer() {
        assert!(validate_json_pointer("").is_ok());
    }

    #[test]
    fn test_validate_absolute_pointer() {
        assert!(validate_json_pointer("/").is_ok());
        assert!(validate_json_pointer("/foo/bar").is_ok());
    }

    #[test]
    fn test_validate_long_pointer() {
        let long_pointer = "/".to_string() + &"a".repeat(2000);
        assert_eq!(
            validate_json_pointer(&long_pointer),
            Err(PointerError::TooLong(2001))
        );
    }

    #[test]
    fn test_validate_max_length_path() {
        let path: Vec<String> = (0..MAX_PATH_LENGTH).map(|i| i.to_string()).collect();
        assert!(validate_path(&path).is_ok());
    }

    #[test]
    fn test_validate_long_path() {
        let path: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        assert_eq!(validate_path(&path), Err(PointerError::PathTooLong(300)));
    }
}
