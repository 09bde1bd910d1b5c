//! Input fragment validation.

use crate::error::SessionError;

/// Upper bound on a single appended fragment, in bytes. Servers cap frame
/// sizes well above this; the limit mostly catches callers that forgot to
/// split their input.
pub const MAX_FRAGMENT_BYTES: usize = 64 * 1024;

/// Reject fragments the server would bounce: empty or whitespace-only
/// text, and fragments over [`MAX_FRAGMENT_BYTES`].
pub fn validate_input_fragment(text: &str) -> Result<(), SessionError> {
    if text.trim().is_empty() {
        return Err(SessionError::InvalidInput(
            "input fragment is empty".to_string(),
        ));
    }
    if text.len() > MAX_FRAGMENT_BYTES {
        return Err(SessionError::InvalidInput(format!(
            "input fragment is {} bytes, limit is {}",
            text.len(),
            MAX_FRAGMENT_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_text() {
        assert!(validate_input_fragment("Hello, world.").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(
            validate_input_fragment(""),
            Err(SessionError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_input_fragment("   \n\t"),
            Err(SessionError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_oversized_fragment() {
        let big = "a".repeat(MAX_FRAGMENT_BYTES + 1);
        assert!(matches!(
            validate_input_fragment(&big),
            Err(SessionError::InvalidInput(_))
        ));
    }
}
