use crate::error::VotingError;

/// Rejects text whose UTF-8 encoding is longer than `max_len` bytes.
pub fn validate_text(value: &str, max_len: usize) -> core::result::Result<(), VotingError> {
    if value.len() > max_len {
        return Err(VotingError::FieldTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_counts_bytes_not_chars() {
        // 10 chars, 30 bytes
        let name = "选择我们班的新班长好";
        assert!(validate_text(name, 30).is_ok());
        assert!(matches!(
            validate_text(name, 29),
            Err(VotingError::FieldTooLong)
        ));
        assert!(validate_text("", 0).is_ok());
    }
}
