use crate::{Error, Result};

pub const MIN_CONTENT_LENGTH: usize = 5;

/// Content rule shared by create and replace.
pub fn validate_content(content: Option<&str>) -> Result<&str> {
    let Some(content) = content else {
        return Err(Error::Validation(
            "Note validation failed: content: Path `content` is required.".into(),
        ));
    };

    if content.is_empty() {
        return Err(Error::Validation(
            "Note validation failed: content: Path `content` is required.".into(),
        ));
    }

    if content.chars().count() < MIN_CONTENT_LENGTH {
        return Err(Error::Validation(format!(
            "Note validation failed: content: Path `content` (`{content}`) is shorter than the minimum allowed length ({MIN_CONTENT_LENGTH})."
        )));
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimum_length() {
        assert_eq!(validate_content(Some("12345")).unwrap(), "12345");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(validate_content(Some("ñañañ")).is_ok());
        assert!(validate_content(Some("ñañ")).is_err());
    }

    #[test]
    fn rejects_missing_and_empty() {
        for content in [None, Some("")] {
            match validate_content(content) {
                Err(Error::Validation(message)) => assert!(message.contains("is required")),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_short_content() {
        match validate_content(Some("abc")) {
            Err(Error::Validation(message)) => {
                assert!(message.contains("(`abc`) is shorter than the minimum allowed length (5)"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
