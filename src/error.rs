pub type NeonveilResult<T> = Result<T, NeonveilError>;

#[derive(thiserror::Error, Debug)]
pub enum NeonveilError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NeonveilError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            NeonveilError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            NeonveilError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            NeonveilError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = NeonveilError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
