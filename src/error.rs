pub type OgcardResult<T> = Result<T, OgcardError>;

#[derive(thiserror::Error, Debug)]
pub enum OgcardError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("raster backend unavailable: {0}")]
    RasterUnavailable(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OgcardError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn raster_unavailable(msg: impl Into<String>) -> Self {
        Self::RasterUnavailable(msg.into())
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
            OgcardError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            OgcardError::raster_unavailable("x")
                .to_string()
                .contains("raster backend unavailable:")
        );
        assert!(
            OgcardError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            OgcardError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = OgcardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
