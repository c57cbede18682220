use thiserror::Error;

/// Why the intake gate refused a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unsupported file type")]
    UnsupportedType,
    #[error("file exceeds the maximum allowed size")]
    TooLarge,
}

impl Rejection {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedType => {
                "Unsupported file type. Please select a CSV, JSON or XML file."
            }
            Self::TooLarge => "The file is too large for processing.",
        }
    }
}
