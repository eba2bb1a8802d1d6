use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text to analyze")]
    EmptyInput,
}

/// Trimmed, non-empty text that is allowed to reach the detection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInput(String);

impl ValidInput {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate(input: &str) -> Result<ValidInput, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(ValidInput(trimmed.to_string()))
}
