use std::fmt;

use crate::errors::error_types::ErrorTypes;

/// Access token for a map provider.
///
/// Held in memory only. The value is never logged: `Debug` prints a redacted
/// form.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Builds a token from user input, kept exactly as typed.
    ///
    /// Only emptiness is checked here; the provider decides whether the value
    /// is usable.
    ///
    /// # Returns
    /// `Result<AccessToken, ErrorTypes>` - An `InvalidToken` error for an empty
    /// string.
    pub fn parse(input: &str) -> Result<Self, ErrorTypes> {
        if input.is_empty() {
            return Err(ErrorTypes::invalid_token(
                100,
                "Access token must not be empty".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(3).collect();
        write!(f, "AccessToken({}…)", prefix)
    }
}
