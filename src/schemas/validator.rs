use crate::error::{ContractError, Result};
use tracing::warn;

/// How contract properties beyond the JSON schema are enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Any violation fails the response as malformed
    #[default]
    Strict,
    /// Violations are logged and the response is accepted as-is
    BestEffort,
}

impl ValidationMode {
    pub fn enforce(&self, violations: Vec<String>) -> Result<()> {
        if violations.is_empty() {
            return Ok(());
        }

        match self {
            ValidationMode::Strict => Err(ContractError::MalformedResponse(format!(
                "contract violated: {}",
                violations.join("; ")
            ))),
            ValidationMode::BestEffort => {
                for violation in &violations {
                    warn!(target: "travel_buddy::validation", %violation, "accepting itinerary despite violation");
                }
                Ok(())
            }
        }
    }
}
