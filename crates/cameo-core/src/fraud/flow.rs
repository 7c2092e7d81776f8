//! Caller verification state machine for flagged-transaction review.
//!
//! The stages run strictly forward; the guards live here rather than in
//! prompt text, so a misbehaving driver cannot reach a confirmation
//! without passing verification first.

use strum::Display;

use crate::catalog::{CasePatch, CaseStatus, FraudCase};
use crate::error::{CameoError, Result};

/// Where a review call currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum VerificationStage {
    /// Nothing loaded; the caller has not been identified.
    Unverified,
    /// A case matched the caller's name.
    CaseLoaded,
    /// The security question has been read out.
    VerificationPending,
    /// The caller answered correctly.
    Verified,
    /// Wrong answer. Terminal; the call ends without case details.
    VerificationFailed,
    /// Caller confirmed the transaction as their own. Terminal.
    ConfirmedSafe,
    /// Caller disowned the transaction. Terminal.
    ConfirmedFraud,
}

impl VerificationStage {
    /// True when no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::VerificationFailed | Self::ConfirmedSafe | Self::ConfirmedFraud
        )
    }
}

/// One call's progress through verification.
///
/// Holds the loaded case so later stages can read the question and the
/// transaction without re-querying the repository.
#[derive(Debug, Clone)]
pub struct VerificationFlow {
    stage: VerificationStage,
    case: Option<FraudCase>,
}

impl Default for VerificationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationFlow {
    pub fn new() -> Self {
        Self {
            stage: VerificationStage::Unverified,
            case: None,
        }
    }

    pub fn stage(&self) -> VerificationStage {
        self.stage
    }

    /// The loaded case, once one has been loaded.
    pub fn case(&self) -> Option<&FraudCase> {
        self.case.as_ref()
    }

    /// Attaches a case that matched the caller's name.
    ///
    /// Allowed before verification starts; reloading replaces the previous
    /// case (the caller corrected their name). A lookup miss never reaches
    /// this method, so the flow stays `Unverified` on a miss.
    pub fn load_case(&mut self, case: FraudCase) -> Result<&FraudCase> {
        match self.stage {
            VerificationStage::Unverified | VerificationStage::CaseLoaded => {
                let case = self.case.insert(case);
                self.stage = VerificationStage::CaseLoaded;
                Ok(case)
            }
            stage => Err(CameoError::flow(format!(
                "Cannot load a case at stage {stage}."
            ))),
        }
    }

    /// Hands out the security question and arms the challenge.
    pub fn begin_challenge(&mut self) -> Result<&str> {
        match (&self.stage, &self.case) {
            (VerificationStage::CaseLoaded | VerificationStage::VerificationPending, Some(case)) => {
                self.stage = VerificationStage::VerificationPending;
                Ok(&case.security_question)
            }
            (VerificationStage::Unverified, _) => Err(CameoError::flow("No case loaded.")),
            (stage, _) => Err(CameoError::flow(format!(
                "Verification already settled at stage {stage}."
            ))),
        }
    }

    /// Checks the caller's answer. One attempt only.
    ///
    /// A correct answer moves to `Verified`; a wrong one lands on the
    /// terminal `VerificationFailed`. Returns whether the answer matched.
    pub fn submit_answer(&mut self, answer: &str) -> Result<bool> {
        match (&self.stage, &self.case) {
            (
                VerificationStage::CaseLoaded | VerificationStage::VerificationPending,
                Some(case),
            ) => {
                let matched = case.answer_matches(answer);
                self.stage = if matched {
                    VerificationStage::Verified
                } else {
                    VerificationStage::VerificationFailed
                };
                Ok(matched)
            }
            (VerificationStage::Unverified, _) => Err(CameoError::flow("No case loaded.")),
            (stage, _) => Err(CameoError::flow(format!(
                "Verification already settled at stage {stage}."
            ))),
        }
    }

    /// Records the caller's decision about the flagged transaction.
    ///
    /// Requires `Verified`. Returns the patch the repository should
    /// persist; the flow itself moves to the matching terminal stage.
    pub fn confirm(&mut self, status: CaseStatus, note: Option<String>) -> Result<CasePatch> {
        if self.stage != VerificationStage::Verified {
            return Err(match self.stage {
                VerificationStage::Unverified => CameoError::flow("No case loaded."),
                stage => {
                    CameoError::flow(format!("Cannot confirm before verification ({stage})."))
                }
            });
        }
        self.stage = match status {
            CaseStatus::ConfirmedSafe => VerificationStage::ConfirmedSafe,
            CaseStatus::ConfirmedFraud => VerificationStage::ConfirmedFraud,
            other => {
                return Err(CameoError::flow(format!(
                    "A review call can only confirm safe or fraud, not {other:?}."
                )))
            }
        };
        Ok(CasePatch::new(status, note))
    }
}
