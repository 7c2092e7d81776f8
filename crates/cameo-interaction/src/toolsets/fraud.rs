//! Verification and resolution tools for the case review desk.
//!
//! Tool order is enforced by the verification flow, not by prompt
//! goodwill: transaction details are unreachable until the caller passes
//! the security challenge, and resolutions are unreachable until then.
//! No tool accepts or returns card numbers or credentials.

use std::sync::Arc;

use async_trait::async_trait;

use cameo_core::catalog::{CaseRepository, CaseStatus};
use cameo_core::error::{CameoError, Result};
use cameo_core::fraud::VerificationStage;

use crate::tool::{
    optional_str, required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply,
    ToolSpec, Toolset,
};

const SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "load_case",
        description: "Find the caller's flagged-transaction case by their full name.",
        params: &[ParamSpec::required("name", "The caller's full name.")],
    },
    ToolSpec {
        name: "security_question",
        description: "Read the caller's security question.",
        params: &[],
    },
    ToolSpec {
        name: "verify_identity",
        description: "Check the caller's answer to the security question. One attempt.",
        params: &[ParamSpec::required("answer", "The caller's answer.")],
    },
    ToolSpec {
        name: "confirm_safe",
        description: "Caller recognizes the transaction; mark the case safe.",
        params: &[ParamSpec::optional("note", "Optional note for the case file.")],
    },
    ToolSpec {
        name: "confirm_fraud",
        description: "Caller disowns the transaction; mark the case fraudulent.",
        params: &[ParamSpec::optional("note", "Optional note for the case file.")],
    },
    ToolSpec {
        name: "case_status",
        description: "Where this call stands in the verification flow.",
        params: &[],
    },
];

pub struct FraudToolset {
    cases: Arc<dyn CaseRepository>,
}

impl FraudToolset {
    pub fn new(cases: Arc<dyn CaseRepository>) -> Self {
        Self { cases }
    }

    async fn resolve(
        &self,
        ctx: &mut ToolContext<'_>,
        call: &ToolCall,
        status: CaseStatus,
    ) -> Result<ToolReply> {
        let note = optional_str(call, "note").map(str::to_string);
        let patch = ctx.flow.confirm(status, note)?;
        let name = ctx
            .flow
            .case()
            .map(|case| case.user_name.clone())
            .ok_or_else(|| CameoError::flow("No case loaded."))?;
        self.cases.update_case(&name, patch).await?;
        let text = match status {
            CaseStatus::ConfirmedSafe => {
                "Thank you. I've marked the charge as recognized; no further action is needed."
            }
            _ => {
                "Understood. The charge is marked fraudulent, the card is blocked, and a \
                 replacement is on its way."
            }
        };
        Ok(ToolReply::closing(text))
    }
}

#[async_trait]
impl Toolset for FraudToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        SPECS
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match call.name.as_str() {
            "load_case" => {
                let name = required_str(call, "name")?;
                match self.cases.find_by_name(name).await? {
                    Some(case) => {
                        ctx.flow.load_case(case)?;
                        Ok(ToolReply::say(
                            "I found your review case. Before we go further I need to \
                             verify your identity with a security question.",
                        ))
                    }
                    // A miss is conversational; the flow stays unverified.
                    None => Ok(ToolReply::say(format!(
                        "I don't find a review case under the name {name}. \
                         There's nothing needing your attention today."
                    ))),
                }
            }
            "security_question" => {
                let question = ctx.flow.begin_challenge()?.to_string();
                Ok(ToolReply::say(question))
            }
            "verify_identity" => {
                let answer = required_str(call, "answer")?;
                if ctx.flow.submit_answer(answer)? {
                    let transaction = ctx
                        .flow
                        .case()
                        .map(|case| case.transaction_line())
                        .unwrap_or_default();
                    Ok(ToolReply::say(format!(
                        "You're verified. I'm showing a charge of {transaction}. \
                         Do you recognize it?"
                    )))
                } else {
                    Ok(ToolReply::closing(
                        "That answer doesn't match what we have on file. For your security \
                         I can't continue; please visit a branch with photo ID.",
                    ))
                }
            }
            "confirm_safe" => self.resolve(ctx, call, CaseStatus::ConfirmedSafe).await,
            "confirm_fraud" => self.resolve(ctx, call, CaseStatus::ConfirmedFraud).await,
            "case_status" => {
                let text = match ctx.flow.stage() {
                    VerificationStage::Unverified => "No case is loaded yet.",
                    VerificationStage::CaseLoaded => {
                        "A case is loaded; identity not yet verified."
                    }
                    VerificationStage::VerificationPending => {
                        "Waiting on the security answer."
                    }
                    VerificationStage::Verified => {
                        "Caller verified; awaiting their decision on the charge."
                    }
                    VerificationStage::VerificationFailed => "Verification failed; call closed.",
                    VerificationStage::ConfirmedSafe => "Resolved: charge recognized.",
                    VerificationStage::ConfirmedFraud => "Resolved: charge fraudulent.",
                };
                Ok(ToolReply::say(text))
            }
            _ => Err(unknown_tool("fraud", call)),
        }
    }
}
