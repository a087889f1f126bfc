//! The bank fraud-verification agent.
//!
//! Deterministic scripted phases over the case database: ask for the
//! caller's name, verify their security id, read the flagged transaction
//! back, then resolve the case from their confirm/deny answer. No
//! completion calls — every reply is derived from the case row.

use tokio::sync::Mutex;
use uuid::Uuid;

use parley_db::{lookup_case, resolve_case, CaseDbError, CasePool};
use parley_types::{CaseStatus, FraudCase};
use thiserror::Error;

/// Errors from the fraud verification flow.
#[derive(Debug, Error)]
pub enum FraudError {
    /// A case-store operation failed.
    #[error(transparent)]
    Db(#[from] CaseDbError),

    /// Checking out a pooled connection failed.
    #[error("case database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Resolution was attempted before a case was looked up.
    #[error("no active case: verify the caller before resolving")]
    NoActiveCase,

    /// The verification already concluded.
    #[error("verification already concluded")]
    SessionFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FraudPhase {
    AskName,
    VerifyId,
    Confirm,
    Done,
}

struct FraudTurn {
    phase: FraudPhase,
    case: Option<FraudCase>,
}

/// A live fraud-verification call.
pub struct FraudSession {
    pool: CasePool,
    session_id: Uuid,
    turn: Mutex<FraudTurn>,
}

impl FraudSession {
    pub fn new(pool: CasePool) -> Self {
        Self {
            pool,
            session_id: Uuid::new_v4(),
            turn: Mutex::new(FraudTurn {
                phase: FraudPhase::AskName,
                case: None,
            }),
        }
    }

    pub fn greeting(&self) -> &'static str {
        "Hello, this is the card security team at Meridian Bank. We've flagged a \
         transaction on an account and need to verify it with you. Could I have \
         your first name, please?"
    }

    pub async fn is_finished(&self) -> bool {
        self.turn.lock().await.phase == FraudPhase::Done
    }

    /// Handles one utterance of the verification script.
    ///
    /// Each phase either advances on a valid answer or repeats its question.
    /// A name with no matching case, or a wrong security id, keeps the call
    /// in its current phase.
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::SessionFinished`] after the case has been
    /// resolved, or a database error if the store fails mid-call.
    pub async fn handle_utterance(&self, text: &str) -> Result<String, FraudError> {
        let mut turn = self.turn.lock().await;
        let text = text.trim();

        match turn.phase {
            FraudPhase::AskName => {
                let conn = self.pool.get()?;
                match lookup_case(&conn, text)? {
                    Some(case) => {
                        tracing::info!(
                            session = %self.session_id,
                            case_id = case.id,
                            "case found for caller"
                        );
                        turn.case = Some(case);
                        turn.phase = FraudPhase::VerifyId;
                        Ok("Thank you. For verification, could you read me your \
                            five-digit security id?"
                            .to_string())
                    }
                    None => {
                        tracing::info!(session = %self.session_id, "no case for caller name");
                        Ok("I'm sorry, I don't see any flagged transaction under that \
                            name. Could you spell the name exactly as it appears on \
                            the account?"
                            .to_string())
                    }
                }
            }

            FraudPhase::VerifyId => {
                let case = turn.case.as_ref().ok_or(FraudError::NoActiveCase)?;
                let given: String = text.chars().filter(char::is_ascii_digit).collect();
                if given == case.security_id {
                    let reply = read_back(case);
                    turn.phase = FraudPhase::Confirm;
                    Ok(reply)
                } else {
                    tracing::warn!(session = %self.session_id, "security id mismatch");
                    Ok("That doesn't match what we have on file. Could you read your \
                        security id again, digit by digit?"
                        .to_string())
                }
            }

            FraudPhase::Confirm => {
                let Some(verdict) = parse_verdict(text) else {
                    return Ok("Just to be clear: did you make this transaction, \
                        yes or no?"
                        .to_string());
                };
                let reply = self.resolve_active(&turn, verdict).await?;
                turn.phase = FraudPhase::Done;
                Ok(reply)
            }

            FraudPhase::Done => Err(FraudError::SessionFinished),
        }
    }

    /// Resolves the active case. Guarded: without a prior successful lookup
    /// there is nothing to resolve.
    async fn resolve_active(
        &self,
        turn: &FraudTurn,
        verdict: Verdict,
    ) -> Result<String, FraudError> {
        let case = turn.case.as_ref().ok_or(FraudError::NoActiveCase)?;
        let conn = self.pool.get()?;

        let (status, notes, reply) = match verdict {
            Verdict::Recognized => (
                CaseStatus::ConfirmedSafe,
                "Customer confirmed the transaction over the phone".to_string(),
                "Great, I've marked the transaction as confirmed and your card stays \
                 active. Thanks for your time!"
                    .to_string(),
            ),
            Verdict::Denied => (
                CaseStatus::ConfirmedFraud,
                "Customer denied the transaction over the phone".to_string(),
                "Understood. I've flagged it as fraud, blocked the card ending in \
                 that number, and a replacement is on its way. You won't be charged."
                    .to_string(),
            ),
        };

        resolve_case(&conn, case.id, status, &notes)?;
        tracing::info!(
            session = %self.session_id,
            case_id = case.id,
            status = %status,
            "verification concluded"
        );
        Ok(reply)
    }
}

#[derive(Debug, Clone, Copy)]
enum Verdict {
    Recognized,
    Denied,
}

fn parse_verdict(text: &str) -> Option<Verdict> {
    let lower = text.to_lowercase();
    let deny = ["no", "not", "didn't", "did not", "fraud", "never"];
    let affirm = ["yes", "yeah", "yep", "i did", "that was me", "recognize"];

    if deny.iter().any(|needle| contains_word(&lower, needle)) {
        Some(Verdict::Denied)
    } else if affirm.iter().any(|needle| contains_word(&lower, needle)) {
        Some(Verdict::Recognized)
    } else {
        None
    }
}

// Whole-word containment, so "no" does not match inside "know".
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.contains(' ') {
        return haystack.contains(needle);
    }
    haystack
        .split(|ch: char| !ch.is_alphanumeric() && ch != '\'')
        .any(|word| word == needle)
}

fn read_back(case: &FraudCase) -> String {
    format!(
        "Thanks, you're verified. We flagged a charge of ${amount:.2} at \
         {description} via {website} at {time}, on the card ending {card}. \
         Do you recognize this transaction?",
        amount = case.transaction_amount,
        description = case.transaction_description.trim(),
        website = case.transaction_website,
        time = case.transaction_time,
        card = case.card_ending,
    )
}
