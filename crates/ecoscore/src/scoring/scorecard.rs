//! Review lifecycle of a published score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardState {
    Draft,
    InReview,
    Certified,
    Deprecated,
}

impl ScorecardState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "InReview",
            Self::Certified => "Certified",
            Self::Deprecated => "Deprecated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardAction {
    Edit,
    SubmitForReview,
    Certify,
    Deprecate,
}

impl ScorecardAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::SubmitForReview => "submit for review",
            Self::Certify => "certify",
            Self::Deprecate => "deprecate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScorecardError {
    #[error("cannot {} a scorecard in state {}", .action.label(), .state.label())]
    InvalidTransition {
        action: ScorecardAction,
        state: ScorecardState,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTransition {
    pub from: ScorecardState,
    pub to: ScorecardState,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scorecard {
    pub id: String,
    pub product_name: String,
    pub score: f64,
    state: ScorecardState,
    transitions: Vec<StateTransition>,
}

impl Scorecard {
    pub fn new(id: impl Into<String>, product_name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            product_name: product_name.into(),
            score,
            state: ScorecardState::Draft,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> ScorecardState {
        self.state
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn edit(&mut self) -> Result<ScorecardState, ScorecardError> {
        self.apply(ScorecardAction::Edit)
    }

    pub fn submit_for_review(&mut self) -> Result<ScorecardState, ScorecardError> {
        self.apply(ScorecardAction::SubmitForReview)
    }

    pub fn certify(&mut self) -> Result<ScorecardState, ScorecardError> {
        self.apply(ScorecardAction::Certify)
    }

    pub fn deprecate(&mut self) -> Result<ScorecardState, ScorecardError> {
        self.apply(ScorecardAction::Deprecate)
    }

    /// Editing a draft leaves it a draft and records nothing.
    pub fn apply(&mut self, action: ScorecardAction) -> Result<ScorecardState, ScorecardError> {
        use ScorecardAction as A;
        use ScorecardState as S;

        let next = match (self.state, action) {
            (S::Draft, A::Edit) => return Ok(S::Draft),
            (S::Draft, A::SubmitForReview) => S::InReview,
            (S::InReview, A::Edit) => S::Draft,
            (S::InReview, A::Certify) => S::Certified,
            (S::Certified, A::Deprecate) => S::Deprecated,
            (state, action) => return Err(ScorecardError::InvalidTransition { action, state }),
        };

        self.transitions.push(StateTransition {
            from: self.state,
            to: next,
            at: Utc::now(),
        });
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_deprecated() {
        let mut card = Scorecard::new("sc-1", "Linen Shirt", 71.5);
        assert_eq!(card.state(), ScorecardState::Draft);
        assert_eq!(card.edit(), Ok(ScorecardState::Draft));
        assert!(card.transitions().is_empty());

        card.submit_for_review().expect("draft can be submitted");
        card.certify().expect("review can certify");
        card.deprecate().expect("certified can be deprecated");

        assert_eq!(card.state(), ScorecardState::Deprecated);
        let path: Vec<_> = card.transitions().iter().map(|t| t.to).collect();
        assert_eq!(
            path,
            vec![
                ScorecardState::InReview,
                ScorecardState::Certified,
                ScorecardState::Deprecated
            ]
        );
    }

    #[test]
    fn review_can_return_to_draft() {
        let mut card = Scorecard::new("sc-2", "Tote", 40.0);
        card.submit_for_review().expect("submit");
        assert_eq!(card.edit(), Ok(ScorecardState::Draft));
    }

    #[test]
    fn rejects_out_of_order_transitions() {
        let mut card = Scorecard::new("sc-3", "Parka", 12.0);
        let err = card.certify().expect_err("drafts cannot be certified");
        assert_eq!(
            err,
            ScorecardError::InvalidTransition {
                action: ScorecardAction::Certify,
                state: ScorecardState::Draft,
            }
        );
        assert_eq!(err.to_string(), "cannot certify a scorecard in state Draft");

        card.submit_for_review().expect("submit");
        card.certify().expect("certify");
        assert!(card.edit().is_err());
        assert!(card.submit_for_review().is_err());
        card.deprecate().expect("deprecate");
        assert!(card.deprecate().is_err());
        assert_eq!(card.state(), ScorecardState::Deprecated);
    }
}
