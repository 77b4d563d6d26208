use {
    model::field::FieldId,
    serde::{Deserialize, Serialize},
    viacep::api::Address,
};

/// Outcome of checking one field.
///
/// `Unverified` is deliberately distinct from `Invalid`: it means the
/// auxiliary lookup could not complete, so the data may well be correct and
/// the user should retry instead of editing the field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Verdict {
    Valid,
    Invalid { message: String },
    Unverified { message: String },
}

impl Verdict {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn unverified(message: impl Into<String>) -> Self {
        Self::Unverified {
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The user-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } | Self::Unverified { message } => Some(message),
        }
    }
}

/// One checked field of a submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutcome {
    pub field: FieldId,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Result of a full-submission run. Produced fresh on every attempt and
/// never persisted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Every checked field, in the order the form declares them, with the
    /// postal code last.
    pub outcomes: Vec<FieldOutcome>,
    /// The field that should receive focus: the first one whose verdict
    /// blocks submission.
    pub first_failing: Option<FieldId>,
    /// The looked-up address when the postal code resolved, for host-side
    /// autofill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_address: Option<Address>,
}

impl SubmissionReport {
    pub(crate) fn new(outcomes: Vec<FieldOutcome>, cep_address: Option<Address>) -> Self {
        let first_failing = outcomes
            .iter()
            .find(|outcome| !outcome.verdict.is_valid())
            .map(|outcome| outcome.field);
        Self {
            outcomes,
            first_failing,
            cep_address,
        }
    }

    /// True when nothing blocks the submission.
    pub fn is_submittable(&self) -> bool {
        self.first_failing.is_none()
    }

    /// True when the only blockers are transient lookup failures, meaning an
    /// unchanged resubmission may go through.
    pub fn only_transient_failures(&self) -> bool {
        !self.is_submittable()
            && self.outcomes.iter().all(|outcome| {
                matches!(outcome.verdict, Verdict::Valid | Verdict::Unverified { .. })
            })
    }

    /// The verdict recorded for one field.
    pub fn verdict(&self, field: FieldId) -> Option<&Verdict> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.field == field)
            .map(|outcome| &outcome.verdict)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn first_blocker_follows_outcome_order() {
        let report = SubmissionReport::new(
            vec![
                FieldOutcome {
                    field: FieldId::Name,
                    verdict: Verdict::Valid,
                },
                FieldOutcome {
                    field: FieldId::Email,
                    verdict: Verdict::invalid("invalid email"),
                },
                FieldOutcome {
                    field: FieldId::Cep,
                    verdict: Verdict::invalid("postal code not found"),
                },
            ],
            None,
        );
        assert_eq!(report.first_failing, Some(FieldId::Email));
        assert!(!report.is_submittable());
        assert!(!report.only_transient_failures());
    }

    #[test]
    fn transient_only_blockers_are_flagged_as_such() {
        let report = SubmissionReport::new(
            vec![
                FieldOutcome {
                    field: FieldId::Name,
                    verdict: Verdict::Valid,
                },
                FieldOutcome {
                    field: FieldId::Cep,
                    verdict: Verdict::unverified("could not verify postal code right now, retry"),
                },
            ],
            None,
        );
        assert_eq!(report.first_failing, Some(FieldId::Cep));
        assert!(report.only_transient_failures());
    }

    #[test]
    fn serializes_tagged_outcomes() {
        let outcome = FieldOutcome {
            field: FieldId::Email,
            verdict: Verdict::invalid("invalid email"),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"field": "email", "outcome": "invalid", "message": "invalid email"})
        );

        let valid = FieldOutcome {
            field: FieldId::FoundingYear,
            verdict: Verdict::Valid,
        };
        assert_eq!(
            serde_json::to_value(&valid).unwrap(),
            json!({"field": "foundingYear", "outcome": "valid"})
        );
    }
}
