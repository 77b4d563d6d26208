use {
    crate::{
        report::{FieldOutcome, SubmissionReport, Verdict},
        rules::RULES,
    },
    model::{cep::Cep, field::FieldId, form::RegistrationForm},
    std::sync::Arc,
    viacep::{
        api::Address,
        resolver::{CepResolving, ResolveError},
    },
};

/// Message for a postal code that does not have 8 digits.
pub const CEP_FORMAT_MESSAGE: &str = "invalid postal code, use 8 digits";
/// Message for a structurally fine postal code the service does not know.
pub const CEP_NOT_FOUND_MESSAGE: &str = "postal code not found";
/// Message when the lookup itself failed and retrying may help.
pub const CEP_UNAVAILABLE_MESSAGE: &str = "could not verify postal code right now, retry";

/// Outcome of the postal-code check: the verdict plus, on success, the
/// address the service returned, which hosts typically autofill from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CepCheck {
    pub verdict: Verdict,
    pub address: Option<Address>,
}

/// Drives the synchronous rule table plus the asynchronous postal-code
/// check.
///
/// The resolver handle is the one piece of shared state, constructed once by
/// the host; the validator itself keeps nothing between runs and every run
/// produces a fresh report.
pub struct FormValidator {
    resolver: Arc<dyn CepResolving>,
}

impl FormValidator {
    pub fn new(resolver: Arc<dyn CepResolving>) -> Self {
        Self { resolver }
    }

    /// Checks a single field, as hosts do when an input loses focus.
    ///
    /// Only [`FieldId::Cep`] suspends; every other field answers from the
    /// rule table immediately.
    pub async fn validate_field(&self, form: &RegistrationForm, field: FieldId) -> Verdict {
        if field == FieldId::Cep {
            return self.check_cep(&form.cep).await.verdict;
        }
        let failed = RULES
            .iter()
            .filter(|rule| rule.field == field)
            .find(|rule| !rule.passes(form));
        match failed {
            Some(rule) => {
                tracing::debug!(field = %rule.field, rule = rule.name, "field failed validation");
                Verdict::invalid(rule.message)
            }
            None => Verdict::Valid,
        }
    }

    /// Checks a whole submission.
    ///
    /// Synchronous rules run first, in the order the form declares its
    /// fields. The postal-code check always runs afterwards, even when a
    /// synchronous rule already failed, so that its answer lands in the
    /// cache and the report covers every field. Submission is allowed only
    /// if everything passed.
    pub async fn validate_submission(&self, form: &RegistrationForm) -> SubmissionReport {
        let mut outcomes: Vec<FieldOutcome> = RULES
            .iter()
            .map(|rule| {
                let verdict = if rule.passes(form) {
                    Verdict::Valid
                } else {
                    tracing::debug!(
                        field = %rule.field,
                        rule = rule.name,
                        "field failed validation"
                    );
                    Verdict::invalid(rule.message)
                };
                FieldOutcome {
                    field: rule.field,
                    verdict,
                }
            })
            .collect();

        let cep = self.check_cep(&form.cep).await;
        outcomes.push(FieldOutcome {
            field: FieldId::Cep,
            verdict: cep.verdict,
        });

        let report = SubmissionReport::new(outcomes, cep.address);
        match report.first_failing {
            None => tracing::debug!("submission passed validation"),
            Some(field) => tracing::debug!(%field, "submission blocked"),
        }
        report
    }

    /// Runs the full postal-code check: structure first, then the service
    /// lookup. Exposed on its own so hosts can autofill address inputs from
    /// the returned payload.
    pub async fn check_cep(&self, raw: &str) -> CepCheck {
        let cep: Cep = match raw.parse() {
            Ok(cep) => cep,
            Err(_) => {
                return CepCheck {
                    verdict: Verdict::invalid(CEP_FORMAT_MESSAGE),
                    address: None,
                };
            }
        };
        match self.resolver.resolve(cep).await {
            Ok(address) => CepCheck {
                verdict: Verdict::Valid,
                address: Some(address),
            },
            Err(ResolveError::NotFound) => CepCheck {
                verdict: Verdict::invalid(CEP_NOT_FOUND_MESSAGE),
                address: None,
            },
            Err(ResolveError::Transport(_)) => CepCheck {
                verdict: Verdict::unverified(CEP_UNAVAILABLE_MESSAGE),
                address: None,
            },
        }
    }
}
