//! The declarative table of synchronous rules.

use {
    crate::{cnpj, predicates},
    model::{
        field::FieldId,
        form::{FieldValue, RegistrationForm},
    },
};

/// One synchronous validation rule.
///
/// Rules are pure and registered once. The table below is the single source
/// of which field is checked with which predicate and message, and its entry
/// order is the order submission reports present their outcomes in.
pub struct Rule {
    pub field: FieldId,
    /// Stable identifier of the rule, for logs and tooling.
    pub name: &'static str,
    /// What the user sees when the rule fails.
    pub message: &'static str,
    check: fn(FieldValue) -> bool,
}

impl Rule {
    /// Runs the rule against the form's current content.
    pub fn passes(&self, form: &RegistrationForm) -> bool {
        (self.check)(form.value(self.field))
    }
}

/// Synchronous rules in the order the form declares its fields. The
/// asynchronous postal-code check is not a table entry; the orchestrator
/// always runs it last.
pub const RULES: &[Rule] = &[
    Rule {
        field: FieldId::Name,
        name: "name_length",
        message: "enter at least 3 characters",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::name(raw)),
    },
    Rule {
        field: FieldId::Cnpj,
        name: "cnpj_checksum",
        message: "invalid CNPJ",
        check: |value| matches!(value, FieldValue::Text(raw) if cnpj::is_valid(raw)),
    },
    Rule {
        field: FieldId::FoundingYear,
        name: "founding_year_range",
        message: "year must be between 1950 and 2025",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::founding_year(raw)),
    },
    Rule {
        field: FieldId::Area,
        name: "area_selected",
        message: "select an area of activity",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::required_text(raw)),
    },
    Rule {
        field: FieldId::Description,
        name: "description_length",
        message: "describe the organization with at least 20 characters",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::description(raw)),
    },
    Rule {
        field: FieldId::Address,
        name: "address_required",
        message: "address is required",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::required_text(raw)),
    },
    Rule {
        field: FieldId::City,
        name: "city_required",
        message: "city is required",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::required_text(raw)),
    },
    Rule {
        field: FieldId::State,
        name: "state_code",
        message: "invalid state code (e.g. SP, RJ, GO)",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::state(raw)),
    },
    Rule {
        field: FieldId::Email,
        name: "email_shape",
        message: "invalid email",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::email(raw)),
    },
    Rule {
        field: FieldId::Phone,
        name: "phone_digits",
        message: "invalid phone, use (DD) 99999-9999",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::phone(raw)),
    },
    Rule {
        field: FieldId::Website,
        name: "website_url",
        message: "invalid URL",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::website(raw)),
    },
    Rule {
        field: FieldId::Responsible,
        name: "responsible_letters",
        message: "use letters and spaces only, at least 3",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::responsible(raw)),
    },
    Rule {
        field: FieldId::Position,
        name: "position_required",
        message: "position is required",
        check: |value| matches!(value, FieldValue::Text(raw) if predicates::required_text(raw)),
    },
    Rule {
        field: FieldId::Document,
        name: "document_constraints",
        message: "invalid file, use PDF, JPEG or PNG up to 5 MiB",
        check: |value| matches!(value, FieldValue::File(meta) if predicates::document(meta)),
    },
];

#[cfg(test)]
pub(crate) mod fixtures {
    use model::{file::FileMeta, form::RegistrationForm};

    /// A form snapshot that passes every synchronous rule.
    pub(crate) fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Instituto Esperança".to_string(),
            cnpj: "11.222.333/0001-81".to_string(),
            founding_year: "1998".to_string(),
            area: "Educação".to_string(),
            description: "Apoio escolar para crianças da zona leste.".to_string(),
            address: "Rua das Flores, 123".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            email: "contato@esperanca.org.br".to_string(),
            phone: "(11) 91234-5678".to_string(),
            website: "https://esperanca.org.br".to_string(),
            responsible: "Maria de Souza".to_string(),
            position: "Presidente".to_string(),
            document: Some(FileMeta {
                media_type: "application/pdf".to_string(),
                byte_size: 512 * 1024,
            }),
            cep: "01310-100".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, strum::IntoEnumIterator};

    #[test]
    fn one_rule_per_synchronous_field_in_declared_order() {
        let fields: Vec<_> = RULES.iter().map(|rule| rule.field).collect();
        let mut ordered = fields.clone();
        ordered.sort();
        ordered.dedup();
        assert_eq!(fields, ordered);
        // Every field except the asynchronous postal-code check has a rule.
        assert_eq!(RULES.len(), FieldId::iter().count() - 1);
        assert!(fields.iter().all(|field| *field != FieldId::Cep));
    }

    #[test]
    fn checks_the_form_through_field_values() {
        let mut form = fixtures::valid_form();
        assert!(RULES.iter().all(|rule| rule.passes(&form)));

        form.document = Some(model::file::FileMeta {
            media_type: "image/gif".to_string(),
            byte_size: 1,
        });
        let failed: Vec<_> = RULES
            .iter()
            .filter(|rule| !rule.passes(&form))
            .map(|rule| rule.name)
            .collect();
        assert_eq!(failed, vec!["document_constraints"]);
    }
}
