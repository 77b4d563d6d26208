use {
    crate::{field::FieldId, file::FileMeta},
    serde::{Deserialize, Serialize},
};

/// Raw snapshot of the registration form.
///
/// Every text input arrives exactly as the user left it, mask characters
/// included; nothing is normalized before validation. Fields the snapshot
/// omits deserialize to the empty string, which the engine treats the same
/// way as a field the user never touched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub cnpj: String,
    pub founding_year: String,
    pub area: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub responsible: String,
    pub position: String,
    pub document: Option<FileMeta>,
    pub cep: String,
}

impl RegistrationForm {
    /// Borrowed view of one field's current content.
    pub fn value(&self, field: FieldId) -> FieldValue<'_> {
        match field {
            FieldId::Name => FieldValue::Text(&self.name),
            FieldId::Cnpj => FieldValue::Text(&self.cnpj),
            FieldId::FoundingYear => FieldValue::Text(&self.founding_year),
            FieldId::Area => FieldValue::Text(&self.area),
            FieldId::Description => FieldValue::Text(&self.description),
            FieldId::Address => FieldValue::Text(&self.address),
            FieldId::City => FieldValue::Text(&self.city),
            FieldId::State => FieldValue::Text(&self.state),
            FieldId::Email => FieldValue::Text(&self.email),
            FieldId::Phone => FieldValue::Text(&self.phone),
            FieldId::Website => FieldValue::Text(&self.website),
            FieldId::Responsible => FieldValue::Text(&self.responsible),
            FieldId::Position => FieldValue::Text(&self.position),
            FieldId::Document => FieldValue::File(self.document.as_ref()),
            FieldId::Cep => FieldValue::Text(&self.cep),
        }
    }
}

/// A field is either a text input or the document upload.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Text(&'a str),
    File(Option<&'a FileMeta>),
}
