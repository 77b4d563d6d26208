use {
    serde::{Deserialize, Serialize},
    strum::{Display, EnumIter, EnumString},
};

/// Identifier of every field the engine knows about.
///
/// Variants are declared in the order the form declares its inputs, with the
/// postal code last because its check is the one asynchronous rule and always
/// runs after the synchronous ones. The derived `Ord` follows declaration
/// order, which is what makes "first failing field" well defined.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum FieldId {
    Name,
    Cnpj,
    FoundingYear,
    Area,
    Description,
    Address,
    City,
    State,
    Email,
    Phone,
    Website,
    Responsible,
    Position,
    Document,
    Cep,
}
