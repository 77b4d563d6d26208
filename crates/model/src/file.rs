use serde::{Deserialize, Serialize};

/// Metadata of an uploaded document.
///
/// Only the declared media type and the byte size take part in validation;
/// file content never reaches the engine.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub media_type: String,
    pub byte_size: u64,
}
