use serde::{Deserialize, Serialize};

/// Where and to whom an order is delivered.
///
/// Built by the delivery form only after every field passes validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub receiver: String,
    pub address: Address,
    /// Contact details, captured by the extended delivery form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// Card captured inline by the extended delivery form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<InlineCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub description: String,
    pub city: String,
    pub number: u32,
    pub zip_code: String,
    pub complement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

/// Card details typed on the delivery screen.
///
/// The payment screen can prefill itself from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineCard {
    pub number: String,
    pub code: u16,
    pub expires: super::Expires,
}
