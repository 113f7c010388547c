use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use super::error::PurchaseError;
use crate::model::{DeliveryRecord, PaymentRecord, ProductLine};

/// Body of a purchase call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub products: Vec<ProductLine>,
    pub delivery: DeliveryRecord,
    pub payment: PaymentRecord,
}

impl PurchaseRequest {
    /// Encodes the request as the JSON body sent to the checkout endpoint.
    pub fn to_json(&self) -> Result<String, PurchaseError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Successful purchase response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub order_id: String,
}

impl PurchaseReceipt {
    /// Decodes a response body such as `{"orderId":"abc123"}`.
    pub fn from_json(body: &str) -> Result<Self, PurchaseError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// The external purchase operation.
///
/// The returned future is `!Send`: purchases run on the UI thread's local
/// task set. Errors are handed back to the caller unchanged.
pub trait PurchaseApi {
    fn purchase(
        &self,
        request: PurchaseRequest,
    ) -> LocalBoxFuture<'_, Result<PurchaseReceipt, PurchaseError>>;
}
