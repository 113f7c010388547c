use std::cell::Cell;
use std::fmt;
use std::time::Duration;

use chrono::Local;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::json;
use tracing::debug;

use super::api::{PurchaseApi, PurchaseReceipt, PurchaseRequest};
use super::error::PurchaseError;

/// Offline stand-in for the checkout endpoint.
///
/// Encodes each request as the endpoint would receive it, waits `latency`,
/// and answers with sequential order ids (`YYYYMMDD-0001`, ...). Empty carts
/// are rejected.
pub struct SimulatedCheckout {
    latency: Duration,
    next_order: Cell<u32>,
    calls: Cell<usize>,
    failure: Cell<Option<(u16, String)>>,
}

impl fmt::Debug for SimulatedCheckout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedCheckout")
            .field("latency", &self.latency)
            .field("calls", &self.calls.get())
            .finish_non_exhaustive()
    }
}

impl Default for SimulatedCheckout {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

impl SimulatedCheckout {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            next_order: Cell::new(1),
            calls: Cell::new(0),
            failure: Cell::new(None),
        }
    }

    /// Makes the next purchase fail with the given status and message.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.failure.set(Some((status, message.into())));
    }

    /// Number of purchase calls received.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn next_order_id(&self) -> String {
        let n = self.next_order.get();
        self.next_order.set(n + 1);
        format!("{}-{n:04}", Local::now().format("%Y%m%d"))
    }
}

impl PurchaseApi for SimulatedCheckout {
    fn purchase(
        &self,
        request: PurchaseRequest,
    ) -> LocalBoxFuture<'_, Result<PurchaseReceipt, PurchaseError>> {
        async move {
            self.calls.set(self.calls.get() + 1);
            let body = request.to_json()?;
            debug!(
                bytes = body.len(),
                products = request.products.len(),
                "purchase request sent"
            );
            tokio::time::sleep(self.latency).await;

            if let Some((status, message)) = self.failure.take() {
                return Err(PurchaseError::Rejected { status, message });
            }
            if request.products.is_empty() {
                return Err(PurchaseError::Rejected {
                    status: 400,
                    message: "cart is empty".into(),
                });
            }

            let response = json!({ "orderId": self.next_order_id() }).to_string();
            PurchaseReceipt::from_json(&response)
        }
        .boxed_local()
    }
}
