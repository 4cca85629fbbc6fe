// Typed wrappers over the admin API endpoints.
//
// Each method goes through the `ApiClient` verb helpers, so failures are
// reported the same way as raw calls, then strips the `{ ok, data }`
// envelope.

use serde::de::DeserializeOwned;
use serde_json::json;
use url::form_urlencoded;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    BinConfig, DashboardSummary, DeviceBin, DeviceList, Envelope, Health, MaterialCatalog,
    MaterialUpdate, Message, NewMaterial, Order, OrderList,
};

/// Filters for `GET /devices`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default)]
pub struct DeviceQuery {
    pub merchant_id: Option<String>,
    pub status: Option<String>,
    pub model: Option<String>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl DeviceQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "merchant_id", self.merchant_id.as_deref());
        push_opt(&mut pairs, "status", self.status.as_deref());
        push_opt(&mut pairs, "model", self.model.as_deref());
        push_opt(&mut pairs, "query", self.query.as_deref());
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        pairs
    }
}

/// Date range (`YYYYMMDD`) and merchant filter for `GET /dashboard/summary`.
#[derive(Debug, Clone, Default)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub merchant_id: Option<String>,
}

impl SummaryQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "from", self.from.as_deref());
        push_opt(&mut pairs, "to", self.to.as_deref());
        push_opt(&mut pairs, "merchant_id", self.merchant_id.as_deref());
        pairs
    }
}

/// Filters for `GET /orders`. Dates are `YYYYMMDD`.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub device_id: Option<String>,
    pub merchant_id: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub payment_status: Option<String>,
    pub order_status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl OrderQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "device_id", self.device_id.as_deref());
        push_opt(&mut pairs, "merchant_id", self.merchant_id.as_deref());
        push_opt(&mut pairs, "from_date", self.from_date.as_deref());
        push_opt(&mut pairs, "to_date", self.to_date.as_deref());
        push_opt(&mut pairs, "payment_status", self.payment_status.as_deref());
        push_opt(&mut pairs, "order_status", self.order_status.as_deref());
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        pairs
    }
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_owned()));
    }
}

impl ApiClient {
    /// `GET /health`
    pub async fn health(&self) -> Result<Health, Error> {
        self.get_data("/health", Vec::new()).await
    }

    /// `GET /dashboard/summary`
    pub async fn dashboard_summary(&self, query: &SummaryQuery) -> Result<DashboardSummary, Error> {
        self.get_data("/dashboard/summary", query.to_pairs()).await
    }

    /// `GET /devices`
    pub async fn list_devices(&self, query: &DeviceQuery) -> Result<DeviceList, Error> {
        self.get_data("/devices", query.to_pairs()).await
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// `GET /orders`
    pub async fn list_orders(&self, query: &OrderQuery) -> Result<OrderList, Error> {
        self.get_data("/orders", query.to_pairs()).await
    }

    /// `GET /orders/{id}`
    pub async fn get_order(&self, order_id: &str) -> Result<Order, Error> {
        self.get_data(&format!("/orders/{}", segment(order_id)), Vec::new())
            .await
    }

    /// `POST /orders/{id}/refund`. Only paid orders can be refunded.
    pub async fn refund_order(&self, order_id: &str) -> Result<Message, Error> {
        let endpoint = format!("/orders/{}/refund", segment(order_id));
        let envelope = self.post(&endpoint, &json!({})).await?;
        self.unwrap_envelope(&endpoint, envelope)
    }

    /// `GET /orders/export`
    pub async fn export_orders(&self, query: &OrderQuery) -> Result<Message, Error> {
        self.get_data("/orders/export", query.to_pairs()).await
    }

    /// `GET /orders/{id}/receipt`
    pub async fn order_receipt(&self, order_id: &str) -> Result<Message, Error> {
        self.get_data(&format!("/orders/{}/receipt", segment(order_id)), Vec::new())
            .await
    }

    // ── Materials ────────────────────────────────────────────────────

    /// `GET /materials`
    pub async fn list_materials(&self) -> Result<MaterialCatalog, Error> {
        self.get_data("/materials", Vec::new()).await
    }

    /// `POST /materials`
    pub async fn create_material(&self, material: &NewMaterial) -> Result<Message, Error> {
        let envelope = self.post("/materials", material).await?;
        self.unwrap_envelope("/materials", envelope)
    }

    /// `PUT /materials/{code}`
    pub async fn update_material(
        &self,
        code: &str,
        update: &MaterialUpdate,
    ) -> Result<Message, Error> {
        let endpoint = format!("/materials/{}", segment(code));
        let envelope = self.put(&endpoint, update).await?;
        self.unwrap_envelope(&endpoint, envelope)
    }

    /// `DELETE /materials/{code}`
    pub async fn delete_material(&self, code: &str) -> Result<Message, Error> {
        let endpoint = format!("/materials/{}", segment(code));
        let envelope = self.delete(&endpoint).await?;
        self.unwrap_envelope(&endpoint, envelope)
    }

    /// `GET /devices/{id}/bins`
    pub async fn device_bins(&self, device_id: &str) -> Result<Vec<DeviceBin>, Error> {
        self.get_data(&format!("/devices/{}/bins", segment(device_id)), Vec::new())
            .await
    }

    /// `PUT /devices/{id}/bins` with `{ "bins": [...] }`.
    pub async fn update_device_bins(
        &self,
        device_id: &str,
        bins: &[BinConfig],
    ) -> Result<Message, Error> {
        let endpoint = format!("/devices/{}/bins", segment(device_id));
        let envelope = self.put(&endpoint, &json!({ "bins": bins })).await?;
        self.unwrap_envelope(&endpoint, envelope)
    }

    /// `POST /devices/{id}/sync_materials`: ask the device to report its
    /// material levels.
    pub async fn sync_device_materials(&self, device_id: &str) -> Result<Message, Error> {
        let endpoint = format!("/devices/{}/sync_materials", segment(device_id));
        let envelope = self.post(&endpoint, &json!({})).await?;
        self.unwrap_envelope(&endpoint, envelope)
    }

    // ── Envelope ─────────────────────────────────────────────────────

    async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, Error> {
        let envelope = self.get(endpoint, params).await?;
        self.unwrap_envelope(endpoint, envelope)
    }

    fn unwrap_envelope<T>(&self, endpoint: &str, envelope: Envelope<T>) -> Result<T, Error> {
        envelope.data.ok_or_else(|| {
            self.report(
                endpoint,
                Error::Parse {
                    message: format!("response from {endpoint} has no data"),
                    body: String::new(),
                },
            )
        })
    }
}

/// Percent-encode one path segment.
fn segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_query_skips_unset_and_empty_filters() {
        let q = DeviceQuery {
            status: Some("online".into()),
            query: Some(String::new()),
            page: Some(2),
            ..DeviceQuery::default()
        };
        assert_eq!(
            q.to_pairs(),
            vec![("status", "online".to_string()), ("page", "2".to_string())]
        );
    }

    #[test]
    fn order_query_keeps_field_order() {
        let q = OrderQuery {
            device_id: Some("D001".into()),
            payment_status: Some("paid".into()),
            page_size: Some(50),
            ..OrderQuery::default()
        };
        assert_eq!(
            q.to_pairs(),
            vec![
                ("device_id", "D001".to_string()),
                ("payment_status", "paid".to_string()),
                ("page_size", "50".to_string()),
            ]
        );
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(segment("MAT-01"), "MAT-01");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(segment("x+y"), "x%2By");
    }

    #[test]
    fn summary_query_defaults_to_no_params() {
        assert!(SummaryQuery::default().to_pairs().is_empty());
    }
}
