use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiClient, ApiResult};
use crate::config::Credentials;
use crate::models::{DnsRecord, DnsRecordType, RecordRequest, Zone};

use super::provider::DnsProvider;

/// Largest page size the zones endpoint accepts
const ZONES_PER_PAGE: &str = "50";

pub struct CloudflareProvider {
    client: ApiClient,
}

impl CloudflareProvider {
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::with_base_url(credentials, base_url)?,
        })
    }

    fn records_path(zone: &Zone) -> String {
        format!("zones/{}/dns_records", zone.id)
    }

    fn record_path(zone: &Zone, record_id: &str) -> String {
        format!("{}/{}", Self::records_path(zone), record_id)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn list_zones(&self) -> ApiResult<Vec<Zone>> {
        let zones: Vec<Zone> = self
            .client
            .get("zones", &[("per_page", ZONES_PER_PAGE)])
            .await?;

        debug!(count = zones.len(), "Fetched zones");
        Ok(zones)
    }

    async fn find_records(
        &self,
        zone: &Zone,
        name: &str,
        record_type: &DnsRecordType,
    ) -> ApiResult<Vec<DnsRecord>> {
        let record_type = record_type.to_string();
        let records: Vec<DnsRecord> = self
            .client
            .get(
                &Self::records_path(zone),
                &[("name", name), ("type", record_type.as_str())],
            )
            .await?;

        debug!(zone = %zone.name, name, count = records.len(), "Fetched matching records");
        Ok(records)
    }

    async fn create_record(&self, zone: &Zone, record: &RecordRequest) -> ApiResult<DnsRecord> {
        self.client.post(&Self::records_path(zone), record).await
    }

    async fn update_record(
        &self,
        zone: &Zone,
        record_id: &str,
        record: &RecordRequest,
    ) -> ApiResult<DnsRecord> {
        self.client
            .put(&Self::record_path(zone, record_id), record)
            .await
    }

    async fn delete_record(&self, zone: &Zone, record_id: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .client
            .delete(&Self::record_path(zone, record_id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_provider(mock_server: &MockServer) -> CloudflareProvider {
        let credentials = Credentials::new("user@example.com", "test_key_12345");
        CloudflareProvider::with_base_url(&credentials, &mock_server.uri()).unwrap()
    }

    fn envelope(result: serde_json::Value) -> serde_json::Value {
        json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": result
        })
    }

    fn record_json(id: &str, content: &str, ttl: u32, proxied: bool) -> serde_json::Value {
        json!({
            "id": id,
            "type": "A",
            "name": "www.example.com",
            "content": content,
            "proxiable": true,
            "proxied": proxied,
            "ttl": ttl,
            "zone_id": "zone-1",
            "zone_name": "example.com"
        })
    }

    #[tokio::test]
    async fn test_list_zones() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("per_page", "50"))
            .and(header("X-Auth-Email", "user@example.com"))
            .and(header("X-Auth-Key", "test_key_12345"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                {"id": "zone-1", "name": "example.com", "status": "active"},
                {"id": "zone-2", "name": "test.org", "status": "pending"}
            ]))))
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zones = provider.list_zones().await.unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].id, "zone-1");
        assert_eq!(zones[1].name, "test.org");
        assert_eq!(zones[1].status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_find_records_filters_by_name_and_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("name", "www.example.com"))
            .and(query_param("type", "A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                record_json("rec-1", "192.0.2.1", 300, true)
            ]))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zone = Zone::new("zone-1", "example.com");
        let records = provider
            .find_records(&zone, "www.example.com", &DnsRecordType::A)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "rec-1");
        assert_eq!(records[0].content, "192.0.2.1");
        assert!(records[0].proxied);
    }

    #[tokio::test]
    async fn test_create_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .and(body_json(json!({
                "name": "www.example.com",
                "type": "A",
                "content": "192.0.2.2",
                "ttl": 120,
                "proxied": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(record_json(
                "rec-9", "192.0.2.2", 120, false,
            ))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zone = Zone::new("zone-1", "example.com");
        let request = RecordRequest::new("www.example.com", DnsRecordType::A, "192.0.2.2", 120);

        let record = provider.create_record(&zone, &request).await.unwrap();

        assert_eq!(record.id, "rec-9");
        assert_eq!(record.ttl, 120);
    }

    #[tokio::test]
    async fn test_update_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/zones/zone-1/dns_records/rec-1"))
            .and(body_json(json!({
                "name": "www.example.com",
                "type": "A",
                "content": "192.0.2.99",
                "ttl": 600,
                "proxied": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(record_json(
                "rec-1", "192.0.2.99", 600, true,
            ))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zone = Zone::new("zone-1", "example.com");
        let request = RecordRequest::new("www.example.com", DnsRecordType::A, "192.0.2.99", 600)
            .with_proxy(true);

        let record = provider
            .update_record(&zone, "rec-1", &request)
            .await
            .unwrap();

        assert_eq!(record.content, "192.0.2.99");
        assert!(record.proxied);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(json!({"id": "rec-1"}))),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zone = Zone::new("zone-1", "example.com");

        assert!(provider.delete_record(&zone, "rec-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_record_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "errors": [{"code": 81044, "message": "Record does not exist."}],
                "result": null
            })))
            .mount(&mock_server)
            .await;

        let provider = create_mock_provider(&mock_server).await;
        let zone = Zone::new("zone-1", "example.com");
        let err = provider.delete_record(&zone, "missing").await.unwrap_err();

        match err {
            ApiError::ServerError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "81044: Record does not exist.");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }
}
