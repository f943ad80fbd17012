use async_trait::async_trait;

use crate::api::ApiResult;
use crate::config::Credentials;
use crate::models::{DnsRecord, DnsRecordType, RecordRequest, Zone};

use super::cloudflare::CloudflareProvider;

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the zones visible to the current credentials, in provider order
    async fn list_zones(&self) -> ApiResult<Vec<Zone>>;

    /// Records in `zone` matching exactly `name` and `record_type`
    async fn find_records(
        &self,
        zone: &Zone,
        name: &str,
        record_type: &DnsRecordType,
    ) -> ApiResult<Vec<DnsRecord>>;

    /// Create a new DNS record
    async fn create_record(&self, zone: &Zone, record: &RecordRequest) -> ApiResult<DnsRecord>;

    /// Replace an existing DNS record
    async fn update_record(
        &self,
        zone: &Zone,
        record_id: &str,
        record: &RecordRequest,
    ) -> ApiResult<DnsRecord>;

    /// Delete a DNS record
    async fn delete_record(&self, zone: &Zone, record_id: &str) -> ApiResult<()>;
}

/// Build the Cloudflare provider for the given credentials and API endpoint
pub fn create_provider(credentials: &Credentials, api_url: &str) -> ApiResult<Box<dyn DnsProvider>> {
    Ok(Box::new(CloudflareProvider::with_base_url(credentials, api_url)?))
}
