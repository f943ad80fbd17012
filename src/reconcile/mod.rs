pub mod outcome;

pub use outcome::Outcome;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::dns::DnsProvider;
use crate::models::{DnsRecord, DnsRecordType, RecordRequest, Zone};

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("No matching zone found for {0}")]
    ZoneNotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// First zone, in provider order, that contains `name`.
///
/// No preference is given to the longest match: with overlapping zones the
/// provider's ordering decides.
pub fn select_zone<'a>(zones: &'a [Zone], name: &str) -> Option<&'a Zone> {
    zones.iter().find(|zone| zone.contains(name))
}

/// Brings a single `(name, type)` record to the requested state.
///
/// Every operation performs at most three provider calls, strictly in order:
/// list zones, look up the record, then at most one mutation.
pub struct Reconciler<'a> {
    provider: &'a dyn DnsProvider,
}

impl<'a> Reconciler<'a> {
    pub fn new(provider: &'a dyn DnsProvider) -> Self {
        Self { provider }
    }

    pub async fn get(&self, name: &str, record_type: &DnsRecordType) -> ReconcileResult<Outcome> {
        let (_, existing) = self.locate(name, record_type).await?;

        Ok(match existing {
            Some(record) => Outcome::Found(record),
            None => Outcome::Absent {
                name: name.to_string(),
                record_type: record_type.clone(),
            },
        })
    }

    /// Create the record, update it in place, or leave it alone if it already
    /// carries `content` and `ttl`
    pub async fn set(
        &self,
        name: &str,
        record_type: &DnsRecordType,
        content: &str,
        ttl: u32,
    ) -> ReconcileResult<Outcome> {
        let (zone, existing) = self.locate(name, record_type).await?;
        let request = RecordRequest::new(name, record_type.clone(), content, ttl);

        match existing {
            None => {
                info!(zone = %zone.name, record = %request.zone_line(), "Creating record");
                self.provider.create_record(&zone, &request).await?;
                Ok(Outcome::Created(request))
            }
            Some(record) if record.matches(content, ttl) => {
                debug!(record_id = %record.id, "Record already up to date");
                Ok(Outcome::UpToDate {
                    name: name.to_string(),
                })
            }
            Some(record) => {
                let request = request.with_proxy(record.proxied);
                info!(
                    zone = %zone.name,
                    record_id = %record.id,
                    from = %record.zone_line(),
                    to = %request.zone_line(),
                    "Updating record"
                );
                self.provider
                    .update_record(&zone, &record.id, &request)
                    .await?;
                Ok(Outcome::Updated(request))
            }
        }
    }

    /// Delete the record if it exists. Deleting a missing record is not an error.
    pub async fn delete(
        &self,
        name: &str,
        record_type: &DnsRecordType,
    ) -> ReconcileResult<Outcome> {
        let (zone, existing) = self.locate(name, record_type).await?;

        match existing {
            Some(record) => {
                info!(zone = %zone.name, record_id = %record.id, "Deleting record");
                self.provider.delete_record(&zone, &record.id).await?;
                Ok(Outcome::Deleted(record))
            }
            None => {
                debug!(name, %record_type, "Nothing to delete");
                Ok(Outcome::Absent {
                    name: name.to_string(),
                    record_type: record_type.clone(),
                })
            }
        }
    }

    async fn locate(
        &self,
        name: &str,
        record_type: &DnsRecordType,
    ) -> ReconcileResult<(Zone, Option<DnsRecord>)> {
        let zones = self.provider.list_zones().await?;
        let zone = select_zone(&zones, name)
            .cloned()
            .ok_or_else(|| ReconcileError::ZoneNotFound(name.to_string()))?;
        debug!(zone = %zone.name, zone_id = %zone.id, "Selected zone");

        let records = self
            .provider
            .find_records(&zone, name, record_type)
            .await?;

        let count = records.len();
        if count > 1 {
            warn!(name, %record_type, count, "Multiple matching records, using the first");
        }

        Ok((zone, records.into_iter().next()))
    }
}
