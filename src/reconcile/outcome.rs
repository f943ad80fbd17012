use crate::models::{DnsRecord, DnsRecordType, RecordRequest};

/// Result of one command against the provider
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `get` found a record
    Found(DnsRecord),
    /// No record matches the name and type; nothing was changed
    Absent {
        name: String,
        record_type: DnsRecordType,
    },
    Created(RecordRequest),
    Updated(RecordRequest),
    UpToDate {
        name: String,
    },
    /// Carries the record as it was before deletion
    Deleted(DnsRecord),
}

impl Outcome {
    /// Whether the provider was asked to change anything
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Outcome::Created(_) | Outcome::Updated(_) | Outcome::Deleted(_)
        )
    }

    /// One-line, human-readable summary
    pub fn summary(&self) -> String {
        match self {
            Outcome::Found(record) => {
                if record.proxied {
                    format!("{} (proxied)", record.zone_line())
                } else {
                    record.zone_line()
                }
            }
            Outcome::Absent { name, record_type } => {
                format!("No {} record found for {}", record_type, name)
            }
            Outcome::Created(request) => format!("Created {}", request.zone_line()),
            Outcome::Updated(request) => format!("Updated {}", request.zone_line()),
            Outcome::UpToDate { name } => format!("{} is up to date", name),
            Outcome::Deleted(record) => format!("Deleted {}", record.zone_line()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries() {
        let request = RecordRequest::new("example.com", DnsRecordType::A, "1.2.3.4", 120);

        assert_eq!(
            Outcome::Created(request.clone()).summary(),
            "Created example.com 120 IN A 1.2.3.4"
        );
        assert_eq!(
            Outcome::Updated(request).summary(),
            "Updated example.com 120 IN A 1.2.3.4"
        );
        assert_eq!(
            Outcome::UpToDate {
                name: "example.com".to_string()
            }
            .summary(),
            "example.com is up to date"
        );
        assert_eq!(
            Outcome::Absent {
                name: "example.com".to_string(),
                record_type: DnsRecordType::AAAA,
            }
            .summary(),
            "No AAAA record found for example.com"
        );
    }
}
