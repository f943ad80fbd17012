use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A DNS record as the provider reports it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxiable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// The desired state of a record, sent on create and update
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum DnsRecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    SRV,
    NS,
    CAA,
    PTR,
    Other(String),
}

impl DnsRecord {
    /// Whether the record already carries the given content and TTL
    pub fn matches(&self, content: &str, ttl: u32) -> bool {
        self.content == content && self.ttl == ttl
    }

    /// Zone-file style line: `name ttl IN TYPE content`
    pub fn zone_line(&self) -> String {
        zone_line(&self.name, self.ttl, &self.record_type, &self.content)
    }
}

impl RecordRequest {
    pub fn new(name: &str, record_type: DnsRecordType, content: &str, ttl: u32) -> Self {
        Self {
            name: name.to_string(),
            record_type,
            content: content.to_string(),
            ttl,
            proxied: false,
        }
    }

    pub fn with_proxy(mut self, proxied: bool) -> Self {
        self.proxied = proxied;
        self
    }

    pub fn zone_line(&self) -> String {
        zone_line(&self.name, self.ttl, &self.record_type, &self.content)
    }
}

fn zone_line(name: &str, ttl: u32, record_type: &DnsRecordType, content: &str) -> String {
    format!("{} {} IN {} {}", name, ttl, record_type, content)
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DnsRecordType::A => write!(f, "A"),
            DnsRecordType::AAAA => write!(f, "AAAA"),
            DnsRecordType::CNAME => write!(f, "CNAME"),
            DnsRecordType::MX => write!(f, "MX"),
            DnsRecordType::TXT => write!(f, "TXT"),
            DnsRecordType::SRV => write!(f, "SRV"),
            DnsRecordType::NS => write!(f, "NS"),
            DnsRecordType::CAA => write!(f, "CAA"),
            DnsRecordType::PTR => write!(f, "PTR"),
            DnsRecordType::Other(other) => write!(f, "{}", other),
        }
    }
}

impl std::str::FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "" => Err("DNS record type must not be empty".to_string()),
            "A" => Ok(DnsRecordType::A),
            "AAAA" => Ok(DnsRecordType::AAAA),
            "CNAME" => Ok(DnsRecordType::CNAME),
            "MX" => Ok(DnsRecordType::MX),
            "TXT" => Ok(DnsRecordType::TXT),
            "SRV" => Ok(DnsRecordType::SRV),
            "NS" => Ok(DnsRecordType::NS),
            "CAA" => Ok(DnsRecordType::CAA),
            "PTR" => Ok(DnsRecordType::PTR),
            _ if upper.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Ok(DnsRecordType::Other(upper))
            }
            _ => Err(format!("Invalid DNS record type: {}", s)),
        }
    }
}

impl TryFrom<String> for DnsRecordType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DnsRecordType> for String {
    fn from(record_type: DnsRecordType) -> Self {
        record_type.to_string()
    }
}
