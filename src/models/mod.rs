pub mod dns;
pub mod zone;

pub use dns::{DnsRecord, DnsRecordType, RecordRequest};
pub use zone::Zone;
