pub mod cloudflare;
pub mod provider;

pub use provider::{create_provider, DnsProvider};
