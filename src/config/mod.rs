pub mod credentials;
pub mod loader;
pub mod schema;

pub use credentials::{CredentialStore, Credentials};
pub use loader::{default_settings_path, load_settings};
pub use schema::{ColorChoice, Settings};
