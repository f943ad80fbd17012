use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Zone {
    #[cfg(test)]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: None,
        }
    }

    /// Whether `record_name` lies inside this zone.
    ///
    /// The zone name must be a suffix of the record name on a label boundary,
    /// so `example.com` covers `example.com` and `www.example.com` but not
    /// `badexample.com`. Comparison ignores case and a trailing dot.
    pub fn contains(&self, record_name: &str) -> bool {
        let zone = normalize(&self.name);
        let name = normalize(record_name);

        if zone.is_empty() {
            return false;
        }

        match name.strip_suffix(zone.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
