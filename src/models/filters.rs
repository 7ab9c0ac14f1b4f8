use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchFilters {
    pub type_id: Option<i64>,
    pub organ_id: Option<i64>,
    pub year: Option<i32>,
}

/// Lookup names resolved to foreign keys when a document is inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupNames {
    pub type_name: String,
    pub organ_name: String,
    pub status_name: Option<String>,
    pub priority_name: Option<String>,
}

impl LookupNames {
    pub fn new(type_name: impl Into<String>, organ_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            organ_name: organ_name.into(),
            status_name: None,
            priority_name: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_name = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority_name = Some(priority.into());
        self
    }
}
