// complaints-service/src/models/complaint.rs
use crate::models::{Entity, ServiceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Lifecycle status of a complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "progress")]
    Progress,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "critical")]
    Critical,
    #[serde(rename = "hold")]
    Hold,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 6] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Progress,
        ComplaintStatus::Complete,
        ComplaintStatus::Critical,
        ComplaintStatus::Hold,
        ComplaintStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Progress => "progress",
            ComplaintStatus::Complete => "complete",
            ComplaintStatus::Critical => "critical",
            ComplaintStatus::Hold => "hold",
            ComplaintStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ServiceError;

    // Exact match only, no case folding
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ServiceError::InvalidEnumValue(value.to_string()))
    }
}

// A note appended to a complaint by a team member
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Note {
    pub username: Option<String>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A customer complaint record.
///
/// `assigned_to` holds a team member's username by value. Nothing checks that
/// the member exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Complaint {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_contact: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Complaint {
    const KIND: &'static str = "Complaint";
}

impl Complaint {
    // Create a complaint in its initial state
    pub fn new(title: String, description: String) -> Self {
        Self {
            title,
            description,
            customer_name: None,
            customer_contact: None,
            assigned_to: None,
            status: ComplaintStatus::Pending,
            notes: Vec::new(),
            updated_at: None,
        }
    }
}

impl From<ComplaintCreate> for Complaint {
    fn from(data: ComplaintCreate) -> Self {
        Self {
            customer_name: data.customer_name,
            customer_contact: data.customer_contact,
            assigned_to: data.assigned_to,
            ..Complaint::new(data.title, data.description)
        }
    }
}

// Request to create a complaint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ComplaintCreate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_contact: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

// Request to change a complaint's status; the value is checked against
// ComplaintStatus before anything is written
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NoteCreate {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing() {
        for status in ComplaintStatus::ALL {
            assert_eq!(status.as_str().parse::<ComplaintStatus>(), Ok(status));
        }

        assert_eq!(
            "bogus".parse::<ComplaintStatus>(),
            Err(ServiceError::InvalidEnumValue("bogus".to_string()))
        );
        assert!("Pending".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn test_new_complaint_defaults() {
        let complaint = Complaint::from(ComplaintCreate {
            title: "No signal".into(),
            description: "Router shows red light".into(),
            customer_name: Some("Ravi".into()),
            customer_contact: None,
            assigned_to: Some("alice".into()),
        });
        let value = serde_json::to_value(&complaint).unwrap();

        assert_eq!(value["status"], "pending");
        assert_eq!(value["notes"], json!([]));
        assert_eq!(value["assigned_to"], "alice");
        assert!(value.get("updated_at").is_none(), "updated_at is only set by mutations");
    }

    #[test]
    fn test_unknown_status_is_not_deserialized() {
        let parsed: Result<Complaint, _> = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "status": "bogus"
        }));
        assert!(parsed.is_err());
    }
}
