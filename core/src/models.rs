//! Typed records for every MinuteDock entity.
//!
//! Each record is a flat bag of optional fields. A key missing from the
//! response JSON decodes to `None`, which is also the field's declared
//! default, and serialization omits `None` fields so a record round-trips to
//! the same sparse mapping the API sent. Records hold plain identifier fields
//! only (a `Project` carries a `contact_id`, never an embedded `Contact`).
//!
//! Equality is full-field. Hashing uses the identifier field alone, which is
//! consistent with equality: records with equal field mappings have equal
//! ids. `Report` carries no identifier and is not hashable.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

macro_rules! hash_by_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        })+
    };
}

/// A MinuteDock user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A MinuteDock account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A MinuteDock contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rate_dollars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// A MinuteDock project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rate_dollars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A MinuteDock task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rate_dollars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_detail: Option<bool>,
}

/// A logged or in-progress time entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_active: Option<bool>,
}

/// An entry sitting in the dock (started but not yet logged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_active: Option<bool>,
}

/// Aggregated totals produced by report generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_value: Option<f64>,
}

hash_by_id!(User, Account, Contact, Project, Task, TimeEntry, Dock);

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let user: User = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.email, None);
        assert_eq!(user.first_name, None);

        let contact: Contact = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(contact.name.as_deref(), Some("Acme"));
        assert_eq!(contact.id, None);
        assert_eq!(contact.budget_target, None);
        assert_eq!(contact.active, None);

        let entry: TimeEntry = serde_json::from_str(r#"{"duration":900}"#).unwrap();
        assert_eq!(entry.duration, Some(900));
        assert_eq!(entry.task_ids, None);
        assert_eq!(entry.logged_at, None);

        let report: Report = serde_json::from_str(r#"{"hours":1.5}"#).unwrap();
        assert_eq!(report.hours, Some(1.5));
        assert_eq!(report.total_entries, None);
    }

    #[test]
    fn empty_object_decodes_for_every_entity() {
        serde_json::from_str::<User>("{}").unwrap();
        serde_json::from_str::<Account>("{}").unwrap();
        serde_json::from_str::<Contact>("{}").unwrap();
        serde_json::from_str::<Project>("{}").unwrap();
        serde_json::from_str::<Task>("{}").unwrap();
        serde_json::from_str::<TimeEntry>("{}").unwrap();
        serde_json::from_str::<Dock>("{}").unwrap();
        serde_json::from_str::<Report>("{}").unwrap();
    }

    #[test]
    fn serialization_omits_unset_fields() {
        let contact = Contact {
            id: Some(3),
            name: Some("Acme".to_string()),
            active: Some(false),
            ..Contact::default()
        };
        let json = serde_json::to_value(&contact).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Acme");
        // `false` is a real value, not an unset field, so it survives.
        assert_eq!(json["active"], false);
    }

    #[test]
    fn entries_roundtrip_through_json() {
        let entry = TimeEntry {
            id: Some(12),
            account_id: Some(1),
            description: Some("Sprint planning".to_string()),
            duration: Some(3600),
            task_ids: Some(vec![4, 5]),
            ..TimeEntry::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn equality_is_full_field() {
        let a = Project {
            id: Some(1),
            name: Some("Rollout".to_string()),
            ..Project::default()
        };
        let b = a.clone();
        assert_eq!(a, b);

        let c = Project {
            hidden: Some(true),
            ..a.clone()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn hash_follows_the_identifier() {
        let a = Contact {
            id: Some(9),
            name: Some("Acme".to_string()),
            ..Contact::default()
        };
        let b = Contact {
            id: Some(9),
            name: Some("Acme Pty Ltd".to_string()),
            ..Contact::default()
        };
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
