//! Typed parameter sets for the facade operations.
//!
//! Contact, project, task, and report operations send their parameters as a
//! query string; only time-entry writes carry a JSON body. Every set follows
//! the same rule as record serialization: unset (`None`) fields are omitted
//! entirely, they never appear as `null` or empty values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter over users/contacts/projects/tasks: either everything or an
/// explicit id list. Encodes as `all` or a comma-joined list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdFilter {
    #[default]
    All,
    Ids(Vec<u64>),
}

impl fmt::Display for IdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdFilter::All => f.write_str("all"),
            IdFilter::Ids(ids) => {
                let joined = ids
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

fn push_opt<T: ToString>(query: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<T>) {
    if let Some(v) = value {
        query.push((key, v.to_string()));
    }
}

/// Parameters for creating or updating a contact.
#[derive(Debug, Clone, Default)]
pub struct ContactParams {
    pub budget_type: Option<String>,
    pub budget_frequency: Option<String>,
    pub budget_target: Option<f64>,
    pub budget_progress: Option<f64>,
    pub default_rate_dollars: Option<String>,
    pub pinned: Option<bool>,
    pub name: Option<String>,
    pub short_code: Option<String>,
    pub active: Option<bool>,
}

impl ContactParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "budget_type", &self.budget_type);
        push_opt(&mut query, "budget_frequency", &self.budget_frequency);
        push_opt(&mut query, "budget_target", &self.budget_target);
        push_opt(&mut query, "budget_progress", &self.budget_progress);
        push_opt(&mut query, "default_rate_dollars", &self.default_rate_dollars);
        push_opt(&mut query, "pinned", &self.pinned);
        push_opt(&mut query, "name", &self.name);
        push_opt(&mut query, "short_code", &self.short_code);
        push_opt(&mut query, "active", &self.active);
        query
    }
}

/// Parameters for creating or updating a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectParams {
    pub budget_type: Option<String>,
    pub budget_frequency: Option<String>,
    pub budget_target: Option<f64>,
    pub budget_progress: Option<f64>,
    pub default_rate_dollars: Option<String>,
    pub pinned: Option<bool>,
    pub name: Option<String>,
    pub contact_id: Option<u64>,
    pub short_code: Option<String>,
    pub active: Option<bool>,
    pub hidden: Option<bool>,
    pub description: Option<String>,
}

impl ProjectParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "budget_type", &self.budget_type);
        push_opt(&mut query, "budget_frequency", &self.budget_frequency);
        push_opt(&mut query, "budget_target", &self.budget_target);
        push_opt(&mut query, "budget_progress", &self.budget_progress);
        push_opt(&mut query, "default_rate_dollars", &self.default_rate_dollars);
        push_opt(&mut query, "pinned", &self.pinned);
        push_opt(&mut query, "name", &self.name);
        push_opt(&mut query, "contact_id", &self.contact_id);
        push_opt(&mut query, "short_code", &self.short_code);
        push_opt(&mut query, "active", &self.active);
        push_opt(&mut query, "hidden", &self.hidden);
        push_opt(&mut query, "description", &self.description);
        query
    }
}

/// Parameters for creating or updating a task. Same shape as
/// [`ProjectParams`]; kept separate so the facade signatures stay typed to
/// their entity.
#[derive(Debug, Clone, Default)]
pub struct TaskParams {
    pub budget_type: Option<String>,
    pub budget_frequency: Option<String>,
    pub budget_target: Option<f64>,
    pub budget_progress: Option<f64>,
    pub default_rate_dollars: Option<String>,
    pub pinned: Option<bool>,
    pub name: Option<String>,
    pub contact_id: Option<u64>,
    pub short_code: Option<String>,
    pub active: Option<bool>,
    pub hidden: Option<bool>,
    pub description: Option<String>,
}

impl TaskParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "budget_type", &self.budget_type);
        push_opt(&mut query, "budget_frequency", &self.budget_frequency);
        push_opt(&mut query, "budget_target", &self.budget_target);
        push_opt(&mut query, "budget_progress", &self.budget_progress);
        push_opt(&mut query, "default_rate_dollars", &self.default_rate_dollars);
        push_opt(&mut query, "pinned", &self.pinned);
        push_opt(&mut query, "name", &self.name);
        push_opt(&mut query, "contact_id", &self.contact_id);
        push_opt(&mut query, "short_code", &self.short_code);
        push_opt(&mut query, "active", &self.active);
        push_opt(&mut query, "hidden", &self.hidden);
        push_opt(&mut query, "description", &self.description);
        query
    }
}

/// Search filter for time entries. `limit`/`offset` are passed through to the
/// API unchanged; the server caps pages at 50 by default.
#[derive(Debug, Clone)]
pub struct EntrySearch {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: u32,
    pub offset: u32,
    pub users: IdFilter,
    pub contacts: IdFilter,
    pub projects: IdFilter,
    pub tasks: IdFilter,
    pub billable_only: bool,
    pub unbillable_only: bool,
    pub invoiced_only: bool,
    pub uninvoiced_only: bool,
    pub since: Option<String>,
}

impl Default for EntrySearch {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            limit: 50,
            offset: 0,
            users: IdFilter::All,
            contacts: IdFilter::All,
            projects: IdFilter::All,
            tasks: IdFilter::All,
            billable_only: false,
            unbillable_only: false,
            invoiced_only: false,
            uninvoiced_only: false,
            since: None,
        }
    }
}

impl EntrySearch {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "from", &self.from);
        push_opt(&mut query, "to", &self.to);
        query.push(("limit", self.limit.to_string()));
        query.push(("offset", self.offset.to_string()));
        query.push(("users", self.users.to_string()));
        query.push(("contacts", self.contacts.to_string()));
        query.push(("projects", self.projects.to_string()));
        query.push(("tasks", self.tasks.to_string()));
        query.push(("billable_only", self.billable_only.to_string()));
        query.push(("unbillable_only", self.unbillable_only.to_string()));
        query.push(("invoiced_only", self.invoiced_only.to_string()));
        query.push(("uninvoiced_only", self.uninvoiced_only.to_string()));
        push_opt(&mut query, "since", &self.since);
        query
    }
}

/// Parameters for report generation.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub users: IdFilter,
    pub contacts: IdFilter,
    pub projects: IdFilter,
    pub tasks: IdFilter,
    pub billable_only: bool,
    pub unbillable_only: bool,
    pub invoiced_only: bool,
    pub uninvoiced_only: bool,
    pub from: Option<String>,
    pub to: Option<String>,
    pub task_detail: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            users: IdFilter::All,
            contacts: IdFilter::All,
            projects: IdFilter::All,
            tasks: IdFilter::All,
            billable_only: false,
            unbillable_only: false,
            invoiced_only: false,
            uninvoiced_only: false,
            from: None,
            to: None,
            task_detail: String::new(),
        }
    }
}

impl ReportParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("users", self.users.to_string()),
            ("contacts", self.contacts.to_string()),
            ("projects", self.projects.to_string()),
            ("tasks", self.tasks.to_string()),
            ("billable_only", self.billable_only.to_string()),
            ("unbillable_only", self.unbillable_only.to_string()),
            ("invoiced_only", self.invoiced_only.to_string()),
            ("uninvoiced_only", self.uninvoiced_only.to_string()),
        ];
        push_opt(&mut query, "from", &self.from);
        push_opt(&mut query, "to", &self.to);
        query.push(("task_detail", self.task_detail.clone()));
        query
    }
}

/// Body payload for creating or updating a time entry. Serialized to JSON
/// with unset keys stripped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntryParams {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_filter_displays_all_or_joined_ids() {
        assert_eq!(IdFilter::All.to_string(), "all");
        assert_eq!(IdFilter::Ids(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(IdFilter::Ids(vec![42]).to_string(), "42");
    }

    #[test]
    fn contact_params_skip_unset_fields() {
        let params = ContactParams {
            name: Some("Acme".to_string()),
            active: Some(true),
            ..ContactParams::default()
        };
        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("name", "Acme".to_string()),
                ("active", "true".to_string()),
            ]
        );
    }

    #[test]
    fn entry_search_defaults_limit_and_offset() {
        let query = EntrySearch::default().to_query();
        assert!(query.contains(&("limit", "50".to_string())));
        assert!(query.contains(&("offset", "0".to_string())));
        assert!(query.contains(&("users", "all".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "from"));
    }

    #[test]
    fn entry_params_body_strips_unset_keys() {
        let params = TimeEntryParams {
            description: Some("standup".to_string()),
            duration: Some(900),
            ..TimeEntryParams::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(json["description"], "standup");
        assert_eq!(json["duration"], 900);
    }

    #[test]
    fn report_params_always_carry_filters() {
        let query = ReportParams::default().to_query();
        assert!(query.contains(&("users", "all".to_string())));
        assert!(query.contains(&("billable_only", "false".to_string())));
        assert!(query.contains(&("task_detail", String::new())));
        assert!(!query.iter().any(|(k, _)| *k == "from"));
    }
}
