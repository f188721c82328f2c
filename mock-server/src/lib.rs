//! In-memory rendition of the MinuteDock API surface, used by the core
//! crate's integration tests and runnable standalone via `src/main.rs`.
//!
//! Mirrors the real API's quirks the client depends on: contact/project/task
//! create and update take their fields as query parameters, only time-entry
//! writes carry JSON bodies, and every route requires an `X-API-Key` header.
//! DTOs are defined independently from the core crate; the integration tests
//! catch schema drift between the two.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Timestamp stamped on logged entries. Fixed so tests can assert on it.
pub const LOGGED_AT: &str = "2026-01-01T00:00:00Z";

#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Contact {
    pub id: u64,
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

#[derive(Clone, Debug, Serialize)]
pub struct Project {
    pub id: u64,
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

#[derive(Clone, Debug, Serialize)]
pub struct Task {
    pub id: u64,
    pub budget_type: Option<String>,
    pub budget_frequency: Option<String>,
    pub budget_target: Option<f64>,
    pub budget_progress: Option<f64>,
    pub default_rate_dollars: Option<String>,
    pub pinned: Option<bool>,
    pub short_code: Option<String>,
    pub active: Option<bool>,
    pub hidden: Option<bool>,
    pub description: Option<String>,
    pub has_detail: Option<bool>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TimeEntry {
    pub id: u64,
    pub account_id: Option<u64>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub contact_id: Option<u64>,
    pub project_id: Option<u64>,
    pub task_ids: Option<Vec<u64>>,
    pub invoice_id: Option<u64>,
    pub logged_at: Option<String>,
    pub timer_active: Option<bool>,
}

#[derive(Serialize)]
pub struct Report {
    pub description: String,
    pub total_entries: u64,
    pub hours: f64,
    pub billable_hours: f64,
    pub billable_value: f64,
}

// --- incoming parameter shapes ---

#[derive(Deserialize)]
pub struct ContactQuery {
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

#[derive(Deserialize)]
pub struct ProjectQuery {
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

#[derive(Deserialize)]
pub struct EntryBody {
    pub account_id: Option<u64>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub contact_id: Option<u64>,
    pub project_id: Option<u64>,
    pub task_ids: Option<Vec<u64>>,
    pub invoice_id: Option<u64>,
    pub logged_at: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    contacts: HashMap<u64, Contact>,
    projects: HashMap<u64, Project>,
    tasks: HashMap<u64, Task>,
    entries: HashMap<u64, TimeEntry>,
    current: Option<TimeEntry>,
}

impl Store {
    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/me", get(current_user))
        .route("/api/v1/accounts", get(list_accounts))
        .route("/api/v1/accounts/current", get(current_account))
        .route("/api/v1/contacts", get(list_contacts).post(create_contact))
        .route("/api/v1/contacts/{id}", get(get_contact).put(update_contact))
        .route("/api/v1/projects", get(list_projects).post(create_project))
        .route("/api/v1/projects/{id}", get(get_project).put(update_project))
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route("/api/v1/tasks/{id}", get(get_task).put(update_task))
        .route("/api/v1/entries", get(search_entries).post(create_entry))
        .route("/api/v1/entries/{id}", axum::routing::put(update_entry))
        .route("/api/v1/entries/current/{action}", post(timer_action))
        .route("/api/v1/reports/generate", post(generate_report))
        .route("/api/v1/dock", get(get_dock))
        .layer(middleware::from_fn(require_api_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Every MinuteDock route is authenticated; a missing key is a 401.
async fn require_api_key(request: Request, next: Next) -> Result<Response, StatusCode> {
    if request.headers().get("x-api-key").is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

// --- users / accounts: fixed fixtures ---

fn fixture_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        },
        User {
            id: 2,
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        },
    ]
}

async fn list_users() -> Json<Vec<User>> {
    Json(fixture_users())
}

async fn current_user() -> Json<User> {
    Json(fixture_users().remove(0))
}

async fn list_accounts() -> Json<Vec<Account>> {
    Json(vec![Account {
        id: 1,
        name: "Example Pty Ltd".to_string(),
    }])
}

async fn current_account() -> Json<Account> {
    Json(Account {
        id: 1,
        name: "Example Pty Ltd".to_string(),
    })
}

// --- contacts ---

async fn list_contacts(State(db): State<Db>) -> Json<Vec<Contact>> {
    let store = db.read().await;
    let mut contacts: Vec<Contact> = store.contacts.values().cloned().collect();
    contacts.sort_by_key(|c| c.id);
    Json(contacts)
}

async fn get_contact(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Contact>, StatusCode> {
    let store = db.read().await;
    store.contacts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_contact(
    State(db): State<Db>,
    Query(input): Query<ContactQuery>,
) -> (StatusCode, Json<Contact>) {
    let mut store = db.write().await;
    let contact = Contact {
        id: store.alloc(),
        budget_type: input.budget_type,
        budget_frequency: input.budget_frequency,
        budget_target: input.budget_target,
        budget_progress: input.budget_progress,
        default_rate_dollars: input.default_rate_dollars,
        pinned: input.pinned,
        name: input.name,
        short_code: input.short_code,
        active: input.active,
    };
    store.contacts.insert(contact.id, contact.clone());
    (StatusCode::CREATED, Json(contact))
}

async fn update_contact(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(input): Query<ContactQuery>,
) -> Result<Json<Contact>, StatusCode> {
    let mut store = db.write().await;
    let contact = store.contacts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if input.budget_type.is_some() {
        contact.budget_type = input.budget_type;
    }
    if input.budget_frequency.is_some() {
        contact.budget_frequency = input.budget_frequency;
    }
    if input.budget_target.is_some() {
        contact.budget_target = input.budget_target;
    }
    if input.budget_progress.is_some() {
        contact.budget_progress = input.budget_progress;
    }
    if input.default_rate_dollars.is_some() {
        contact.default_rate_dollars = input.default_rate_dollars;
    }
    if input.pinned.is_some() {
        contact.pinned = input.pinned;
    }
    if input.name.is_some() {
        contact.name = input.name;
    }
    if input.short_code.is_some() {
        contact.short_code = input.short_code;
    }
    if input.active.is_some() {
        contact.active = input.active;
    }
    Ok(Json(contact.clone()))
}

// --- projects ---

async fn list_projects(State(db): State<Db>) -> Json<Vec<Project>> {
    let store = db.read().await;
    let mut projects: Vec<Project> = store.projects.values().cloned().collect();
    projects.sort_by_key(|p| p.id);
    Json(projects)
}

async fn get_project(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Project>, StatusCode> {
    let store = db.read().await;
    store.projects.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_project(
    State(db): State<Db>,
    Query(input): Query<ProjectQuery>,
) -> (StatusCode, Json<Project>) {
    let mut store = db.write().await;
    let project = Project {
        id: store.alloc(),
        budget_type: input.budget_type,
        budget_frequency: input.budget_frequency,
        budget_target: input.budget_target,
        budget_progress: input.budget_progress,
        default_rate_dollars: input.default_rate_dollars,
        pinned: input.pinned,
        name: input.name,
        contact_id: input.contact_id,
        short_code: input.short_code,
        active: input.active,
        hidden: input.hidden,
        description: input.description,
    };
    store.projects.insert(project.id, project.clone());
    (StatusCode::CREATED, Json(project))
}

async fn update_project(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(input): Query<ProjectQuery>,
) -> Result<Json<Project>, StatusCode> {
    let mut store = db.write().await;
    let project = store.projects.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if input.name.is_some() {
        project.name = input.name;
    }
    if input.contact_id.is_some() {
        project.contact_id = input.contact_id;
    }
    if input.short_code.is_some() {
        project.short_code = input.short_code;
    }
    if input.active.is_some() {
        project.active = input.active;
    }
    if input.hidden.is_some() {
        project.hidden = input.hidden;
    }
    if input.description.is_some() {
        project.description = input.description;
    }
    Ok(Json(project.clone()))
}

// --- tasks ---

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    let mut tasks: Vec<Task> = store.tasks.values().cloned().collect();
    tasks.sort_by_key(|t| t.id);
    Json(tasks)
}

async fn get_task(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Task>, StatusCode> {
    let store = db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_task(
    State(db): State<Db>,
    Query(input): Query<ProjectQuery>,
) -> (StatusCode, Json<Task>) {
    let mut store = db.write().await;
    let task = Task {
        id: store.alloc(),
        budget_type: input.budget_type,
        budget_frequency: input.budget_frequency,
        budget_target: input.budget_target,
        budget_progress: input.budget_progress,
        default_rate_dollars: input.default_rate_dollars,
        pinned: input.pinned,
        short_code: input.short_code,
        active: input.active,
        hidden: input.hidden,
        description: input.description,
        has_detail: None,
    };
    store.tasks.insert(task.id, task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(input): Query<ProjectQuery>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if input.short_code.is_some() {
        task.short_code = input.short_code;
    }
    if input.active.is_some() {
        task.active = input.active;
    }
    if input.hidden.is_some() {
        task.hidden = input.hidden;
    }
    if input.description.is_some() {
        task.description = input.description;
    }
    Ok(Json(task.clone()))
}

// --- entries ---

async fn search_entries(
    State(db): State<Db>,
    Query(search): Query<SearchQuery>,
) -> Json<Vec<TimeEntry>> {
    let store = db.read().await;
    let mut entries: Vec<TimeEntry> = store.entries.values().cloned().collect();
    entries.sort_by_key(|e| e.id);

    let offset = search.offset.unwrap_or(0);
    let limit = search.limit.unwrap_or(50);
    let page = entries.into_iter().skip(offset).take(limit).collect();
    Json(page)
}

async fn create_entry(
    State(db): State<Db>,
    Json(input): Json<EntryBody>,
) -> (StatusCode, Json<TimeEntry>) {
    let mut store = db.write().await;
    let entry = TimeEntry {
        id: store.alloc(),
        account_id: input.account_id,
        description: input.description,
        duration: input.duration,
        contact_id: input.contact_id,
        project_id: input.project_id,
        task_ids: input.task_ids,
        invoice_id: input.invoice_id,
        logged_at: input.logged_at.or_else(|| Some(LOGGED_AT.to_string())),
        timer_active: Some(false),
    };
    store.entries.insert(entry.id, entry.clone());
    (StatusCode::CREATED, Json(entry))
}

async fn update_entry(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<EntryBody>,
) -> Result<Json<TimeEntry>, StatusCode> {
    let mut store = db.write().await;
    let entry = store.entries.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if input.description.is_some() {
        entry.description = input.description;
    }
    if input.duration.is_some() {
        entry.duration = input.duration;
    }
    if input.contact_id.is_some() {
        entry.contact_id = input.contact_id;
    }
    if input.project_id.is_some() {
        entry.project_id = input.project_id;
    }
    if input.task_ids.is_some() {
        entry.task_ids = input.task_ids;
    }
    if input.invoice_id.is_some() {
        entry.invoice_id = input.invoice_id;
    }
    if input.logged_at.is_some() {
        entry.logged_at = input.logged_at;
    }
    Ok(Json(entry.clone()))
}

/// `start` begins (or resumes) the current entry's timer, `pause` stops the
/// clock without logging, `log` moves the current entry into the logged set.
async fn timer_action(
    State(db): State<Db>,
    Path(action): Path<String>,
) -> Result<Json<TimeEntry>, StatusCode> {
    let mut store = db.write().await;
    match action.as_str() {
        "start" => {
            if store.current.is_none() {
                let entry = TimeEntry {
                    id: store.alloc(),
                    account_id: Some(1),
                    description: None,
                    duration: Some(0),
                    contact_id: None,
                    project_id: None,
                    task_ids: None,
                    invoice_id: None,
                    logged_at: None,
                    timer_active: None,
                };
                store.current = Some(entry);
            }
            let current = store.current.as_mut().ok_or(StatusCode::NOT_FOUND)?;
            current.timer_active = Some(true);
            Ok(Json(current.clone()))
        }
        "pause" => {
            let current = store.current.as_mut().ok_or(StatusCode::NOT_FOUND)?;
            current.timer_active = Some(false);
            Ok(Json(current.clone()))
        }
        "log" => {
            let mut entry = store.current.take().ok_or(StatusCode::NOT_FOUND)?;
            entry.timer_active = Some(false);
            entry.logged_at = Some(LOGGED_AT.to_string());
            store.entries.insert(entry.id, entry.clone());
            Ok(Json(entry))
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

// --- reports / dock ---

async fn generate_report(State(db): State<Db>) -> Json<Report> {
    let store = db.read().await;
    let total_entries = store.entries.len() as u64;
    let seconds: i64 = store.entries.values().filter_map(|e| e.duration).sum();
    let hours = seconds as f64 / 3600.0;
    Json(Report {
        description: "generated report".to_string(),
        total_entries,
        hours,
        billable_hours: hours,
        billable_value: hours * 100.0,
    })
}

async fn get_dock(State(db): State<Db>) -> Json<Vec<serde_json::Value>> {
    let store = db.read().await;
    let docked: Vec<serde_json::Value> = store
        .current
        .iter()
        .map(|entry| {
            serde_json::json!({
                "id": entry.id,
                "account_id": entry.account_id,
                "description": entry.description,
                "duration": entry.duration,
                "contact_id": entry.contact_id,
                "project_id": entry.project_id,
                "task_ids": entry.task_ids,
                "timer_active": entry.timer_active,
            })
        })
        .collect();
    Json(docked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_serializes_optional_fields_as_null() {
        let contact = Contact {
            id: 1,
            budget_type: None,
            budget_frequency: None,
            budget_target: None,
            budget_progress: None,
            default_rate_dollars: None,
            pinned: None,
            name: Some("Acme".to_string()),
            short_code: None,
            active: Some(true),
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["active"], true);
        assert!(json["budget_type"].is_null());
    }

    #[test]
    fn store_allocates_increasing_ids() {
        let mut store = Store::default();
        assert_eq!(store.alloc(), 1);
        assert_eq!(store.alloc(), 2);
        assert_eq!(store.alloc(), 3);
    }

    #[test]
    fn entry_body_accepts_sparse_json() {
        let body: EntryBody = serde_json::from_str(r#"{"duration":900}"#).unwrap();
        assert_eq!(body.duration, Some(900));
        assert!(body.description.is_none());
        assert!(body.task_ids.is_none());
    }
}
