//! The MinuteDock client: request building, blocking dispatch, and response
//! decoding.
//!
//! # Design
//! `MinuteDock` holds only immutable configuration (API key, optional account
//! id, base URL) plus a shared ureq agent; every call builds fresh request
//! data, so a cloned client can be used from multiple threads. Each facade
//! method is one stateless round trip: build an `HttpRequest`, execute it,
//! decode the JSON body into the operation's record type. `build_request` and
//! `handle_response` are public so the round trip can be exercised without a
//! network, or driven by a caller-supplied transport.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoints;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::{Account, Contact, Dock, Project, Report, Task, TimeEntry, User};
use crate::params::{
    ContactParams, EntrySearch, ProjectParams, ReportParams, TaskParams, TimeEntryParams,
};

/// Production API host. Override with [`MinuteDock::with_base_url`] for tests.
pub const BASE_URL: &str = "https://minutedock.com";

/// Synchronous client for the MinuteDock REST API.
///
/// ```no_run
/// use minutedock_core::MinuteDock;
///
/// let client = MinuteDock::new("my-api-key").with_account_id("1234");
/// let me = client.current_user()?;
/// # Ok::<(), minutedock_core::ApiError>(())
/// ```
#[derive(Clone)]
pub struct MinuteDock {
    base_url: String,
    api_key: String,
    account_id: Option<String>,
    agent: ureq::Agent,
}

// The API key is a credential; keep it out of debug output.
impl std::fmt::Debug for MinuteDock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinuteDock")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

impl MinuteDock {
    /// Build a client authenticating with `api_key` against the production
    /// host. Requests run against the authenticated user's default account
    /// until [`with_account_id`](Self::with_account_id) selects another.
    pub fn new(api_key: impl Into<String>) -> Self {
        // Non-2xx statuses come back as data; this client owns status
        // interpretation.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            account_id: None,
            agent,
        }
    }

    /// Operate against a sub-account; sent as the `X-Account-ID` header.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Point the client at a different host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    // --- users ---

    /// The currently authenticated user.
    pub fn current_user(&self) -> Result<User, ApiError> {
        self.dispatch(HttpMethod::Get, Some(endpoints::CURRENT_USER), None, &[], None)
    }

    /// All users in the account.
    pub fn users(&self, active: bool) -> Result<Vec<User>, ApiError> {
        let query = [("active", active.to_string())];
        self.dispatch(HttpMethod::Get, Some(endpoints::USERS), None, &query, None)
    }

    // --- accounts ---

    /// All accounts available to the authenticated user.
    pub fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.dispatch(HttpMethod::Get, Some(endpoints::ACCOUNTS), None, &[], None)
    }

    /// The currently authenticated account.
    pub fn current_account(&self) -> Result<Account, ApiError> {
        self.dispatch(HttpMethod::Get, Some(endpoints::CURRENT_ACCOUNT), None, &[], None)
    }

    // --- contacts ---

    /// A single contact by id.
    pub fn contact(&self, id: u64) -> Result<Contact, ApiError> {
        let id = id.to_string();
        self.dispatch(HttpMethod::Get, Some(endpoints::CONTACTS), Some(&id), &[], None)
    }

    /// All contacts matching the pinned/active filters.
    pub fn contacts(&self, pinned: bool, active: bool) -> Result<Vec<Contact>, ApiError> {
        let query = [
            ("pinned", pinned.to_string()),
            ("active", active.to_string()),
        ];
        self.dispatch(HttpMethod::Get, Some(endpoints::CONTACTS), None, &query, None)
    }

    /// Create a contact. The API takes contact fields as query parameters.
    pub fn create_contact(&self, params: &ContactParams) -> Result<Contact, ApiError> {
        self.dispatch(
            HttpMethod::Post,
            Some(endpoints::CONTACTS),
            None,
            &params.to_query(),
            None,
        )
    }

    /// Update an existing contact.
    pub fn update_contact(&self, id: u64, params: &ContactParams) -> Result<Contact, ApiError> {
        let id = id.to_string();
        self.dispatch(
            HttpMethod::Put,
            Some(endpoints::CONTACTS),
            Some(&id),
            &params.to_query(),
            None,
        )
    }

    // --- projects ---

    /// A single project by id.
    pub fn project(&self, id: u64) -> Result<Project, ApiError> {
        let id = id.to_string();
        self.dispatch(HttpMethod::Get, Some(endpoints::PROJECTS), Some(&id), &[], None)
    }

    /// All projects matching the pinned/active filters.
    pub fn projects(&self, pinned: bool, active: bool) -> Result<Vec<Project>, ApiError> {
        let query = [
            ("pinned", pinned.to_string()),
            ("active", active.to_string()),
        ];
        self.dispatch(HttpMethod::Get, Some(endpoints::PROJECTS), None, &query, None)
    }

    /// Create a project.
    pub fn create_project(&self, params: &ProjectParams) -> Result<Project, ApiError> {
        self.dispatch(
            HttpMethod::Post,
            Some(endpoints::PROJECTS),
            None,
            &params.to_query(),
            None,
        )
    }

    /// Update an existing project.
    pub fn update_project(&self, id: u64, params: &ProjectParams) -> Result<Project, ApiError> {
        let id = id.to_string();
        self.dispatch(
            HttpMethod::Put,
            Some(endpoints::PROJECTS),
            Some(&id),
            &params.to_query(),
            None,
        )
    }

    // --- tasks ---

    /// A single task by id.
    pub fn task(&self, id: u64) -> Result<Task, ApiError> {
        let id = id.to_string();
        self.dispatch(HttpMethod::Get, Some(endpoints::TASKS), Some(&id), &[], None)
    }

    /// All tasks matching the pinned/active filters.
    pub fn tasks(&self, pinned: bool, active: bool) -> Result<Vec<Task>, ApiError> {
        let query = [
            ("pinned", pinned.to_string()),
            ("active", active.to_string()),
        ];
        self.dispatch(HttpMethod::Get, Some(endpoints::TASKS), None, &query, None)
    }

    /// Create a task.
    pub fn create_task(&self, params: &TaskParams) -> Result<Task, ApiError> {
        self.dispatch(
            HttpMethod::Post,
            Some(endpoints::TASKS),
            None,
            &params.to_query(),
            None,
        )
    }

    /// Update an existing task.
    pub fn update_task(&self, id: u64, params: &TaskParams) -> Result<Task, ApiError> {
        let id = id.to_string();
        self.dispatch(
            HttpMethod::Put,
            Some(endpoints::TASKS),
            Some(&id),
            &params.to_query(),
            None,
        )
    }

    // --- timer ---

    /// Start the timer on the current entry.
    pub fn start_timer(&self) -> Result<TimeEntry, ApiError> {
        self.timer_action("start")
    }

    /// Pause the timer on the current entry.
    pub fn pause_timer(&self) -> Result<TimeEntry, ApiError> {
        self.timer_action("pause")
    }

    /// Log the current entry, stopping its timer.
    pub fn log_timer(&self) -> Result<TimeEntry, ApiError> {
        self.timer_action("log")
    }

    fn timer_action(&self, action: &str) -> Result<TimeEntry, ApiError> {
        self.dispatch(
            HttpMethod::Post,
            Some(endpoints::CURRENT_ENTRY),
            Some(action),
            &[],
            None,
        )
    }

    // --- entries ---

    /// Time entries matching the search filter. Returns the first
    /// `search.limit` matches; page with `search.offset`.
    pub fn search_entries(&self, search: &EntrySearch) -> Result<Vec<TimeEntry>, ApiError> {
        self.dispatch(
            HttpMethod::Get,
            Some(endpoints::ENTRIES),
            None,
            &search.to_query(),
            None,
        )
    }

    /// Log a new time entry.
    pub fn create_entry(&self, params: &TimeEntryParams) -> Result<TimeEntry, ApiError> {
        let body = encode_payload(params)?;
        self.dispatch(HttpMethod::Post, Some(endpoints::ENTRIES), None, &[], Some(body))
    }

    /// Update an existing time entry.
    pub fn update_entry(&self, id: u64, params: &TimeEntryParams) -> Result<TimeEntry, ApiError> {
        let id = id.to_string();
        let body = encode_payload(params)?;
        self.dispatch(HttpMethod::Put, Some(endpoints::ENTRIES), Some(&id), &[], Some(body))
    }

    // --- reports / dock ---

    /// Generate a report over the entries matching the filter.
    pub fn generate_report(&self, params: &ReportParams) -> Result<Report, ApiError> {
        self.dispatch(
            HttpMethod::Post,
            Some(endpoints::REPORTS),
            None,
            &params.to_query(),
            None,
        )
    }

    /// The entries currently sitting in the dock.
    pub fn dock(&self) -> Result<Vec<Dock>, ApiError> {
        self.dispatch(HttpMethod::Get, Some(endpoints::DOCK), None, &[], None)
    }

    // --- request pipeline ---

    /// Describe a request as plain data: authenticated headers, normalized
    /// URL, optional pre-encoded JSON body. `Content-Type` is attached only
    /// when a body is present.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: Option<&str>,
        path_var: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<String>,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.api_url(path, path_var, query)?;

        let mut headers = vec![("X-API-Key".to_string(), self.api_key.clone())];
        if let Some(account_id) = &self.account_id {
            headers.push(("X-Account-ID".to_string(), account_id.clone()));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decode a response into the target record type. Non-2xx statuses map
    /// to [`ApiError::Http`] and produce no record.
    pub fn handle_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        if !(200..300).contains(&response.status) {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Join base + lower-cased path + optional path variable + query string.
    fn api_url(
        &self,
        path: Option<&str>,
        path_var: Option<&str>,
        query: &[(&'static str, String)],
    ) -> Result<String, ApiError> {
        let path = path.ok_or(ApiError::MissingPath)?;

        let mut url = format!("{}{}", self.base_url, path.to_lowercase());
        if let Some(var) = path_var {
            url.push('/');
            url.push_str(&var.to_lowercase());
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }
        Ok(url)
    }

    fn dispatch<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: Option<&str>,
        path_var: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let request = self.build_request(method, path, path_var, query, body)?;
        let response = self.execute(request)?;
        self.handle_response(response)
    }

    /// One blocking round trip. No retry, no timeout beyond ureq defaults.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?request.method, url = %request.url, "dispatching request");

        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => {
                let mut r = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.call()
            }
            (HttpMethod::Post, Some(body)) => {
                let mut r = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                let mut r = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                let mut r = self.agent.put(&request.url);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                let mut r = self.agent.put(&request.url);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send_empty()
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, "received response");
        Ok(HttpResponse { status, body })
    }
}

/// Encode a payload to JSON. Unset keys are stripped by the payload type's
/// `skip_serializing_if` attributes.
fn encode_payload<T: serde::Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn encode_query(query: &[(&'static str, String)]) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
