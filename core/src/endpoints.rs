//! Fixed endpoint paths of the MinuteDock REST API.

pub const USERS: &str = "/api/v1/users";
pub const CURRENT_USER: &str = "/api/v1/users/me";
pub const ACCOUNTS: &str = "/api/v1/accounts";
pub const CURRENT_ACCOUNT: &str = "/api/v1/accounts/current";
pub const CONTACTS: &str = "/api/v1/contacts";
pub const PROJECTS: &str = "/api/v1/projects";
pub const TASKS: &str = "/api/v1/tasks";
pub const ENTRIES: &str = "/api/v1/entries";
pub const CURRENT_ENTRY: &str = "/api/v1/entries/current";
pub const DOCK: &str = "/api/v1/dock";
pub const REPORTS: &str = "/api/v1/reports/generate";
