//! Synchronous client library for the MinuteDock time-tracking REST API.
//!
//! # Overview
//! One [`MinuteDock`] client, one method per remote operation: list/get/
//! create/update over users, accounts, contacts, projects, tasks, and time
//! entries, plus timer control, report generation, and the dock. Every call
//! is a single blocking request/response round trip returning a typed record
//! (or list of records) from the `models` module.
//!
//! # Design
//! - `MinuteDock` holds only immutable configuration; clones share a ureq
//!   agent and no mutable state.
//! - Requests and responses are plain data (`HttpRequest`/`HttpResponse`),
//!   with `build_request`/`handle_response` public so both halves of a round
//!   trip are testable without a network.
//! - Failures are typed: non-2xx statuses become [`ApiError::Http`] and are
//!   never retried.
//! - Record fields are all `Option`; missing response keys decode to `None`
//!   and `None` fields are omitted on serialization.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod params;

pub use client::{MinuteDock, BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::{Account, Contact, Dock, Project, Report, Task, TimeEntry, User};
pub use params::{
    ContactParams, EntrySearch, IdFilter, ProjectParams, ReportParams, TaskParams, TimeEntryParams,
};
