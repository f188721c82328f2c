//! Full lifecycle test against the live mock server.
//!
//! Starts the mock server on a random port, then exercises every facade
//! operation over real HTTP: users and accounts, contact/project/task
//! create-get-update, entry create/search/update, timer start/pause/log,
//! report generation, and the dock.

use minutedock_core::{
    ApiError, ContactParams, EntrySearch, MinuteDock, ProjectParams, TaskParams, TimeEntryParams,
};

fn spawn_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn full_api_lifecycle() {
    let addr = spawn_mock_server();
    let client = MinuteDock::new("test-key")
        .with_account_id("1")
        .with_base_url(format!("http://{addr}"));

    // users and accounts
    let me = client.current_user().unwrap();
    assert_eq!(me.email.as_deref(), Some("ada@example.com"));

    let users = client.users(true).unwrap();
    assert_eq!(users.len(), 2);

    let accounts = client.accounts().unwrap();
    assert_eq!(accounts.len(), 1);

    let account = client.current_account().unwrap();
    assert_eq!(account.name.as_deref(), Some("Example Pty Ltd"));

    // contacts: create, get, update, list
    assert!(client.contacts(false, true).unwrap().is_empty());

    let created = client
        .create_contact(&ContactParams {
            name: Some("Acme".to_string()),
            short_code: Some("acme".to_string()),
            active: Some(true),
            ..ContactParams::default()
        })
        .unwrap();
    let contact_id = created.id.unwrap();
    assert_eq!(created.name.as_deref(), Some("Acme"));

    let fetched = client.contact(contact_id).unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update_contact(
            contact_id,
            &ContactParams {
                name: Some("Acme Pty Ltd".to_string()),
                ..ContactParams::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Acme Pty Ltd"));
    assert_eq!(updated.short_code.as_deref(), Some("acme"));

    assert_eq!(client.contacts(false, true).unwrap().len(), 1);

    // projects
    let project = client
        .create_project(&ProjectParams {
            name: Some("Rollout".to_string()),
            contact_id: Some(contact_id),
            active: Some(true),
            ..ProjectParams::default()
        })
        .unwrap();
    let project_id = project.id.unwrap();
    assert_eq!(project.contact_id, Some(contact_id));

    let project = client.project(project_id).unwrap();
    assert_eq!(project.name.as_deref(), Some("Rollout"));

    let project = client
        .update_project(
            project_id,
            &ProjectParams {
                hidden: Some(true),
                ..ProjectParams::default()
            },
        )
        .unwrap();
    assert_eq!(project.hidden, Some(true));
    assert_eq!(client.projects(false, true).unwrap().len(), 1);

    // tasks
    let task = client
        .create_task(&TaskParams {
            short_code: Some("dev".to_string()),
            description: Some("Development".to_string()),
            active: Some(true),
            ..TaskParams::default()
        })
        .unwrap();
    let task_id = task.id.unwrap();

    let task = client
        .update_task(
            task_id,
            &TaskParams {
                description: Some("Development work".to_string()),
                ..TaskParams::default()
            },
        )
        .unwrap();
    assert_eq!(task.description.as_deref(), Some("Development work"));
    assert_eq!(client.task(task_id).unwrap(), task);
    assert_eq!(client.tasks(false, true).unwrap().len(), 1);

    // entries
    let entry = client
        .create_entry(&TimeEntryParams {
            description: Some("standup".to_string()),
            duration: Some(900),
            contact_id: Some(contact_id),
            project_id: Some(project_id),
            task_ids: Some(vec![task_id]),
            ..TimeEntryParams::default()
        })
        .unwrap();
    let entry_id = entry.id.unwrap();
    assert_eq!(entry.duration, Some(900));

    let entry = client
        .update_entry(
            entry_id,
            &TimeEntryParams {
                duration: Some(1800),
                ..TimeEntryParams::default()
            },
        )
        .unwrap();
    assert_eq!(entry.duration, Some(1800));
    assert_eq!(entry.description.as_deref(), Some("standup"));

    let found = client.search_entries(&EntrySearch::default()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, Some(entry_id));

    // timer: start shows up in the dock, log moves it to the entries
    let started = client.start_timer().unwrap();
    assert_eq!(started.timer_active, Some(true));

    let docked = client.dock().unwrap();
    assert_eq!(docked.len(), 1);
    assert_eq!(docked[0].timer_active, Some(true));

    let paused = client.pause_timer().unwrap();
    assert_eq!(paused.timer_active, Some(false));

    let logged = client.log_timer().unwrap();
    assert!(logged.logged_at.is_some());
    assert!(client.dock().unwrap().is_empty());

    let found = client.search_entries(&EntrySearch::default()).unwrap();
    assert_eq!(found.len(), 2);

    // pagination passthrough
    let page = client
        .search_entries(&EntrySearch {
            limit: 1,
            offset: 1,
            ..EntrySearch::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);

    // reports
    let report = client.generate_report(&Default::default()).unwrap();
    assert_eq!(report.total_entries, Some(2));
    assert_eq!(report.hours, Some(0.5));

    // a missing resource surfaces as a typed HTTP error, not a panic
    let err = client.contact(9999).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Nothing listens on this port.
    let client = MinuteDock::new("test-key").with_base_url("http://127.0.0.1:1");
    let err = client.accounts().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
