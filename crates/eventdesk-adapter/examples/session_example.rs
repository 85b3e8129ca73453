/*
[INPUT]:  Backend base URL and organizer credentials from the environment
[OUTPUT]: Logged-in session, refreshed user, and a task board summary
[POS]:    Examples - session + lifecycle engine demonstration
[UPDATE]: When auth flow or board layout changes
*/

use std::sync::Arc;

use eventdesk_adapter::task::{categorize_for_board, status_text};
use eventdesk_adapter::*;

/// Example: session lifecycle
///
/// 1. Create HTTP client
/// 2. Log in through the session coordinator
/// 3. Fire two concurrent refreshes (one network call)
/// 4. Print the board of an event
#[tokio::main]
async fn main() {
    println!("=== eventdesk session example ===\n");

    let base_url =
        std::env::var("EVENTDESK_BASE_URL").unwrap_or_else(|_| http::DEFAULT_BASE_URL.to_string());
    let client = match EventdeskClient::with_config(ClientConfig::default(), &base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}", client.base_url());

    let store = Arc::new(MemorySessionStore::new());
    let coordinator = SessionCoordinator::new(Arc::new(client.clone()), store);

    let username = std::env::var("EVENTDESK_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("EVENTDESK_PASSWORD").unwrap_or_default();
    match coordinator.login(&username, &password).await {
        Ok(user) => println!("✓ Logged in as {} (id {})", user.username, user.id),
        Err(e) => {
            eprintln!("Login failed: {}", e);
            return;
        }
    }

    let first = coordinator.refresh();
    let second = coordinator.refresh();
    println!("  Shared refresh: {}", first.same_operation(&second));
    let (a, b) = tokio::join!(first, second);
    println!("✓ Refresh results: {a} / {b}");

    let event_id = 1;
    match coordinator
        .with_reauth(|| client.list_tasks(event_id))
        .await
    {
        Ok(tasks) => {
            let board = categorize_for_board(&tasks);
            for (status, column) in board.columns() {
                println!("  {:<17} {}", status_text(Some(status)), column.len());
            }
            println!("  ({} of {} tasks on the board)", board.len(), tasks.len());
        }
        Err(e) => eprintln!("Failed to list tasks: {}", e),
    }
}
