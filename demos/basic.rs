//! Basic example walking through the whole query lifecycle
//!
//! Run with: cargo run --example basic
//!
//! Uses an in-memory SQLite database, so no setup is required.

use sqlx::{Connection, SqliteConnection};
use sqlx_named_query::{row_shape, NamedStatement};

#[derive(Debug, Default)]
struct User {
    id: i64,
    name: String,
    email: Option<String>,
}
row_shape!(User {
    id: i64,
    name: String,
    email: Option<String>,
});

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut conn = SqliteConnection::connect("sqlite::memory:").await?;

    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT
        )",
    )
    .execute(&mut conn)
    .await?;

    // Example 1: insert with named binds
    println!("--- Example 1: Inserting users ---");
    let users_to_insert = [
        (1, "Alice", Some("alice@example.com")),
        (2, "Bob", Some("bob@example.com")),
        (3, "Charlie", None),
    ];

    for (id, name, email) in users_to_insert {
        let mut stmt = NamedStatement::prepare(
            &mut conn,
            "INSERT INTO users (id, name, email) VALUES (:id, :name, :email)",
        )
        .await?;
        stmt.bind("id", id)?.bind("name", name)?.bind("email", email)?;

        let inserted = stmt.execute_update().await?;
        stmt.close().await?;
        println!("Inserted user '{name}' ({inserted} row)");
    }

    // Example 2: fetch everything back as structs
    println!("\n--- Example 2: Fetching all users ---");
    let mut stmt = NamedStatement::prepare(
        &mut conn,
        "SELECT id, name, email FROM users ORDER BY id",
    )
    .await?;
    let users: Vec<User> = stmt.fetch_as().await?;
    println!("Found {} users:", users.len());
    for user in &users {
        println!("  - {} (id={}, email={:?})", user.name, user.id, user.email);
    }

    // Example 3: a NULL bind matches rows via IS
    println!("\n--- Example 3: Users without an email ---");
    let mut stmt = NamedStatement::prepare(
        &mut conn,
        "SELECT id, name, email FROM users WHERE email IS :email",
    )
    .await?;
    stmt.bind("email", None::<String>)?;
    let users: Vec<User> = stmt.fetch_as().await?;
    for user in &users {
        println!("  - {} has no email on file", user.name);
    }

    // Example 4: one name, several positions
    println!("\n--- Example 4: Repeated parameter ---");
    let mut stmt = NamedStatement::prepare(
        &mut conn,
        "SELECT id, name, email FROM users WHERE id = :key OR length(name) = :key",
    )
    .await?;
    stmt.bind("key", 3)?;
    let users: Vec<User> = stmt.fetch_as().await?;
    println!("Matched {} users", users.len());

    Ok(())
}
