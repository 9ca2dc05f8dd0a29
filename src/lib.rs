//! # sqlx-named-query
//!
//! Named SQL parameters and explicit row-to-struct mapping on top of SQLx.
//!
//! Write SQL with `:name` placeholders instead of positional `?` markers,
//! bind values by name, execute, and materialize plain structs from the
//! result rows.
//!
//! ## Features
//!
//! - **Named Placeholders**: Use `:param_name` instead of `?`; the template
//!   is rewritten to positional SQL in a single pass, and each name remembers
//!   every position it occupies
//! - **Bind by Name**: One bind fills every occurrence of a name; rebinding
//!   overwrites them all; `None` binds a SQL NULL so `IS :param` works
//! - **Explicit Row Mapping**: [`row_shape!`] declares a per-type
//!   column-setter table, matching result columns to fields by name with no
//!   runtime field lookup
//! - **Guaranteed Release**: [`NamedStatement::fetch_as`] closes the
//!   statement on every path, including mapping and driver failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sqlx::{Connection, SqliteConnection};
//! use sqlx_named_query::{row_shape, NamedStatement};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//! row_shape!(User {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! });
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
//!
//! let mut stmt = NamedStatement::prepare(
//!     &mut conn,
//!     "SELECT id, name, email FROM users WHERE id = :id OR referrer = :id",
//! )
//! .await?;
//! stmt.bind("id", 42)?;
//!
//! let users: Vec<User> = stmt.fetch_as().await?;
//! for user in users {
//!     println!("{}: {:?}", user.name, user.email);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! 1. **Parse**: [`parse`](parse::parse) scans the template once, replaces
//!    every `:name` with `?`, and records the 1-based positions each name
//!    occupies
//! 2. **Bind**: [`NamedStatement::bind`] looks the name up in that index and
//!    writes the value into every matching positional slot; an unknown name
//!    is an error with no side effects
//! 3. **Execute**: the positional SQL runs as a query or a mutation on the
//!    connection the statement was prepared on
//! 4. **Materialize**: [`materialize`](materialize::materialize) resolves
//!    the result columns against the target type's setter table once, then
//!    fills one `Default` instance per row
//!
//! A statement moves through `ready -> executed -> closed`; binding after
//! execution or using a closed statement fails with
//! [`Error::IllegalState`], and `close` is idempotent.
//!
//! ## Limitations
//!
//! - A statement borrows its connection exclusively and runs once; a fresh
//!   execution needs a fresh statement
//! - Placeholder names must match `[A-Za-z_][A-Za-z0-9_]*`; lookup is
//!   case-sensitive
//! - There is no escape syntax for a literal `:` followed by an identifier,
//!   so such text inside a string literal is rewritten as a parameter. A `:`
//!   followed by anything else (digits, spaces, end of input) is left alone
//! - Column values are assigned with no type conversion beyond the driver's
//!   native decoding; a mismatched field type fails the whole materialization

pub mod error;
pub mod materialize;
pub mod parse;
pub mod statement;
pub mod value;

pub use error::{Error, Result};
pub use materialize::{materialize, ColumnSetter, RowShape};
pub use parse::{parse, ParsedSql};
pub use statement::NamedStatement;
pub use value::Value;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::materialize::{materialize, RowShape};
    pub use crate::row_shape;
    pub use crate::NamedStatement;
    pub use crate::Value;
}
