use crate::error::{Error, Result};
use crate::materialize::{materialize, RowShape};
use crate::parse::{parse, ParsedSql};
use crate::value::Value;
use log::{debug, warn};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Connection, Executor};

/// Type alias for an SQLx Query with SQLite arguments
pub type Q<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Where a statement is in its lifecycle.
///
/// `Ready` accepts any number of binds, then exactly one execution moves the
/// statement to `Executed`. `Closed` is terminal; everything except another
/// `close` is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Executed,
    Closed,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::Ready => "ready",
            State::Executed => "executed",
            State::Closed => "closed",
        }
    }
}

/// A prepared statement with named placeholders, bound to one connection.
///
/// `NamedStatement` parses `:name` placeholders out of an SQL template,
/// prepares the rewritten positional SQL on the given connection, and then
/// accepts values by name. Each name may occupy several positions; a single
/// [`bind`](Self::bind) fills all of them, and rebinding a name overwrites
/// all of them (last write wins).
///
/// The statement borrows its connection exclusively for its whole lifecycle,
/// so it cannot be shared between tasks; a fresh execution requires a fresh
/// statement.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::{Connection, SqliteConnection};
/// use sqlx_named_query::NamedStatement;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
///
/// let mut stmt = NamedStatement::prepare(
///     &mut conn,
///     "INSERT INTO users (id, name) VALUES (:id, :name)",
/// )
/// .await?;
/// stmt.bind("id", 42)?.bind("name", "John Doe")?;
///
/// let inserted = stmt.execute_update().await?;
/// stmt.close().await?;
/// println!("Inserted {inserted} rows");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NamedStatement<'c> {
    conn: &'c mut SqliteConnection,
    parsed: ParsedSql,
    slots: Vec<Option<Value>>,
    state: State,
}

impl<'c> NamedStatement<'c> {
    /// Parses the template and prepares the rewritten SQL on `conn`.
    ///
    /// The connection stays exclusively borrowed until the statement is
    /// dropped. Malformed SQL that survives placeholder rewriting is
    /// reported here by the driver as [`Error::Database`].
    pub async fn prepare(conn: &'c mut SqliteConnection, template: &str) -> Result<Self> {
        let parsed = parse(template)?;
        (&mut *conn).prepare(parsed.sql()).await?;
        debug!(
            "prepared statement with {} placeholder(s): {}",
            parsed.placeholder_count(),
            parsed.sql()
        );

        let slots = vec![None; parsed.placeholder_count()];
        Ok(Self {
            conn,
            parsed,
            slots,
            state: State::Ready,
        })
    }

    /// The rewritten SQL with `?` placeholders, as sent to the driver.
    pub fn positional_sql(&self) -> &str {
        self.parsed.sql()
    }

    /// Binds `value` to every position occupied by `name`.
    ///
    /// `None` binds a SQL NULL, so `WHERE x IS :param` behaves as expected.
    /// Returns [`Error::ParameterNotFound`] if `name` never appeared in the
    /// template; previously bound slots are left untouched in that case.
    /// Binding is only allowed before execution.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.expect_ready("bind")?;
        let positions = self
            .parsed
            .positions(name)
            .ok_or_else(|| Error::ParameterNotFound(name.to_owned()))?;

        let value = value.into();
        for &position in positions {
            self.slots[position - 1] = Some(value.clone());
        }
        Ok(self)
    }

    /// Runs the statement as a query and returns every result row.
    ///
    /// Every placeholder must have been bound; otherwise [`Error::Unbound`]
    /// names the first missing one. Driver failures are surfaced verbatim as
    /// [`Error::Database`] with no retry.
    pub async fn execute_query(&mut self) -> Result<Vec<SqliteRow>> {
        self.expect_ready("execute")?;
        self.state = State::Executed;

        let Self {
            conn,
            parsed,
            slots,
            ..
        } = self;
        let mut query = sqlx::query::<Sqlite>(parsed.sql());
        for (index, slot) in slots.iter().enumerate() {
            let value = slot.as_ref().ok_or_else(|| Error::Unbound {
                name: parsed.names()[index].clone(),
                position: index + 1,
            })?;
            query = bind_value(query, value);
        }
        Ok(query.fetch_all(&mut **conn).await?)
    }

    /// Runs the statement as a mutation and returns the affected row count.
    ///
    /// Same binding and failure contract as [`execute_query`](Self::execute_query).
    pub async fn execute_update(&mut self) -> Result<u64> {
        self.expect_ready("execute")?;
        self.state = State::Executed;

        let Self {
            conn,
            parsed,
            slots,
            ..
        } = self;
        let mut query = sqlx::query::<Sqlite>(parsed.sql());
        for (index, slot) in slots.iter().enumerate() {
            let value = slot.as_ref().ok_or_else(|| Error::Unbound {
                name: parsed.names()[index].clone(),
                position: index + 1,
            })?;
            query = bind_value(query, value);
        }
        let done = query.execute(&mut **conn).await?;
        Ok(done.rows_affected())
    }

    /// Executes the query and materializes every row into `T`.
    ///
    /// The statement is closed on every path: after a successful fetch, after
    /// a mapping failure, and after a driver error. A cleanup failure
    /// following an earlier error is logged and never masks the original
    /// error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sqlx::{Connection, SqliteConnection};
    /// use sqlx_named_query::{row_shape, NamedStatement};
    ///
    /// #[derive(Debug, Default)]
    /// struct User {
    ///     id: i64,
    ///     name: String,
    /// }
    /// row_shape!(User { id: i64, name: String });
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
    /// let mut stmt = NamedStatement::prepare(
    ///     &mut conn,
    ///     "SELECT id, name FROM users WHERE id = :id",
    /// )
    /// .await?;
    /// stmt.bind("id", 42)?;
    ///
    /// let users: Vec<User> = stmt.fetch_as().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_as<T: RowShape>(&mut self) -> Result<Vec<T>> {
        let fetched = match self.execute_query().await {
            Ok(rows) => materialize(&rows),
            Err(e) => Err(e),
        };
        match self.close().await {
            Ok(()) => fetched,
            Err(close_error) => match fetched {
                Ok(_) => Err(close_error),
                Err(original) => {
                    warn!("failed to release statement after error: {close_error}");
                    Err(original)
                }
            },
        }
    }

    /// Releases the statement. Idempotent: the first call clears bound
    /// values and drops the driver-side statements cached on the
    /// connection; later calls return `Ok(())` without touching the driver.
    pub async fn close(&mut self) -> Result<()> {
        if self.state == State::Closed {
            return Ok(());
        }
        self.state = State::Closed;
        self.slots.clear();
        self.conn.clear_cached_statements().await?;
        Ok(())
    }

    fn expect_ready(&self, operation: &'static str) -> Result<()> {
        match self.state {
            State::Ready => Ok(()),
            state => Err(Error::IllegalState {
                operation,
                state: state.name(),
            }),
        }
    }
}

fn bind_value<'q>(query: Q<'q>, value: &Value) -> Q<'q> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Integer(v) => query.bind(*v),
        Value::Real(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Blob(v) => query.bind(v.clone()),
    }
}
