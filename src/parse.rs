use regex::Regex;
use std::collections::HashMap;

/// A named parameter is `:` followed by an identifier-start character
/// (letter or underscore, never a digit), then identifier-continue
/// characters. Anything else after a `:` is copied through unchanged,
/// so `'12:30'` and a trailing `:` survive as-is.
const PARAMETER: &str = r":([A-Za-z_][A-Za-z0-9_]*)";

/// The result of parsing an SQL template with named placeholders.
///
/// Holds the rewritten positional SQL plus the name-to-positions index
/// built during the scan. Immutable once constructed; a [`NamedStatement`]
/// owns exactly one of these for its whole lifecycle.
///
/// [`NamedStatement`]: crate::NamedStatement
///
/// # Examples
///
/// ```
/// use sqlx_named_query::parse::parse;
///
/// let parsed = parse("INSERT INTO user (id, name, email) VALUES (:id, :name, :email)")?;
/// assert_eq!(parsed.sql(), "INSERT INTO user (id, name, email) VALUES (?, ?, ?)");
/// assert_eq!(parsed.positions("name"), Some(&[2][..]));
/// # Ok::<(), sqlx_named_query::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSql {
    sql: String,
    names: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl ParsedSql {
    /// The rewritten SQL with every named placeholder replaced by `?`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameter names in placeholder order, one entry per `?`.
    /// Repeated names appear once per occurrence.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The 1-based placeholder positions recorded for `name`, in
    /// left-to-right occurrence order. `None` if the name never
    /// appeared in the template. Lookup is case-sensitive.
    pub fn positions(&self, name: &str) -> Option<&[usize]> {
        self.positions.get(name).map(Vec::as_slice)
    }

    /// Number of positional placeholders in the rewritten SQL.
    pub fn placeholder_count(&self) -> usize {
        self.names.len()
    }
}

/// Converts named placeholders (`:name`) to positional placeholders (`?`),
/// recording which positions each name occupies.
///
/// The scan is a single pass over the template. A `:` immediately followed
/// by an ASCII letter or underscore starts a parameter token; the token is
/// replaced by one `?` and the running 1-based position counter is recorded
/// under the name. Duplicate names accumulate positions in occurrence order.
/// A `:` followed by anything else (a digit, whitespace, another `:`, end of
/// input) is treated as literal text. Identifier characters are ASCII only,
/// so a non-ASCII letter ends the name rather than extending it.
///
/// Known limitation, inherited from the placeholder syntax itself: there is
/// no escape mechanism, so `:word` inside a string literal is
/// indistinguishable from a parameter and will be rewritten.
///
/// # Examples
///
/// ```
/// use sqlx_named_query::parse::parse;
///
/// let parsed = parse("SELECT * FROM t WHERE a = :x OR b = :x")?;
/// assert_eq!(parsed.sql(), "SELECT * FROM t WHERE a = ? OR b = ?");
/// assert_eq!(parsed.positions("x"), Some(&[1, 2][..]));
/// # Ok::<(), sqlx_named_query::Error>(())
/// ```
pub fn parse(template: &str) -> crate::Result<ParsedSql> {
    let regex = Regex::new(PARAMETER)?;

    let mut names = Vec::new();
    let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, captures) in regex.captures_iter(template).enumerate() {
        let name = captures[1].to_owned();
        positions.entry(name.clone()).or_default().push(index + 1);
        names.push(name);
    }
    let sql = regex.replace_all(template, "?").into_owned();

    Ok(ParsedSql {
        sql,
        names,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_params_is_identity() {
        let parsed = parse("SELECT * FROM users").unwrap();
        assert_eq!(parsed.sql(), "SELECT * FROM users");
        assert_eq!(parsed.placeholder_count(), 0);
        assert!(parsed.names().is_empty());
    }

    #[test]
    fn test_parse_single_param() {
        let parsed = parse("SELECT * FROM users WHERE id = :id").unwrap();
        assert_eq!(parsed.sql(), "SELECT * FROM users WHERE id = ?");
        assert_eq!(parsed.positions("id"), Some(&[1][..]));
    }

    #[test]
    fn test_parse_multiple_params_in_order() {
        let parsed =
            parse("INSERT INTO user (id, name, email) VALUES (:id, :name, :email)").unwrap();
        assert_eq!(
            parsed.sql(),
            "INSERT INTO user (id, name, email) VALUES (?, ?, ?)"
        );
        assert_eq!(parsed.positions("id"), Some(&[1][..]));
        assert_eq!(parsed.positions("name"), Some(&[2][..]));
        assert_eq!(parsed.positions("email"), Some(&[3][..]));
        assert_eq!(parsed.names(), &["id", "name", "email"]);
    }

    #[test]
    fn test_parse_repeated_param_accumulates_positions() {
        let parsed = parse("SELECT * FROM t WHERE a = :x OR b = :x").unwrap();
        assert_eq!(parsed.sql(), "SELECT * FROM t WHERE a = ? OR b = ?");
        assert_eq!(parsed.positions("x"), Some(&[1, 2][..]));
        assert_eq!(parsed.names(), &["x", "x"]);
    }

    #[test]
    fn test_parse_with_underscores() {
        let parsed = parse("SELECT * FROM users WHERE user_id = :user_id").unwrap();
        assert_eq!(parsed.sql(), "SELECT * FROM users WHERE user_id = ?");
        assert_eq!(parsed.positions("user_id"), Some(&[1][..]));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let parsed = parse("SELECT :Name, :name").unwrap();
        assert_eq!(parsed.positions("Name"), Some(&[1][..]));
        assert_eq!(parsed.positions("name"), Some(&[2][..]));
    }

    #[test]
    fn test_parse_colon_before_digit_is_literal() {
        // Time-literal shapes never start an identifier.
        let parsed = parse("SELECT * FROM log WHERE at = '12:30:45'").unwrap();
        assert_eq!(parsed.sql(), "SELECT * FROM log WHERE at = '12:30:45'");
        assert_eq!(parsed.placeholder_count(), 0);
    }

    #[test]
    fn test_parse_names_are_ascii_only() {
        // a non-ASCII letter ends the identifier instead of extending it
        let parsed = parse("SELECT :née").unwrap();
        assert_eq!(parsed.sql(), "SELECT ?ée");
        assert_eq!(parsed.positions("n"), Some(&[1][..]));
        assert_eq!(parsed.positions("née"), None);
    }

    #[test]
    fn test_parse_trailing_colon_is_literal() {
        let parsed = parse("SELECT 'label:'").unwrap();
        assert_eq!(parsed.sql(), "SELECT 'label:'");
        assert_eq!(parsed.placeholder_count(), 0);
    }

    #[test]
    fn test_parse_double_colon_rewrites_second_token() {
        // Pins the documented limitation: no escape syntax exists, so a
        // cast-style double colon still captures the identifier after it.
        let parsed = parse("SELECT x::text FROM t").unwrap();
        assert_eq!(parsed.sql(), "SELECT x:? FROM t");
        assert_eq!(parsed.positions("text"), Some(&[1][..]));
    }

    #[test]
    fn test_parse_positions_strictly_increase() {
        let parsed = parse(":a :b :a :c :a").unwrap();
        assert_eq!(parsed.sql(), "? ? ? ? ?");
        assert_eq!(parsed.positions("a"), Some(&[1, 3, 5][..]));
        assert_eq!(parsed.positions("b"), Some(&[2][..]));
        assert_eq!(parsed.positions("c"), Some(&[4][..]));
    }

    #[test]
    fn test_parse_unknown_name_lookup_is_none() {
        let parsed = parse("SELECT :a").unwrap();
        assert_eq!(parsed.positions("b"), None);
    }
}
