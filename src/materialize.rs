use crate::error::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

/// One entry of a row shape's field-accessor table.
///
/// Pairs a column name with a typed setter that reads the column at the
/// given ordinal out of a row and assigns it to the matching field. The
/// [`row_shape!`](crate::row_shape) macro builds these; writing one by hand
/// is only needed when a column name is not a valid field identifier.
pub struct ColumnSetter<T> {
    pub column: &'static str,
    pub set: fn(&mut T, &SqliteRow, usize) -> sqlx::Result<()>,
}

/// A type that can be assembled from a result row, column by column.
///
/// Each instance starts from `Default` and is filled in through the
/// column-setter table, matching result columns to fields by exact,
/// case-sensitive name. This keeps the "match by name" contract without any
/// runtime field lookup: the table is declared once per type, usually via
/// [`row_shape!`](crate::row_shape).
pub trait RowShape: Default + Sized {
    /// The field-accessor table, one entry per mappable column.
    fn columns() -> Vec<ColumnSetter<Self>>;
}

/// Converts fetched rows into instances of `T`, in row order.
///
/// The result layout is resolved once against the first row: every result
/// column must have a same-named entry in `T`'s setter table, or
/// [`Error::UnmappedColumn`] is returned before any row is touched. Per row,
/// a fresh `T::default()` is filled by running every setter in column order;
/// a value whose native type does not fit the field fails with
/// [`Error::ColumnDecode`]. Any failure aborts the whole materialization and
/// discards partial results.
///
/// Columns are visited in the cursor's declared order, all of them including
/// the last, and duplicate column names are not deduplicated: each
/// occurrence assigns, so a later duplicate wins.
pub fn materialize<T: RowShape>(rows: &[SqliteRow]) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(rows.len());
    let Some(first) = rows.first() else {
        return Ok(out);
    };

    let setters = T::columns();
    let layout = first
        .columns()
        .iter()
        .map(|column| {
            setters
                .iter()
                .position(|setter| setter.column == column.name())
                .map(|index| (column.ordinal(), index))
                .ok_or_else(|| Error::UnmappedColumn(column.name().to_owned()))
        })
        .collect::<Result<Vec<_>>>()?;

    for row in rows {
        let mut shaped = T::default();
        for &(ordinal, index) in &layout {
            let setter = &setters[index];
            (setter.set)(&mut shaped, row, ordinal).map_err(|source| Error::ColumnDecode {
                column: setter.column.to_owned(),
                source,
            })?;
        }
        out.push(shaped);
    }
    Ok(out)
}

/// Declares the column-setter table for a row shape.
///
/// Lists the fields of an existing `Default` struct together with their
/// types; each field maps to the result column of the same name.
///
/// # Examples
///
/// ```
/// use sqlx_named_query::row_shape;
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
/// row_shape!(User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// });
/// ```
#[macro_export]
macro_rules! row_shape {
    ($ty:ty { $($field:ident : $fty:ty),+ $(,)? }) => {
        impl $crate::materialize::RowShape for $ty {
            fn columns() -> ::std::vec::Vec<$crate::materialize::ColumnSetter<Self>> {
                ::std::vec![
                    $($crate::materialize::ColumnSetter {
                        column: ::core::stringify!($field),
                        set: |shaped, row, ordinal| {
                            shaped.$field = ::sqlx::Row::try_get::<$fty, _>(row, ordinal)?;
                            ::std::result::Result::Ok(())
                        },
                    }),+
                ]
            }
        }
    };
}
