use std::fmt;

use http::HeaderValue;

use crate::Error;

/// Reads a comma-delimited raw header into a collection.
///
/// Quoted sections are kept intact, empty elements are skipped.
pub(crate) fn from_comma_delimited<'i, I, T, E>(values: &mut I) -> Result<E, Error>
where
    I: Iterator<Item = &'i HeaderValue>,
    T: std::str::FromStr,
    E: FromIterator<T>,
{
    values
        .map(|value| value.to_str().map_err(Error::invalid_from))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flat_map(split_csv_str::<T>)
        .collect()
}

fn split_csv_str<T: std::str::FromStr>(
    string: &str,
) -> impl Iterator<Item = Result<T, Error>> + use<'_, T> {
    let mut in_quotes = false;
    string
        .split(move |c| {
            if c == '"' {
                in_quotes = !in_quotes;
                false
            } else {
                !in_quotes && c == ','
            }
        })
        .filter_map(|x| match x.trim() {
            "" => None,
            y => Some(y.parse().map_err(Error::invalid_from)),
        })
}

/// Format an iterator into a comma-delimited string.
pub(crate) fn fmt_comma_delimited<T: fmt::Display>(
    f: &mut fmt::Formatter,
    mut iter: impl Iterator<Item = T>,
) -> fmt::Result {
    if let Some(part) = iter.next() {
        fmt::Display::fmt(&part, f)?;
    }
    for part in iter {
        f.write_str(", ")?;
        fmt::Display::fmt(&part, f)?;
    }
    Ok(())
}
