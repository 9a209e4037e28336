//! Normalisation of free-text list inputs such as lessons and expertise.

/// Split a comma-separated string into trimmed, non-empty entries.
///
/// Order is preserved; whitespace-only segments are dropped.
///
/// # Examples
/// ```
/// use coursehub::domain::split_comma_list;
///
/// assert_eq!(
///     split_comma_list("Intro, , Getting Started,  "),
///     vec!["Intro".to_owned(), "Getting Started".to_owned()],
/// );
/// ```
#[must_use]
pub fn split_comma_list(raw: &str) -> Vec<String> {
    normalise_tags(raw.split(','))
}

/// Trim every entry and drop the ones left empty.
pub fn normalise_tags<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .collect()
}
