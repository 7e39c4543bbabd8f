use crate::warn;
use regex::Regex;

/// Compiles a user supplied lookup pattern. Invalid patterns are logged and count as a miss.
pub(crate) fn compile(pattern: &str, subject: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(rx) => Some(rx),
        Err(e) => {
            warn!("Invalid {} pattern '{}': {}", subject, pattern, e);
            None
        }
    }
}

/// First item whose name matches `pattern`, in iteration order.
pub(crate) fn first_match<'a, T>(items: impl IntoIterator<Item = &'a T>, pattern: &str, subject: &str, name: impl Fn(&T) -> &str) -> Option<&'a T>
where
    T: 'a,
{
    let rx = compile(pattern, subject)?;
    items.into_iter().find(|item| rx.is_match(name(item)))
}
