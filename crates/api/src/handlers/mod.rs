pub mod media;
pub mod search;
pub mod users;
pub mod words;

/// First value of `key` in a decoded query string. Repeated keys after the
/// first are ignored.
pub(crate) fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
