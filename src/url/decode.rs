/// Percent-decodes a URL into its canonical id form
///
/// Input that does not decode to valid UTF-8 is returned unchanged.
///
/// # Examples
///
/// ```
/// use wikitree::url::decode_url;
///
/// assert_eq!(
///     decode_url("https://es.wikipedia.org/wiki/Categor%C3%ADa:Voleibol"),
///     "https://es.wikipedia.org/wiki/Categoría:Voleibol"
/// );
/// ```
pub fn decode_url(url: &str) -> String {
    match urlencoding::decode(url) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => url.to_string(),
    }
}
