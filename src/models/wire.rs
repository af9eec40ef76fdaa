//! Loosely-typed shapes the backend is known to send, normalized once at the
//! boundary into the canonical models.

use serde::{Deserialize, Deserializer};

/// Identifier sent either as a string or as a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Field sent either as a list of strings or as one delimited string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    List(Vec<String>),
    Text(String),
}

impl StringOrList {
    /// Flatten into trimmed, non-empty entries. Text is split on `delimiter`.
    pub fn into_entries(self, delimiter: char) -> Vec<String> {
        let raw: Vec<String> = match self {
            StringOrList::List(items) => items,
            StringOrList::Text(text) => text.split(delimiter).map(str::to_string).collect(),
        };

        raw.into_iter()
            .map(|entry| strip_bullet(entry.trim()).to_string())
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

/// `•` always marks a bullet; `-` and `*` only when followed by whitespace
fn strip_bullet(entry: &str) -> &str {
    if let Some(rest) = entry.strip_prefix('•') {
        return rest.trim_start();
    }
    match entry.strip_prefix(&['-', '*'][..]) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => entry,
    }
}

/// List responses come bare or wrapped in `{ "results": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "data")]
        results: Vec<T>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { results } => results,
        }
    }
}

/// Deserialize an identifier that may arrive as a number
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Treat empty or whitespace-only strings as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_points_from_text() {
        let points = StringOrList::Text("- First point\n\n* Second point\n• Third".to_string())
            .into_entries('\n');
        assert_eq!(points, vec!["First point", "Second point", "Third"]);
    }

    #[test]
    fn test_leading_sign_is_not_a_bullet() {
        let points = StringOrList::List(vec!["-5% prices".to_string(), "*Note* the date".to_string()])
            .into_entries('\n');
        assert_eq!(points, vec!["-5% prices", "*Note* the date"]);

        let points = StringOrList::Text("- -5% prices\n-3 days left".to_string()).into_entries('\n');
        assert_eq!(points, vec!["-5% prices", "-3 days left"]);
    }

    #[test]
    fn test_tags_from_list_drop_blanks() {
        let tags = StringOrList::List(vec![" ai ".to_string(), "".to_string(), "ml".to_string()])
            .into_entries(',');
        assert_eq!(tags, vec!["ai", "ml"]);
    }

    #[test]
    fn test_list_envelope_shapes() {
        let bare: ListEnvelope<i32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);

        let wrapped: ListEnvelope<i32> = serde_json::from_str(r#"{"results": [3]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);

        let data: ListEnvelope<i32> = serde_json::from_str(r#"{"data": [4]}"#).unwrap();
        assert_eq!(data.into_vec(), vec![4]);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }
}
