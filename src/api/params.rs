use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ident::{IdentField, Selector};
use crate::core::window::TimeWindow;

/// Insertion-ordered query parameters for endpoint calls and graph links.
///
/// Besides the usual `key=value` form consumed by HTTP clients, parameters
/// can be rendered to and parsed from the `;`-separated fragment form the
/// server embeds in graph URLs (`host=h;plugin=p;begin=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    entries: IndexMap<String, String>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Adds the endpoint action selecting the server-side handler.
    #[must_use]
    pub fn with_action(mut self, action: &str) -> Self {
        self.insert("action", action);
        self
    }

    /// Adds the `begin`/`end` pair for a display window.
    #[must_use]
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.insert("begin", window.begin.to_string());
        self.insert("end", window.end.to_string());
        self
    }

    /// Renders the `;`-separated, percent-escaped fragment form.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(&escape_fragment(key));
            out.push('=');
            out.push_str(&escape_fragment(value));
        }
        out
    }

    /// Parses the fragment form back into ordered parameters. Segments
    /// without `=` become keys with an empty value.
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        let mut params = Self::new();
        for segment in fragment.split(';').filter(|s| !s.is_empty()) {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, value),
                None => (segment, ""),
            };
            params.insert(unescape_fragment(key), unescape_fragment(value));
        }
        params
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reconciles the graph-level and instance-level selectors of one instance
/// into the minimal parameter set the server accepts.
///
/// Fields on which both selectors agree collapse to one parameter named
/// after the field; fields on which they differ emit a `graph_`/`inst_`
/// prefixed pair. Absent values serialize as empty strings.
#[must_use]
pub fn selector_params(graph: &Selector, instance: &Selector) -> QueryParams {
    let mut params = QueryParams::new();
    for field in IdentField::ALL {
        let graph_value = graph.field(field);
        let instance_value = instance.field(field);
        if graph_value == instance_value {
            params.insert(field.as_str(), graph_value.unwrap_or_default());
        } else {
            params.insert(
                format!("graph_{}", field.as_str()),
                graph_value.unwrap_or_default(),
            );
            params.insert(
                format!("inst_{}", field.as_str()),
                instance_value.unwrap_or_default(),
            );
        }
    }
    params
}

/// Inverse of [`selector_params`]: splits a reconciled parameter set back
/// into the graph-level and instance-level selectors. Empty values map to
/// absent fields.
#[must_use]
pub fn selector_pair(params: &QueryParams) -> (Selector, Selector) {
    let mut graph = Selector::new();
    let mut instance = Selector::new();
    for field in IdentField::ALL {
        let name = field.as_str();
        if let Some(value) = params.get(name) {
            let value = non_empty(value);
            graph.set_field(field, value.clone());
            instance.set_field(field, value);
            continue;
        }
        graph.set_field(field, params.get(&format!("graph_{name}")).and_then(non_empty));
        instance.set_field(field, params.get(&format!("inst_{name}")).and_then(non_empty));
    }
    (graph, instance)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

// The server escapes control bytes, '&', ';' and non-ASCII; '%' and '=' are
// escaped here as well so every value survives a round trip.
fn needs_escape(byte: u8) -> bool {
    byte < 32 || byte >= 128 || matches!(byte, b'&' | b';' | b'%' | b'=')
}

fn escape_fragment(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if needs_escape(byte) {
            out.push('%');
            out.push(HEX[usize::from(byte >> 4)] as char);
            out.push(HEX[usize::from(byte & 0x0f)] as char);
        } else {
            out.push(byte as char);
        }
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn unescape_fragment(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' && index + 2 < bytes.len() {
            if let (Some(high), Some(low)) =
                (hex_value(bytes[index + 1]), hex_value(bytes[index + 2]))
            {
                out.push((high << 4) | low);
                index += 3;
                continue;
            }
        }
        out.push(bytes[index]);
        index += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::{escape_fragment, unescape_fragment};

    #[test]
    fn fragment_escape_round_trips_reserved_bytes() {
        let raw = "a;b=c%d&e";
        let escaped = escape_fragment(raw);
        assert_eq!(escaped, "a%3bb%3dc%25d%26e");
        assert_eq!(unescape_fragment(&escaped), raw);
    }

    #[test]
    fn fragment_unescape_keeps_invalid_sequences_literal() {
        assert_eq!(unescape_fragment("50%"), "50%");
        assert_eq!(unescape_fragment("a%zz"), "a%zz");
    }
}
