use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Selector token matching any single value of a field.
pub const ANY_TOKEN: &str = "/any/";
/// Selector token matching all values of a field at once (aggregation).
pub const ALL_TOKEN: &str = "/all/";

/// The five fields naming a collectd-style data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentField {
    Host,
    Plugin,
    PluginInstance,
    Type,
    TypeInstance,
}

impl IdentField {
    /// All fields in canonical order.
    pub const ALL: [IdentField; 5] = [
        IdentField::Host,
        IdentField::Plugin,
        IdentField::PluginInstance,
        IdentField::Type,
        IdentField::TypeInstance,
    ];

    /// Wire name of the field, as used in JSON payloads and query parameters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IdentField::Host => "host",
            IdentField::Plugin => "plugin",
            IdentField::PluginInstance => "plugin_instance",
            IdentField::Type => "type",
            IdentField::TypeInstance => "type_instance",
        }
    }
}

/// True when `value` is one of the two wildcard tokens.
#[must_use]
pub fn is_wildcard(value: &str) -> bool {
    value == ANY_TOKEN || value == ALL_TOKEN
}

/// Matches one selector field against one identifier field.
///
/// A missing selector value never matches, a wildcard selector value matches
/// any present identifier value, and a missing identifier value never matches.
/// Everything else is plain string equality.
#[must_use]
pub fn field_matches(selector: Option<&str>, ident: Option<&str>) -> bool {
    let Some(selector) = selector else {
        return false;
    };
    if is_wildcard(selector) {
        return ident.is_some();
    }
    let Some(ident) = ident else {
        return false;
    };
    selector == ident
}

/// Concrete identifier of one data series.
///
/// All five fields are present on every identifier the server hands out;
/// payloads with missing or unknown fields are rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ident {
    pub host: String,
    pub plugin: String,
    pub plugin_instance: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub type_instance: String,
}

impl Ident {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        plugin: impl Into<String>,
        plugin_instance: impl Into<String>,
        type_: impl Into<String>,
        type_instance: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            plugin: plugin.into(),
            plugin_instance: plugin_instance.into(),
            type_: type_.into(),
            type_instance: type_instance.into(),
        }
    }

    #[must_use]
    pub fn field(&self, field: IdentField) -> &str {
        match field {
            IdentField::Host => &self.host,
            IdentField::Plugin => &self.plugin,
            IdentField::PluginInstance => &self.plugin_instance,
            IdentField::Type => &self.type_,
            IdentField::TypeInstance => &self.type_instance,
        }
    }

    /// Human-readable label for this identifier within a selector's scope.
    ///
    /// Joins with `/` every field whose value differs from the selector
    /// (ASCII case-insensitive, and absent selector fields always differ).
    /// Returns `None` when every field agrees; hosts typically substitute
    /// a fixed label such as `"default"` in that case.
    #[must_use]
    pub fn describe(&self, selector: &Selector) -> Option<String> {
        let mut parts: SmallVec<[&str; 5]> = SmallVec::new();
        for field in IdentField::ALL {
            let value = self.field(field);
            let differs = match selector.field(field) {
                Some(selected) => !value.eq_ignore_ascii_case(selected),
                None => true,
            };
            if differs {
                parts.push(value);
            }
        }
        if parts.is_empty() { None } else { Some(parts.join("/")) }
    }
}

/// Possibly-wildcard, possibly-partial selector over identifiers.
///
/// Each field is either absent or a concrete value, where the concrete value
/// may be one of the wildcard tokens [`ANY_TOKEN`] and [`ALL_TOKEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_instance: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_instance: Option<String>,
}

impl Selector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector that names exactly one identifier.
    #[must_use]
    pub fn from_ident(ident: &Ident) -> Self {
        Self::new()
            .with_host(&ident.host)
            .with_plugin(&ident.plugin)
            .with_plugin_instance(&ident.plugin_instance)
            .with_type(&ident.type_)
            .with_type_instance(&ident.type_instance)
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    #[must_use]
    pub fn with_plugin_instance(mut self, plugin_instance: impl Into<String>) -> Self {
        self.plugin_instance = Some(plugin_instance.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    #[must_use]
    pub fn with_type_instance(mut self, type_instance: impl Into<String>) -> Self {
        self.type_instance = Some(type_instance.into());
        self
    }

    #[must_use]
    pub fn field(&self, field: IdentField) -> Option<&str> {
        match field {
            IdentField::Host => self.host.as_deref(),
            IdentField::Plugin => self.plugin.as_deref(),
            IdentField::PluginInstance => self.plugin_instance.as_deref(),
            IdentField::Type => self.type_.as_deref(),
            IdentField::TypeInstance => self.type_instance.as_deref(),
        }
    }

    pub fn set_field(&mut self, field: IdentField, value: Option<String>) {
        match field {
            IdentField::Host => self.host = value,
            IdentField::Plugin => self.plugin = value,
            IdentField::PluginInstance => self.plugin_instance = value,
            IdentField::Type => self.type_ = value,
            IdentField::TypeInstance => self.type_instance = value,
        }
    }

    /// True when every field of the selector matches the identifier, with
    /// [`field_matches`] semantics per field.
    #[must_use]
    pub fn matches(&self, ident: &Ident) -> bool {
        IdentField::ALL
            .iter()
            .all(|&field| field_matches(self.field(field), Some(ident.field(field))))
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        IdentField::ALL.iter().all(|&field| self.field(field).is_none())
    }
}
