use anyhow::{Context as _, Result, anyhow};
use gpui::{Hsla, Rgba};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fs, path::Path};

/// A partial theme, only the fields that are set replace the defaults.
///
/// ```json
/// { "colors": { "primary": "#4F46E5" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeOverride {
    #[serde(default)]
    pub colors: ThemeColorOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeColorOverride {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_color",
        deserialize_with = "deserialize_color"
    )]
    #[schemars(with = "Option<String>")]
    pub primary: Option<Hsla>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_color",
        deserialize_with = "deserialize_color"
    )]
    #[schemars(with = "Option<String>")]
    pub track: Option<Hsla>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_color",
        deserialize_with = "deserialize_color"
    )]
    #[schemars(with = "Option<String>")]
    pub buffer: Option<Hsla>,
}

impl ThemeOverride {
    /// Override only the primary color.
    pub fn primary(color: impl Into<Hsla>) -> Self {
        Self {
            colors: ThemeColorOverride {
                primary: Some(color.into()),
                ..Default::default()
            },
        }
    }

    /// Parse an override from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid theme override")
    }

    /// Load an override from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file: {}", path.display()))?;
        let overrides = Self::from_json(&content)?;
        tracing::info!("loaded theme override from {}", path.display());
        Ok(overrides)
    }

    /// The JSON schema of the theme override file.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = serde_json::to_value(schemars::schema_for!(ThemeOverride))
            .context("failed to serialize theme schema")?;
        Ok(schema)
    }
}

/// Parse a `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` color.
pub fn try_parse_color(color: &str) -> Result<Hsla> {
    let rgba = Rgba::try_from(color.trim())
        .map_err(|err| anyhow!("invalid color `{}`: {}", color, err))?;
    Ok(rgba.into())
}

/// Format a color as `#RRGGBBAA`.
pub fn format_color(color: Hsla) -> String {
    let rgba = Rgba::from(color);
    let channel = |v: f32| (v.clamp(0., 1.) * 255.).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        channel(rgba.r),
        channel(rgba.g),
        channel(rgba.b),
        channel(rgba.a)
    )
}

fn serialize_color<S>(color: &Option<Hsla>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match color {
        Some(color) => serializer.serialize_str(&format_color(*color)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<Hsla>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    try_parse_color(&value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}
