//! YAML front matter parsing for markdown documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// Front matter fields relevant to sidebar generation.
///
/// Unknown keys are ignored; documents carry plenty of front matter that
/// only the renderer cares about.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sidebar_label: Option<String>,
    pub sidebar_position: Option<f64>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
}

/// A tag written as a plain string or as an object with a `label`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Tag {
    Label(String),
    Object { label: String },
}

impl Tag {
    fn into_label(self) -> String {
        match self {
            Self::Label(label) | Self::Object { label } => label,
        }
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Vec::<Tag>::deserialize(deserializer)?;
    Ok(tags.into_iter().map(Tag::into_label).collect())
}

/// Split a leading `---` delimited block from markdown content.
///
/// Returns the raw YAML (without delimiters) and the remaining body. Content
/// without a complete front matter block is returned unchanged as the body.
pub(crate) fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse front matter YAML.
///
/// Empty content yields the default (all fields unset).
pub(crate) fn parse_front_matter(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(trimmed)
}

/// Recover every field that parses on its own from front matter that failed
/// as a whole.
///
/// A malformed field is left unset instead of discarding `draft` and the
/// other valid fields along with it.
pub(crate) fn salvage_front_matter(yaml: &str) -> FrontMatter {
    let Ok(Value::Mapping(map)) = serde_yaml::from_str::<Value>(yaml) else {
        return FrontMatter::default();
    };

    FrontMatter {
        id: field(&map, "id"),
        title: field(&map, "title"),
        sidebar_label: field(&map, "sidebar_label"),
        sidebar_position: field(&map, "sidebar_position"),
        slug: field(&map, "slug"),
        tags: field::<Vec<Value>>(&map, "tags")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| serde_yaml::from_value::<Tag>(tag).ok())
            .map(Tag::into_label)
            .collect(),
        draft: field(&map, "draft").unwrap_or_default(),
    }
}

fn field<T: DeserializeOwned>(map: &Mapping, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_yaml::from_value(value.clone()).ok())
}
