//! Shape checks for raw sidebar definitions.
//!
//! A sidebar value may be a list of items, a single item descriptor, or a
//! category shorthand object. Items may be:
//!
//! - a doc id string
//! - `{type: doc | ref, id, label?, className?, customProps?}`
//! - `{type: link, href, label, className?, customProps?}`
//! - `{type: category, label, items, collapsible?, collapsed?, link?, ...}`
//! - `{type: autogenerated, dirName}`
//! - `{"Label": [items]}`, one category per key
//!
//! Validation stops at the first problem and reports where it is.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sidenav_docs::CategoryLinkConfig;

use crate::error::ValidationError;
use crate::model::{CategoryItemConfig, SidebarItemConfig, SidebarsConfig, ValidatedSidebars};

const ITEM_TYPES: &str = "doc, ref, link, category, autogenerated";

/// Category descriptor before its children are checked.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CategoryDescriptor {
    label: String,
    items: Value,
    #[serde(default)]
    collapsible: Option<bool>,
    #[serde(default)]
    collapsed: Option<bool>,
    #[serde(default)]
    link: Option<CategoryLinkConfig>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    custom_props: Option<Value>,
}

/// Validate raw sidebar definitions.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in file order.
pub fn validate(config: &SidebarsConfig) -> Result<ValidatedSidebars, ValidationError> {
    let mut seen = HashSet::with_capacity(config.len());
    let mut sidebars = ValidatedSidebars::new();

    for (name, value) in config.entries() {
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateSidebar(name.clone()));
        }
        let items = validate_sidebar(name, value)?;
        sidebars.push(name.clone(), items);
    }

    Ok(sidebars)
}

fn validate_sidebar(
    sidebar: &str,
    value: &Value,
) -> Result<Vec<SidebarItemConfig>, ValidationError> {
    match value {
        Value::Array(items) => validate_items(sidebar, items, ""),
        // A lone descriptor or shorthand object stands for a one-item list
        Value::Object(_) => Ok(vec![validate_item(sidebar, value, "[0]")?]),
        other => Err(ValidationError::InvalidSidebar {
            sidebar: sidebar.to_owned(),
            message: format!(
                "expected a list of items, an item descriptor or a category shorthand object, got {}",
                describe(other)
            ),
        }),
    }
}

fn validate_items(
    sidebar: &str,
    items: &[Value],
    prefix: &str,
) -> Result<Vec<SidebarItemConfig>, ValidationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_item(sidebar, item, &format!("{prefix}[{i}]")))
        .collect()
}

fn validate_item(
    sidebar: &str,
    value: &Value,
    location: &str,
) -> Result<SidebarItemConfig, ValidationError> {
    let invalid = |message: String| ValidationError::InvalidItem {
        sidebar: sidebar.to_owned(),
        location: location.to_owned(),
        message,
    };

    let object = match value {
        Value::String(id) => return Ok(SidebarItemConfig::Shorthand(id.clone())),
        Value::Object(object) => object,
        other => {
            return Err(invalid(format!(
                "doc ids must be strings, got {}",
                describe(other)
            )));
        }
    };

    let item_type = match object.get("type") {
        None => return validate_category_shorthand(sidebar, object, location),
        Some(Value::String(t)) => t.as_str(),
        Some(other) => {
            return Err(invalid(format!(
                "item `type` must be a string, got {}",
                describe(other)
            )));
        }
    };

    match item_type {
        "doc" => descriptor(object, "doc")
            .map(SidebarItemConfig::Doc)
            .map_err(invalid),
        "ref" => descriptor(object, "ref")
            .map(SidebarItemConfig::Ref)
            .map_err(invalid),
        "link" => descriptor(object, "link")
            .map(SidebarItemConfig::Link)
            .map_err(invalid),
        "autogenerated" => descriptor(object, "autogenerated")
            .map(SidebarItemConfig::Autogenerated)
            .map_err(invalid),
        "category" => {
            let category: CategoryDescriptor =
                descriptor(object, "category").map_err(invalid)?;
            let Value::Array(children) = &category.items else {
                return Err(invalid(format!(
                    "category `items` must be a list, got {}",
                    describe(&category.items)
                )));
            };
            let items = validate_items(sidebar, children, &format!("{location}.items"))?;
            Ok(SidebarItemConfig::Category(CategoryItemConfig {
                label: category.label,
                items,
                collapsible: category.collapsible,
                collapsed: category.collapsed,
                link: category.link,
                class_name: category.class_name,
                custom_props: category.custom_props,
            }))
        }
        other => Err(invalid(format!(
            "unknown item type `{other}` (expected one of: {ITEM_TYPES})"
        ))),
    }
}

fn validate_category_shorthand(
    sidebar: &str,
    object: &Map<String, Value>,
    location: &str,
) -> Result<SidebarItemConfig, ValidationError> {
    if object.is_empty() {
        return Err(ValidationError::InvalidItem {
            sidebar: sidebar.to_owned(),
            location: location.to_owned(),
            message: "empty object is not an item (expected a `type` field or a category \
                      shorthand like {\"Label\": [...]})"
                .to_owned(),
        });
    }

    let mut categories = Vec::with_capacity(object.len());
    for (label, value) in object {
        let Value::Array(children) = value else {
            return Err(ValidationError::InvalidItem {
                sidebar: sidebar.to_owned(),
                location: location.to_owned(),
                message: format!(
                    "category shorthand `{label}` must map to a list of items, got {}",
                    describe(value)
                ),
            });
        };
        let items = validate_items(sidebar, children, &format!("{location}[{label:?}]"))?;
        categories.push((label.clone(), items));
    }

    Ok(SidebarItemConfig::CategoryShorthand(categories))
}

/// Deserialize a typed descriptor, ignoring its `type` field.
fn descriptor<T: DeserializeOwned>(object: &Map<String, Value>, kind: &str) -> Result<T, String> {
    let mut fields = object.clone();
    fields.remove("type");
    serde_json::from_value(Value::Object(fields)).map_err(|e| format!("invalid {kind} item: {e}"))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{AutogeneratedItemConfig, DocItemConfig, LinkItemConfig};

    fn single(value: Value) -> Result<Vec<SidebarItemConfig>, ValidationError> {
        let config = SidebarsConfig::new().with_sidebar("docs", value);
        validate(&config).map(|sidebars| sidebars.get("docs").unwrap().to_vec())
    }

    fn item_error(value: Value) -> (String, String) {
        match single(value).unwrap_err() {
            ValidationError::InvalidItem {
                location, message, ..
            } => (location, message),
            other => panic!("expected InvalidItem, got {other:?}"),
        }
    }

    #[test]
    fn test_shorthand_list() {
        let items = single(json!(["a", "b"])).unwrap();

        assert_eq!(
            items,
            vec![
                SidebarItemConfig::Shorthand("a".to_owned()),
                SidebarItemConfig::Shorthand("b".to_owned()),
            ]
        );
    }

    #[test]
    fn test_typed_items() {
        let items = single(json!([
            {"type": "doc", "id": "intro", "label": "Start here"},
            {"type": "ref", "id": "api"},
            {"type": "link", "href": "https://example.com", "label": "Site", "className": "ext"},
            {"type": "autogenerated", "dirName": "guides"},
        ]))
        .unwrap();

        assert_eq!(
            items,
            vec![
                SidebarItemConfig::Doc(DocItemConfig {
                    label: Some("Start here".to_owned()),
                    ..DocItemConfig::new("intro")
                }),
                SidebarItemConfig::Ref(DocItemConfig::new("api")),
                SidebarItemConfig::Link(LinkItemConfig {
                    href: "https://example.com".to_owned(),
                    label: "Site".to_owned(),
                    class_name: Some("ext".to_owned()),
                    custom_props: None,
                }),
                SidebarItemConfig::Autogenerated(AutogeneratedItemConfig {
                    dir_name: "guides".to_owned(),
                }),
            ]
        );
    }

    #[test]
    fn test_category_with_nested_items_and_link() {
        let items = single(json!([{
            "type": "category",
            "label": "Guides",
            "collapsed": false,
            "link": {"type": "generated-index", "title": "All guides"},
            "items": ["guides/setup", {"type": "category", "label": "Deep", "items": []}],
        }]))
        .unwrap();

        let SidebarItemConfig::Category(category) = &items[0] else {
            panic!("expected category");
        };
        assert_eq!(category.label, "Guides");
        assert_eq!(category.collapsed, Some(false));
        assert_eq!(category.collapsible, None);
        assert_eq!(
            category.link,
            Some(CategoryLinkConfig::GeneratedIndex {
                slug: None,
                title: Some("All guides".to_owned()),
                description: None,
            })
        );
        assert_eq!(category.items.len(), 2);
    }

    #[test]
    fn test_single_descriptor_is_wrapped() {
        let items = single(json!({"type": "autogenerated", "dirName": "."})).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_category_shorthand_object() {
        let items = single(json!({"Intro": ["a"], "More": ["b", {"Deep": ["c"]}]})).unwrap();

        let SidebarItemConfig::CategoryShorthand(categories) = &items[0] else {
            panic!("expected shorthand");
        };
        let labels: Vec<_> = categories.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Intro", "More"]);
        assert!(matches!(
            categories[1].1[1],
            SidebarItemConfig::CategoryShorthand(_)
        ));
    }

    #[test]
    fn test_duplicate_sidebar_rejected() {
        let config: SidebarsConfig =
            serde_json::from_str(r#"{"docs": ["a"], "api": ["b"], "docs": ["c"]}"#).unwrap();

        assert_eq!(
            validate(&config).unwrap_err(),
            ValidationError::DuplicateSidebar("docs".to_owned())
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let (location, message) = item_error(json!(["a", {"type": "page", "id": "b"}]));

        assert_eq!(location, "[1]");
        assert_eq!(
            message,
            "unknown item type `page` (expected one of: doc, ref, link, category, autogenerated)"
        );
    }

    #[test]
    fn test_category_missing_label_rejected() {
        let (location, message) = item_error(json!([{"type": "category", "items": []}]));

        assert_eq!(location, "[0]");
        assert!(message.contains("missing field `label`"), "{message}");
    }

    #[test]
    fn test_link_missing_href_rejected() {
        let (_, message) = item_error(json!([{"type": "link", "label": "Home"}]));
        assert!(message.contains("invalid link item: missing field `href`"), "{message}");
    }

    #[test]
    fn test_autogenerated_missing_dir_name_rejected() {
        let (_, message) = item_error(json!([{"type": "autogenerated"}]));
        assert!(message.contains("missing field `dirName`"), "{message}");
    }

    #[test]
    fn test_non_string_doc_id_rejected() {
        let (location, message) = item_error(json!([
            {"type": "category", "label": "A", "items": ["x", 42]}
        ]));

        assert_eq!(location, "[0].items[1]");
        assert_eq!(message, "doc ids must be strings, got a number");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (_, message) = item_error(json!([{"type": "doc", "id": "a", "title": "A"}]));
        assert!(message.contains("unknown field `title`"), "{message}");
    }

    #[test]
    fn test_category_items_must_be_list() {
        let (_, message) = item_error(json!([{"type": "category", "label": "A", "items": "a"}]));
        assert_eq!(message, "category `items` must be a list, got a string");
    }

    #[test]
    fn test_shorthand_value_must_be_list() {
        let (location, message) = item_error(json!([{"Guides": "setup"}]));

        assert_eq!(location, "[0]");
        assert_eq!(
            message,
            "category shorthand `Guides` must map to a list of items, got a string"
        );
    }

    #[test]
    fn test_nested_shorthand_location() {
        let (location, _) = item_error(json!([{"Guides": ["a", null]}]));
        assert_eq!(location, "[0][\"Guides\"][1]");
    }

    #[test]
    fn test_invalid_sidebar_value() {
        let err = single(json!(3)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid sidebar `docs`: expected a list of items, an item descriptor or a category shorthand object, got a number"
        );
    }

    #[test]
    fn test_first_error_wins() {
        let config = SidebarsConfig::new()
            .with_sidebar("first", json!([1]))
            .with_sidebar("second", json!(null));

        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidItem { ref sidebar, .. } if sidebar == "first"));
    }
}
