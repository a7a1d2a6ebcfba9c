//! Conversion of loosely shaped upstream JSON into [`ContentItem`]s.
//!
//! Both entry points are total: any missing or mistyped field falls back to
//! its default instead of producing an error.

use crate::domain::model::{ContentItem, Section};
use serde_json::Value;

const TITLE_PROPERTY: &str = "Name";
const BODY_PROPERTY: &str = "Content";
const LINK_PROPERTY: &str = "Link";
const SECTION_PROPERTY: &str = "Section";
const ORDER_PROPERTY: &str = "Order";
const ICON_PROPERTY: &str = "Icon";

/// Normalizes one raw database record (a Notion page object).
pub fn normalize_record(record: &Value) -> ContentItem {
    let prop = |name| property(record, name);

    ContentItem {
        id: string_field(record.get("id")).unwrap_or_default(),
        title: first_fragment(prop(TITLE_PROPERTY), "title").unwrap_or_default(),
        body: first_fragment(prop(BODY_PROPERTY), "rich_text").unwrap_or_default(),
        link: non_empty(string_field(prop(LINK_PROPERTY).and_then(|p| p.get("url")))),
        section: coerce_section(
            prop(SECTION_PROPERTY)
                .and_then(|p| p.get("select"))
                .and_then(|s| s.get("name")),
        ),
        order: coerce_order(prop(ORDER_PROPERTY).and_then(|p| p.get("number"))),
        icon: non_empty(first_fragment(prop(ICON_PROPERTY), "rich_text")),
    }
}

/// Re-validates an item the backend has already flattened.
///
/// Returns `None` for entries that are not JSON objects.
pub fn normalize_item(item: &Value) -> Option<ContentItem> {
    let obj = item.as_object()?;

    Some(ContentItem {
        id: string_field(obj.get("id")).unwrap_or_default(),
        title: string_field(obj.get("title")).unwrap_or_default(),
        body: string_field(obj.get("content")).unwrap_or_default(),
        link: non_empty(string_field(obj.get("link"))),
        section: coerce_section(obj.get("section")),
        order: coerce_order(obj.get("order")),
        icon: non_empty(string_field(obj.get("icon"))),
    })
}

/// Stable ascending sort by `order`; ties keep their incoming positions.
pub fn sort_items(items: &mut [ContentItem]) {
    items.sort_by_key(|item| item.order);
}

fn property<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get("properties")?.get(name)
}

/// `plain_text` of the first fragment in `property[array_key]`.
fn first_fragment(property: Option<&Value>, array_key: &str) -> Option<String> {
    property?
        .get(array_key)?
        .as_array()?
        .first()?
        .get("plain_text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn coerce_section(value: Option<&Value>) -> Section {
    value
        .and_then(Value::as_str)
        .and_then(Section::from_name)
        .unwrap_or_default()
}

fn coerce_order(value: Option<&Value>) -> i64 {
    let order = match value {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        None => 0,
    };
    order.max(0)
}
