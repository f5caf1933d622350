//! # Attribute reconciliation
//!
//! Translates one declarative attribute into host mutations. Dispatch order:
//!
//! 1. `on` + upper-case letter (`onClick`): event listener for the lower-cased
//!    event name (`click`).
//! 2. `style`: a value or an ordered list of values; each is a
//!    `"key: value; key: value"` string or a key → value map. Later
//!    declarations overwrite earlier ones.
//! 3. `class` / `className` (any case): strings of whitespace-separated
//!    tokens, nested lists, or class → flag maps. Additive only.
//! 4. Anything else: a generic attribute, set verbatim.
//!
//! Nothing is ever removed and no previous value is consulted; the renderer
//! only reconciles onto fresh host nodes or replaces whole subtrees.

use crate::attributes::AttrValue;
use crate::value::Value;
use tracing::{debug, warn};
use twig_host::{HostResult, HostTree, ListenerId};

/// How an attribute name is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// Carries the lower-cased event name.
    Event(String),
    Style,
    Class,
    Generic,
}

pub fn classify(name: &str) -> AttributeKind {
    if let Some(event) = event_name(name) {
        return AttributeKind::Event(event);
    }
    if name == "style" {
        return AttributeKind::Style;
    }
    if name.eq_ignore_ascii_case("class") || name.eq_ignore_ascii_case("classname") {
        return AttributeKind::Class;
    }
    AttributeKind::Generic
}

fn event_name(name: &str) -> Option<String> {
    let rest = name.strip_prefix("on")?;
    let first = rest.chars().next()?;
    first
        .is_ascii_uppercase()
        .then(|| rest.to_ascii_lowercase())
}

/// Apply one attribute to `node`.
///
/// Returns the listener id when the attribute registered an event listener.
pub fn apply_attribute<H: HostTree>(
    host: &H,
    node: &H::Node,
    name: &str,
    value: &AttrValue,
) -> HostResult<Option<ListenerId>> {
    match (classify(name), value) {
        (AttributeKind::Event(event), AttrValue::Handler(handler)) => {
            let id = host.add_event_listener(node, &event, handler.clone())?;
            debug!(attribute = name, event = %event, "Bound event listener");
            return Ok(Some(id));
        }
        (AttributeKind::Event(_), AttrValue::Data(_)) => {
            warn!(attribute = name, "Ignoring non-handler value for event attribute");
        }
        (_, AttrValue::Handler(_)) => {
            warn!(attribute = name, "Ignoring handler for non-event attribute");
        }
        (AttributeKind::Style, AttrValue::Data(value)) => {
            for (key, style_value) in collect_styles(value) {
                host.set_style(node, &key, &style_value)?;
            }
        }
        (AttributeKind::Class, AttrValue::Data(value)) => {
            for class in collect_classes(value) {
                host.add_class(node, &class)?;
            }
        }
        (AttributeKind::Generic, AttrValue::Data(value)) => {
            host.set_attribute(node, name, &value.to_attribute_string())?;
        }
    }
    Ok(None)
}

/// Flatten a style value into `(key, value)` declarations in application order.
///
/// Keys may repeat; applying them in order makes the last one win.
pub fn collect_styles(value: &Value) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    match value {
        Value::List(entries) => {
            for entry in entries {
                push_style_entry(entry, &mut declarations);
            }
        }
        single => push_style_entry(single, &mut declarations),
    }
    declarations
}

fn push_style_entry(entry: &Value, out: &mut Vec<(String, String)>) {
    match entry {
        Value::String(text) => out.extend(parse_declarations(text)),
        Value::Map(map) => {
            for (key, value) in map {
                if value.is_composite() {
                    debug!(key = %key, "Skipping composite style value");
                    continue;
                }
                out.push((key.clone(), value.to_attribute_string()));
            }
        }
        other => debug!(value = ?other, "Skipping unsupported style entry"),
    }
}

/// Parse `"color: red; border: 1px solid #fff"` into declarations.
///
/// Declarations without a `key:` prefix made of word characters or hyphens, or
/// with an empty value, are dropped.
pub fn parse_declarations(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            let key = key.trim();
            let value = value.trim();
            let valid_key = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
            if !valid_key || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Flatten a class value into class tokens in encounter order.
pub fn collect_classes(value: &Value) -> Vec<String> {
    let mut classes = Vec::new();
    push_classes(value, &mut classes);
    classes
}

fn push_classes(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(tokens) => out.extend(tokens.split_whitespace().map(str::to_string)),
        Value::List(items) => {
            for item in items {
                push_classes(item, out);
            }
        }
        Value::Map(flags) => out.extend(
            flags
                .iter()
                .filter(|(_, enabled)| enabled.is_truthy())
                .map(|(class, _)| class.clone()),
        ),
        other => debug!(value = ?other, "Skipping unsupported class entry"),
    }
}
