//! Per-element JSX attribute lists.

use indexmap::IndexMap;
use xast::Element;

use crate::style::style_expression;

/// Caller overrides for root elements: name → value.
///
/// `None` emits the name alone (`{...props}`, `disabled`). A value starting
/// with `{` is emitted verbatim as an expression. Anything else is emitted as
/// a string literal.
pub type SvgProps = IndexMap<String, Option<String>>;

/// How an attribute's value is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Name only.
    Bare,
    /// An already-quoted string literal.
    Quoted(String),
    /// A raw `{...}` expression.
    Expression(String),
}

impl Emission {
    /// Quotes `value` as a string literal.
    ///
    /// JSX attribute strings have no escape sequences, so a value that needs
    /// escaping is written as a `{"..."}` expression instead.
    pub fn literal(value: &str) -> Self {
        let quoted = json_string(value);
        if quoted[1..quoted.len() - 1] == *value {
            Emission::Quoted(quoted)
        } else {
            Emission::Expression(format!("{{{}}}", quoted))
        }
    }

    /// Classifies an override value.
    pub fn from_override(value: Option<&str>) -> Self {
        match value {
            None => Emission::Bare,
            Some(raw) if raw.starts_with('{') => Emission::Expression(raw.to_string()),
            Some(text) => Emission::literal(text),
        }
    }
}

/// Ordered attribute list of one element.
///
/// Unlike the tree's attribute map, the list may hold names that are not
/// attributes at all, such as a `{...props}` spread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    entries: Vec<(String, Emission)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list for `element`, applying `overrides` after its own
    /// attributes.
    pub fn compose(element: &Element, overrides: Option<&SvgProps>) -> Self {
        let mut props = Props {
            entries: Vec::with_capacity(element.attributes.len()),
        };
        for (name, value) in &element.attributes {
            let emission = if name == "style" {
                Emission::Expression(style_expression(value))
            } else {
                Emission::literal(value)
            };
            props.push(name.to_string(), emission);
        }
        if let Some(overrides) = overrides {
            for (name, value) in overrides {
                props.move_to_end(name, Emission::from_override(value.as_deref()));
            }
        }
        props
    }

    /// Appends an entry without checking for an existing one.
    pub fn push(&mut self, name: impl Into<String>, emission: Emission) {
        self.entries.push((name.into(), emission));
    }

    /// Removes any entry called `name` and appends the new one.
    pub fn move_to_end(&mut self, name: &str, emission: Emission) {
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.push((name.to_string(), emission));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Emission)> {
        self.entries.iter().map(|(name, emission)| (name.as_str(), emission))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes ` name` or ` name=value` for every entry.
    pub fn write_to(&self, out: &mut String) {
        for (name, emission) in &self.entries {
            out.push(' ');
            out.push_str(name);
            match emission {
                Emission::Bare => {}
                Emission::Quoted(value) | Emission::Expression(value) => {
                    out.push('=');
                    out.push_str(value);
                }
            }
        }
    }
}

/// Quotes a string as a JSON (and therefore JavaScript) string literal.
pub(crate) fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(props: &Props) -> String {
        let mut out = String::new();
        props.write_to(&mut out);
        out
    }

    fn overrides(entries: &[(&str, Option<&str>)]) -> SvgProps {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_emission_kinds() {
        assert_eq!(Emission::from_override(None), Emission::Bare);
        assert_eq!(
            Emission::from_override(Some("{size}")),
            Emission::Expression("{size}".to_string())
        );
        assert_eq!(
            Emission::from_override(Some("icon")),
            Emission::Quoted("\"icon\"".to_string())
        );
    }

    #[test]
    fn test_intrinsic_only() {
        let element = Element::new("svg")
            .with_attribute("width", "24")
            .with_attribute("style", "fill:red");
        assert_eq!(
            rendered(&Props::compose(&element, None)),
            r#" width="24" style={{"fill":"red"}}"#
        );
    }

    #[test]
    fn test_override_moves_to_end() {
        let element = Element::new("svg")
            .with_attribute("width", "24")
            .with_attribute("height", "24")
            .with_attribute("viewBox", "0 0 24 24");
        let props = Props::compose(&element, Some(&overrides(&[("width", Some("{size}"))])));
        assert_eq!(
            rendered(&props),
            r#" height="24" viewBox="0 0 24 24" width={size}"#
        );
    }

    #[test]
    fn test_spread_and_literal() {
        let element = Element::new("svg").with_attribute("class", "a");
        let props = Props::compose(
            &element,
            Some(&overrides(&[("{...props}", None), ("class", Some("b\"c"))])),
        );
        assert_eq!(rendered(&props), r#" {...props} class={"b\"c"}"#);
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_unescaped_values_stay_quoted() {
        assert_eq!(
            Emission::literal("Open Sans, ü"),
            Emission::Quoted("\"Open Sans, ü\"".to_string())
        );
        assert_eq!(
            Emission::literal("\"Open Sans\""),
            Emission::Expression(r#"{"\"Open Sans\""}"#.to_string())
        );
    }

    #[test]
    fn test_escaping() {
        let element = Element::new("text").with_attribute("font-family", "a\nb\\c");
        assert_eq!(
            rendered(&Props::compose(&element, None)),
            r#" font-family={"a\nb\\c"}"#
        );
    }
}
