//! Conversion of inline `style` attributes into JSX style objects.
//!
//! Declarations are tokenized with `cssparser`; only the declaration list
//! grammar is accepted, so nested rules and at-rules are skipped.

use cssparser::{
    parse_important, AtRuleParser, CowRcStr, DeclarationParser, Delimiter, ParseError, Parser,
    ParserInput, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::props::json_string;

/// Ordered property → value mapping of a converted style attribute.
pub type StyleObject = IndexMap<String, String>;

struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        input.parse_until_before(Delimiter::Bang, |input| {
            while input.next_including_whitespace_and_comments().is_ok() {}
            Ok::<_, ParseError<'i, ()>>(())
        })?;
        let value = input.slice_from(start).trim().to_string();
        // `!important` has no JSX equivalent.
        let _ = input.try_parse(parse_important);
        Ok((name.to_string(), value))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Splits a CSS declaration list into `(property, raw value)` pairs.
///
/// Pairs come back in document order. Values are the source text with
/// surrounding whitespace and any `!important` removed. Malformed
/// declarations are skipped.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();

    for item in RuleBodyParser::new(&mut parser, &mut DeclarationListParser) {
        match item {
            Ok(declaration) => declarations.push(declaration),
            Err((err, source)) => {
                debug!(declaration = source, error = ?err.kind, "skipping invalid style declaration");
            }
        }
    }

    declarations
}

/// Converts a CSS property name into its JSX style key.
///
/// ```
/// use svgo_jsx::style::convert_style_property;
///
/// assert_eq!(convert_style_property("fill-opacity"), "fillOpacity");
/// assert_eq!(convert_style_property("-webkit-transition"), "WebkitTransition");
/// assert_eq!(convert_style_property("-ms-transition"), "msTransition");
/// assert_eq!(convert_style_property("--main-color"), "--main-color");
/// ```
pub fn convert_style_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let property = if property.starts_with("-ms-") {
        &property[1..]
    } else {
        property
    };

    let lower = property.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '-' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if next.is_ascii_alphanumeric() || next == '_' => {
                out.extend(next.to_uppercase());
                chars.next();
            }
            None => {}
            Some(_) => out.push(c),
        }
    }
    out
}

/// Parses a `style` attribute into a [`StyleObject`].
///
/// A property declared twice keeps its first position and its last value.
pub fn convert_style(css: &str) -> StyleObject {
    let mut object = StyleObject::new();
    for (property, value) in parse_declarations(css) {
        object.insert(convert_style_property(&property), value);
    }
    object
}

/// Renders a `style` attribute as a JSX expression holding an object literal.
pub fn style_expression(css: &str) -> String {
    let object = convert_style(css);
    let fields: Vec<String> = object
        .iter()
        .map(|(key, value)| format!("{}:{}", json_string(key), json_string(value)))
        .collect();
    format!("{{{{{}}}}}", fields.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(css: &str) -> Vec<String> {
        parse_declarations(css)
            .into_iter()
            .map(|(k, v)| format!("{k} => {v}"))
            .collect()
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(
            pairs("fill:#000;fill-opacity:0.5"),
            vec!["fill => #000", "fill-opacity => 0.5"]
        );
    }

    #[test]
    fn test_parse_keeps_raw_value_text() {
        assert_eq!(
            pairs("font-family: 'Open Sans', sans-serif ; transform: translate(1px, 2px)"),
            vec![
                "font-family => 'Open Sans', sans-serif",
                "transform => translate(1px, 2px)",
            ]
        );
    }

    #[test]
    fn test_parse_drops_important() {
        assert_eq!(pairs("fill: red !important"), vec!["fill => red"]);
    }

    #[test]
    fn test_parse_skips_invalid() {
        assert_eq!(
            pairs("fill: red; ; 12px; stroke: blue;"),
            vec!["fill => red", "stroke => blue"]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_declarations("").is_empty());
        assert!(parse_declarations("  ;  ").is_empty());
    }

    #[test]
    fn test_property_names() {
        assert_eq!(convert_style_property("fill"), "fill");
        assert_eq!(convert_style_property("stroke-dasharray"), "strokeDasharray");
        assert_eq!(convert_style_property("Font-Size"), "fontSize");
        assert_eq!(convert_style_property("-moz-user-select"), "MozUserSelect");
        assert_eq!(convert_style_property("--Custom-Prop"), "--Custom-Prop");
        assert_eq!(convert_style_property("margin-"), "margin");
    }

    #[test]
    fn test_repeated_property() {
        let object = convert_style("fill:red;stroke:blue;fill:green");
        assert_eq!(
            object.into_iter().collect::<Vec<_>>(),
            vec![
                ("fill".to_string(), "green".to_string()),
                ("stroke".to_string(), "blue".to_string()),
            ]
        );
    }

    #[test]
    fn test_style_expression() {
        assert_eq!(
            style_expression("fill:#000;fill-opacity:0.5"),
            r##"{{"fill":"#000","fillOpacity":"0.5"}}"##
        );
        assert_eq!(style_expression(""), "{{}}");
        assert_eq!(
            style_expression(r#"font-family:"A""#),
            r#"{{"fontFamily":"\"A\""}}"#
        );
    }
}
