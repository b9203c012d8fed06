//! Component file templates and file naming.

use camino::Utf8Path;
use svgo_jsx::Target;

const COMMON_TEMPLATE: &str = "// Generated from {sourceFile}

export const {componentName} = (props) => {
  return (
    {jsx}
  );
}
";

const REACT_NATIVE_SVG_TEMPLATE: &str = "// Generated from {sourceFile}

import {{components}} from 'react-native-svg'

export const {componentName} = (props) => {
  return (
    {jsx}
  );
}
";

/// Values available to a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub target: Target,
    pub source_file: &'a str,
    pub target_file: &'a str,
    pub component_name: &'a str,
    pub jsx: &'a str,
    pub components: &'a [String],
}

/// Fills `template` (or the default for the target) with `cx`.
///
/// Placeholders are `{sourceFile}`, `{targetFile}`, `{componentName}`,
/// `{jsx}` and `{components}`. Any other braces are copied as they are.
pub fn render_template(template: Option<&str>, cx: &TemplateContext<'_>) -> String {
    let template = template.unwrap_or(match cx.target {
        Target::ReactNativeSvg => REACT_NATIVE_SVG_TEMPLATE,
        _ => COMMON_TEMPLATE,
    });

    let mut out = String::with_capacity(template.len() + cx.jsx.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| placeholder_value(&after[..close], cx).map(|value| (close, value)));
        match placeholder {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder_value(name: &str, cx: &TemplateContext<'_>) -> Option<String> {
    let value = match name {
        "sourceFile" => cx.source_file.to_string(),
        "targetFile" => cx.target_file.to_string(),
        "componentName" => cx.component_name.to_string(),
        "jsx" => cx.jsx.to_string(),
        "components" => cx.components.join(", "),
        _ => return None,
    };
    Some(value)
}

fn file_stem(file_name: &str) -> &str {
    Utf8Path::new(file_name).file_stem().unwrap_or(file_name)
}

/// Derives a component identifier from a file name.
///
/// Runs of characters other than ASCII letters and digits are removed and
/// the character after them is upper-cased, as is the first character. A
/// leading digit gets an underscore prefix.
pub fn component_name(file_name: &str) -> String {
    let stem = file_stem(file_name);
    let mut name = String::with_capacity(stem.len() + 1);
    let mut upper_next = false;
    for c in stem.chars() {
        if !c.is_ascii_alphanumeric() {
            upper_next = true;
            continue;
        }
        if upper_next || name.is_empty() {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        upper_next = false;
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Name of the generated file for an input file.
pub fn output_file_name(file_name: &str, extension: &str) -> String {
    format!("{}.{}", file_stem(file_name), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context<'a>(target: Target, components: &'a [String]) -> TemplateContext<'a> {
        TemplateContext {
            target,
            source_file: "input/cog.svg",
            target_file: "output/cog.js",
            component_name: "Cog",
            jsx: "<Svg {...props} />",
            components,
        }
    }

    #[test]
    fn test_component_names() {
        assert_eq!(component_name("cog.svg"), "Cog");
        assert_eq!(component_name("arrow-left.svg"), "ArrowLeft");
        assert_eq!(component_name("my_icon 2.svg"), "MyIcon2");
        assert_eq!(component_name("--chevron--down.svg"), "ChevronDown");
        assert_eq!(component_name("24px.svg"), "_24px");
        assert_eq!(component_name("camelCase.svg"), "CamelCase");
        assert_eq!(component_name("a.b.svg"), "AB");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("cog.svg", "js"), "cog.js");
        assert_eq!(output_file_name("arrow-left.svg", "tsx"), "arrow-left.tsx");
    }

    #[test]
    fn test_default_template() {
        let out = render_template(None, &context(Target::ReactDom, &[]));
        insta::assert_snapshot!(out, @r#"
        // Generated from input/cog.svg

        export const Cog = (props) => {
          return (
            <Svg {...props} />
          );
        }
        "#);
    }

    #[test]
    fn test_react_native_svg_template_imports_components() {
        let components = vec!["Svg".to_string(), "Path".to_string()];
        let out = render_template(None, &context(Target::ReactNativeSvg, &components));
        assert!(out.contains("import {Svg, Path} from 'react-native-svg'\n"));
    }

    #[test]
    fn test_custom_template() {
        let out = render_template(
            Some("export default function {componentName}() { return {jsx}; } // {unknown} {targetFile}"),
            &context(Target::Preact, &[]),
        );
        assert_eq!(
            out,
            "export default function Cog() { return <Svg {...props} />; } // {unknown} output/cog.js"
        );
    }

    #[test]
    fn test_placeholders_in_values_are_not_expanded() {
        let mut cx = context(Target::ReactDom, &[]);
        cx.jsx = "<text>{componentName}</text>";
        let out = render_template(Some("{jsx}|{componentName}"), &cx);
        assert_eq!(out, "<text>{componentName}</text>|Cog");
    }
}
