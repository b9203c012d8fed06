//! Configuration loading.
//!
//! Two formats are accepted: JSON (comments allowed) and a JavaScript module
//! that exports the config object as `export const config = {...}` or
//! `export default {...}`. JavaScript configs are read statically, so every
//! value has to be a literal.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use svgo_jsx::{ConvertError, SvgProps, Target};
use swc_common::SourceMap;
use swc_ecma_ast::{
    Decl, ExportDecl, ExportDefaultExpr, Expr, ExprOrSpread, KeyValueProp, Lit, ModuleDecl,
    ModuleItem, Pat, Prop, PropName, PropOrSpread,
};
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax};
use thiserror::Error;
use xast_optimizer::{builtin, PluginSpec};

/// File names tried, in order, when no config path is given.
pub const CONFIG_FILES: &[&str] = &[
    "svgo-jsx.config.json",
    "svgo-jsx.config.js",
    "svgo-jsx.config.mjs",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid config.
    #[error("invalid config {path}: {message}")]
    Invalid { path: Utf8PathBuf, message: String },

    #[error("inputDir string should be specified")]
    MissingInputDir,

    #[error("outputDir string should be specified")]
    MissingOutputDir,

    /// The target is unknown.
    #[error(transparent)]
    Target(#[from] ConvertError),

    /// A plugin name or its params are invalid.
    #[error("{0}")]
    Plugin(String),
}

/// Config as written by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    input_dir: Option<String>,
    output_dir: Option<String>,
    target: Option<String>,
    svg_props: Option<SvgProps>,
    plugins: Option<Vec<PluginSpec>>,
    template: Option<String>,
    extension: Option<String>,
}

/// Validated configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the config file. Other paths are relative to it.
    pub base_dir: Utf8PathBuf,
    /// Input directory, relative to `base_dir`.
    pub input_dir: Utf8PathBuf,
    /// Output directory, relative to `base_dir`.
    pub output_dir: Utf8PathBuf,
    pub target: Target,
    pub svg_props: SvgProps,
    pub plugins: Vec<PluginSpec>,
    /// Custom component template; `None` selects the default for `target`.
    pub template: Option<String>,
    /// Extension of generated files, without the dot.
    pub extension: String,
}

impl Config {
    /// Finds a config file in `dir`.
    pub fn find(dir: &Utf8Path) -> Option<Utf8PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads and validates a config file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let raw = if matches!(path.extension(), Some("js" | "mjs")) {
            parse_js_config(path, content)
        } else {
            parse_json_config(&content)
        }
        .map_err(|message| ConfigError::Invalid {
            path: path.to_owned(),
            message,
        })?;

        let base_dir = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .map(Utf8Path::to_owned)
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        Self::from_raw(raw, base_dir)
    }

    fn from_raw(raw: RawConfig, base_dir: Utf8PathBuf) -> Result<Self, ConfigError> {
        let input_dir = raw.input_dir.ok_or(ConfigError::MissingInputDir)?;
        let output_dir = raw.output_dir.ok_or(ConfigError::MissingOutputDir)?;

        let target = match raw.target {
            Some(target) => target.parse()?,
            None => Target::default(),
        };

        let plugins = raw.plugins.unwrap_or_else(default_plugins);
        // Resolve once so that a bad name fails before any file is touched.
        for spec in &plugins {
            builtin::resolve(spec).map_err(ConfigError::Plugin)?;
        }

        Ok(Self {
            base_dir,
            input_dir: normalize(Utf8Path::new(&input_dir)),
            output_dir: normalize(Utf8Path::new(&output_dir)),
            target,
            svg_props: raw.svg_props.unwrap_or_else(default_svg_props),
            plugins,
            template: raw.template,
            extension: raw
                .extension
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or_else(|| "js".to_string()),
        })
    }

    /// Replaces the target, e.g. from the command line.
    pub fn with_target(mut self, target: &str) -> Result<Self, ConfigError> {
        self.target = target.parse()?;
        Ok(self)
    }

    /// Absolute (or cwd-relative) input directory.
    pub fn input_path(&self) -> Utf8PathBuf {
        self.base_dir.join(&self.input_dir)
    }

    /// Absolute (or cwd-relative) output directory.
    pub fn output_path(&self) -> Utf8PathBuf {
        self.base_dir.join(&self.output_dir)
    }
}

/// `{...props}` spread onto the root element.
fn default_svg_props() -> SvgProps {
    let mut props = SvgProps::new();
    props.insert("{...props}".to_string(), None);
    props
}

fn default_plugins() -> Vec<PluginSpec> {
    ["preset-default", "removeXMLNS", "prefixIds"]
        .into_iter()
        .map(PluginSpec::from)
        .collect()
}

/// Drops `.` components and folds `..` where possible.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Utf8Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}

fn parse_json_config(content: &str) -> Result<RawConfig, String> {
    let content = strip_json_comments(content);
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

/// Removes `//` and `/* */` comments outside of string literals.
fn strip_json_comments(json: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        String,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(json.len());
    let mut state = State::Code;
    let mut chars = json.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match (c, chars.peek().copied()) {
                ('/', Some('/')) => {
                    chars.next();
                    state = State::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    state = State::BlockComment;
                }
                _ => {
                    if c == '"' {
                        state = State::String;
                    }
                    out.push(c);
                }
            },
            State::String => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    out
}

/// Reads the exported config object of a JavaScript module using SWC.
fn parse_js_config(path: &Utf8Path, content: String) -> Result<RawConfig, String> {
    let cm: Arc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        swc_common::FileName::Custom(path.to_string()).into(),
        content,
    );

    let module = parse_file_as_module(
        &fm,
        Syntax::Es(EsSyntax::default()),
        swc_ecma_ast::EsVersion::Es2022,
        None,
        &mut Vec::new(),
    )
    .map_err(|e| format!("parse error: {:?}", e))?;

    let exported = module
        .body
        .iter()
        .find_map(exported_config)
        .ok_or_else(|| "expected `export const config = {...}` or `export default {...}`".to_string())?;

    let value = expr_to_json(exported)?;
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn exported_config(item: &ModuleItem) -> Option<&Expr> {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(ExportDefaultExpr { expr, .. })) => {
            Some(expr.as_ref())
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => var.decls.iter().find_map(|declarator| match &declarator.name {
            Pat::Ident(binding) if binding.id.sym.as_str() == "config" => {
                declarator.init.as_deref()
            }
            _ => None,
        }),
        _ => None,
    }
}

fn prop_name_str(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

/// Converts a literal expression into JSON.
fn expr_to_json(expr: &Expr) -> Result<Value, String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| "strings must be valid unicode".to_string()),
        Expr::Lit(Lit::Bool(b)) => Ok(Value::Bool(b.value)),
        Expr::Lit(Lit::Null(_)) => Ok(Value::Null),
        Expr::Lit(Lit::Num(n)) => serde_json::Number::from_f64(n.value)
            .map(Value::Number)
            .ok_or_else(|| format!("unsupported number {}", n.value)),
        Expr::Paren(paren) => expr_to_json(&paren.expr),
        Expr::Array(array) => array
            .elems
            .iter()
            .map(|elem| match elem {
                Some(ExprOrSpread { spread: None, expr }) => expr_to_json(expr),
                _ => Err("array holes and spreads are not supported".to_string()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expr::Object(object) => {
            let mut map = serde_json::Map::new();
            for prop in &object.props {
                let PropOrSpread::Prop(prop) = prop else {
                    return Err("object spreads are not supported".to_string());
                };
                let Prop::KeyValue(KeyValueProp { key, value }) = prop.as_ref() else {
                    return Err("only `key: value` properties are supported".to_string());
                };
                let key = prop_name_str(key)
                    .ok_or_else(|| "computed keys are not supported".to_string())?;
                map.insert(key.to_string(), expr_to_json(value)?);
            }
            Ok(Value::Object(map))
        }
        _ => Err("only literal values are supported".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(json: &str) -> RawConfig {
        parse_json_config(json).unwrap()
    }

    #[test]
    fn test_strip_comments() {
        let json = r#"{
            // line comment
            "inputDir": "./in", /* block */
            "outputDir": "http://not-a-comment"
        }"#;
        let cleaned = strip_json_comments(json);
        assert!(!cleaned.contains("line comment"));
        assert!(!cleaned.contains("block"));
        assert!(cleaned.contains("http://not-a-comment"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_raw(
            raw(r#"{ "inputDir": "./input", "outputDir": "./output" }"#),
            Utf8PathBuf::from("icons"),
        )
        .unwrap();

        assert_eq!(config.input_dir, "input");
        assert_eq!(config.input_path(), "icons/input");
        assert_eq!(config.output_path(), "icons/output");
        assert_eq!(config.target, Target::ReactDom);
        assert_eq!(config.extension, "js");
        assert!(config.template.is_none());
        assert_eq!(
            config.svg_props.into_iter().collect::<Vec<_>>(),
            vec![("{...props}".to_string(), None)]
        );
        let names: Vec<&str> = config.plugins.iter().map(PluginSpec::name).collect();
        assert_eq!(names, vec!["preset-default", "removeXMLNS", "prefixIds"]);
    }

    #[test]
    fn test_svg_props_keep_order() {
        let config = Config::from_raw(
            raw(r#"{
                "inputDir": "in",
                "outputDir": "out",
                "svgProps": { "width": "{size}", "{...props}": null, "class": "icon" }
            }"#),
            Utf8PathBuf::from("."),
        )
        .unwrap();
        let names: Vec<&str> = config.svg_props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["width", "{...props}", "class"]);
    }

    #[test]
    fn test_required_dirs() {
        let err = Config::from_raw(raw(r#"{ "outputDir": "out" }"#), ".".into()).unwrap_err();
        assert_eq!(err.to_string(), "inputDir string should be specified");

        let err = Config::from_raw(raw(r#"{ "inputDir": "in" }"#), ".".into()).unwrap_err();
        assert_eq!(err.to_string(), "outputDir string should be specified");
    }

    #[test]
    fn test_invalid_target_and_plugin() {
        let err = Config::from_raw(
            raw(r#"{ "inputDir": "in", "outputDir": "out", "target": "vue" }"#),
            ".".into(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Target(_)));

        let err = Config::from_raw(
            raw(r#"{ "inputDir": "in", "outputDir": "out", "plugins": ["inlineStyles"] }"#),
            ".".into(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown builtin plugin \"inlineStyles\" specified.");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Utf8Path::new("./a/./b")), "a/b");
        assert_eq!(normalize(Utf8Path::new("a/../b")), "b");
        assert_eq!(normalize(Utf8Path::new("../out")), "../out");
    }

    #[test]
    fn test_parse_js_config() {
        let source = r#"
            export const config = {
                inputDir: "./input",
                outputDir: './output',
                target: "react-native-svg",
                svgProps: { "{...props}": null, fill: "currentColor" },
                plugins: ["preset-default", { name: "prefixIds", params: { prefix: "icon" } }],
                extension: "tsx",
            };
        "#;
        let raw = parse_js_config(Utf8Path::new("svgo-jsx.config.js"), source.to_string()).unwrap();
        let config = Config::from_raw(raw, ".".into()).unwrap();

        assert_eq!(config.target, Target::ReactNativeSvg);
        assert_eq!(config.extension, "tsx");
        assert_eq!(
            config.svg_props.get("fill"),
            Some(&Some("currentColor".to_string()))
        );
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[1].name(), "prefixIds");
    }

    #[test]
    fn test_parse_js_default_export() {
        let source = r#"export default { inputDir: "a", outputDir: "b" };"#;
        let raw = parse_js_config(Utf8Path::new("svgo-jsx.config.mjs"), source.to_string()).unwrap();
        assert_eq!(raw.input_dir.as_deref(), Some("a"));
    }

    #[test]
    fn test_js_config_rejects_functions() {
        let source = r#"
            export const config = {
                inputDir: "a",
                outputDir: "b",
                template: ({ jsx }) => jsx,
            };
        "#;
        let err = parse_js_config(Utf8Path::new("svgo-jsx.config.js"), source.to_string()).unwrap_err();
        assert_eq!(err, "only literal values are supported");
    }
}
