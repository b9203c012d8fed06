//! Built-in stages, resolvable by name from configuration.

use crate::{Plugin, PluginInfo};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use xast::{retain_nodes, visit_elements_mut, Node, Root, VisitAction};

/// Names accepted by [`resolve`].
pub const BUILTIN_NAMES: &[&str] = &[
    "preset-default",
    "removeDoctype",
    "removeXMLProcInst",
    "removeComments",
    "removeMetadata",
    "removeTitle",
    "removeDesc",
    "removeXMLNS",
    "removeUnusedNS",
    "prefixIds",
    "renameElements",
];

/// A stage reference as written in configuration: either a bare name or a
/// name with parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// `"removeXMLNS"`
    Name(String),
    /// `{ "name": "prefixIds", "params": { "prefix": "icon" } }`
    Configured {
        name: String,
        #[serde(default)]
        params: Option<Value>,
    },
}

impl PluginSpec {
    /// The stage name.
    pub fn name(&self) -> &str {
        match self {
            PluginSpec::Name(name) => name,
            PluginSpec::Configured { name, .. } => name,
        }
    }

    fn params(&self) -> Option<&Value> {
        match self {
            PluginSpec::Name(_) => None,
            PluginSpec::Configured { params, .. } => params.as_ref(),
        }
    }
}

impl From<&str> for PluginSpec {
    fn from(name: &str) -> Self {
        PluginSpec::Name(name.to_string())
    }
}

/// Resolves a stage name without parameters.
pub fn resolve_name(name: &str) -> Result<Vec<Box<dyn Plugin>>, String> {
    resolve(&PluginSpec::from(name))
}

/// Resolves a configured stage into one or more plugins.
///
/// `preset-default` expands to several stages; every other name yields one.
pub fn resolve(spec: &PluginSpec) -> Result<Vec<Box<dyn Plugin>>, String> {
    let params = spec.params();
    let plugin: Box<dyn Plugin> = match spec.name() {
        "preset-default" => {
            return Ok(vec![
                Box::new(RemoveDoctype),
                Box::new(RemoveXmlProcInst),
                Box::new(RemoveComments),
                Box::new(RemoveElements::metadata()),
                Box::new(RemoveUnusedNs),
            ])
        }
        "removeDoctype" => Box::new(RemoveDoctype),
        "removeXMLProcInst" => Box::new(RemoveXmlProcInst),
        "removeComments" => Box::new(RemoveComments),
        "removeMetadata" => Box::new(RemoveElements::metadata()),
        "removeTitle" => Box::new(RemoveElements::title()),
        "removeDesc" => Box::new(RemoveElements::desc()),
        "removeXMLNS" => Box::new(RemoveXmlns),
        "removeUnusedNS" => Box::new(RemoveUnusedNs),
        "prefixIds" => Box::new(PrefixIds::from_params(params)?),
        "renameElements" => Box::new(RenameElements::from_params(params)?),
        other => return Err(format!("Unknown builtin plugin \"{}\" specified.", other)),
    };
    Ok(vec![plugin])
}

/// Drops `<!DOCTYPE>` declarations.
pub struct RemoveDoctype;

impl Plugin for RemoveDoctype {
    fn name(&self) -> &str {
        "removeDoctype"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        retain_nodes(root, |node| !matches!(node, Node::Doctype(_)));
        Ok(())
    }
}

/// Drops the `<?xml ...?>` declaration. Other processing instructions stay.
pub struct RemoveXmlProcInst;

impl Plugin for RemoveXmlProcInst {
    fn name(&self) -> &str {
        "removeXMLProcInst"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        retain_nodes(root, |node| !matches!(node, Node::Instruction(pi) if pi.name == "xml"));
        Ok(())
    }
}

/// Drops comments, except legal comments starting with `!`.
pub struct RemoveComments;

impl Plugin for RemoveComments {
    fn name(&self) -> &str {
        "removeComments"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        retain_nodes(
            root,
            |node| !matches!(node, Node::Comment(c) if !c.value.starts_with('!')),
        );
        Ok(())
    }
}

/// Drops every element with a given tag, with its subtree.
pub struct RemoveElements {
    name: &'static str,
    tag: &'static str,
}

impl RemoveElements {
    fn metadata() -> Self {
        Self {
            name: "removeMetadata",
            tag: "metadata",
        }
    }

    fn title() -> Self {
        Self {
            name: "removeTitle",
            tag: "title",
        }
    }

    fn desc() -> Self {
        Self {
            name: "removeDesc",
            tag: "desc",
        }
    }
}

impl Plugin for RemoveElements {
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        visit_elements_mut(root, |el| {
            if el.name == self.tag {
                VisitAction::Remove
            } else {
                VisitAction::Keep
            }
        });
        Ok(())
    }
}

/// Drops the `xmlns` attribute from `<svg>` elements.
pub struct RemoveXmlns;

impl Plugin for RemoveXmlns {
    fn name(&self) -> &str {
        "removeXMLNS"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        visit_elements_mut(root, |el| {
            if el.name == "svg" {
                el.attributes.shift_remove("xmlns");
            }
            VisitAction::Keep
        });
        Ok(())
    }
}

/// Drops `xmlns:<prefix>` declarations from `<svg>` elements when no element
/// or attribute in the document uses that prefix.
pub struct RemoveUnusedNs;

impl Plugin for RemoveUnusedNs {
    fn name(&self) -> &str {
        "removeUnusedNS"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        let mut used = IndexSet::new();
        visit_elements_mut(root, |el| {
            let names = std::iter::once(&el.name).chain(el.attributes.keys());
            for prefix in names.filter_map(|name| name.split_once(':').map(|(p, _)| p)) {
                if prefix != "xmlns" {
                    used.insert(prefix.to_string());
                }
            }
            VisitAction::Keep
        });

        visit_elements_mut(root, |el| {
            if el.name == "svg" {
                el.attributes.retain(|name, _| match name.strip_prefix("xmlns:") {
                    Some(prefix) => used.contains(prefix),
                    None => true,
                });
            }
            VisitAction::Keep
        });
        Ok(())
    }
}

/// Prefixes ids and local references so several icons can share a page.
pub struct PrefixIds {
    prefix: Option<String>,
}

impl PrefixIds {
    fn from_params(params: Option<&Value>) -> Result<Self, String> {
        let prefix = match params.and_then(|p| p.get("prefix")) {
            None => None,
            Some(Value::String(prefix)) => Some(prefix.clone()),
            Some(other) => return Err(format!("\"prefix\" must be a string, got {}", other)),
        };
        Ok(Self { prefix })
    }

    /// `icons/arrow left.svg` → `arrow_left_svg__`; `prefix__` without a path.
    fn prefix_for(&self, path: Option<&str>) -> String {
        let base = match (&self.prefix, path) {
            (Some(prefix), _) => prefix.clone(),
            (None, Some(path)) => Path::new(path)
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.replace(['.', ' '], "_"))
                .unwrap_or_else(|| "prefix".to_string()),
            (None, None) => "prefix".to_string(),
        };
        format!("{}__", base)
    }
}

impl Plugin for PrefixIds {
    fn name(&self) -> &str {
        "prefixIds"
    }

    fn apply(&self, root: &mut Root, info: &PluginInfo<'_>) -> Result<(), String> {
        let prefix = self.prefix_for(info.path);
        visit_elements_mut(root, |el| {
            for (name, value) in el.attributes.iter_mut() {
                match name.as_str() {
                    "id" => *value = format!("{}{}", prefix, value),
                    "href" | "xlink:href" if value.starts_with('#') => {
                        *value = format!("#{}{}", prefix, &value[1..]);
                    }
                    _ if value.contains("url(#") => {
                        *value = value.replace("url(#", &format!("url(#{}", prefix));
                    }
                    _ => {}
                }
            }
            VisitAction::Keep
        });
        Ok(())
    }
}

/// Renames element tags through a fixed table.
pub struct RenameElements {
    mapping: IndexMap<String, String>,
}

impl RenameElements {
    fn from_params(params: Option<&Value>) -> Result<Self, String> {
        let Some(Value::Object(map)) = params else {
            return Err("params must be an object mapping old tag names to new ones".to_string());
        };
        let mut mapping = IndexMap::new();
        for (from, to) in map {
            let Value::String(to) = to else {
                return Err(format!("replacement for \"{}\" must be a string", from));
            };
            mapping.insert(from.clone(), to.clone());
        }
        Ok(Self { mapping })
    }
}

impl Plugin for RenameElements {
    fn name(&self) -> &str {
        "renameElements"
    }

    fn apply(&self, root: &mut Root, _info: &PluginInfo<'_>) -> Result<(), String> {
        visit_elements_mut(root, |el| {
            if let Some(to) = self.mapping.get(el.name.as_str()) {
                el.name = to.as_str().into();
            }
            VisitAction::Keep
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use xast::parse;

    fn run(spec: PluginSpec, source: &str, path: Option<&str>) -> Root {
        let mut root = parse(source).unwrap();
        for plugin in resolve(&spec).unwrap() {
            plugin.apply(&mut root, &PluginInfo { path }).unwrap();
        }
        root
    }

    #[test]
    fn test_preset_default_strips_prolog_and_comments() {
        let root = run(
            "preset-default".into(),
            r#"<?xml version="1.0"?><!DOCTYPE svg><!-- c --><svg><metadata><x/></metadata><!--! legal --><g/></svg>"#,
            None,
        );
        assert_eq!(root.children.len(), 1);
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.children.len(), 2);
        assert!(matches!(&svg.children[0], Node::Comment(c) if c.value == "! legal"));
        assert_eq!(svg.children[1].as_element().unwrap().name, "g");
    }

    #[test]
    fn test_remove_xmlns_only_on_svg() {
        let root = run(
            "removeXMLNS".into(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24"><g xmlns="x"/></svg>"#,
            None,
        );
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.attribute("xmlns"), None);
        assert_eq!(svg.attribute("width"), Some("24"));
        assert_eq!(svg.children[0].as_element().unwrap().attribute("xmlns"), Some("x"));
    }

    #[test]
    fn test_remove_unused_ns_keeps_used_prefixes() {
        let root = run(
            "removeUnusedNS".into(),
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:sodipodi="x" width="24"><sodipodi:namedview/><use xlink:href="#a"/></svg>"##,
            None,
        );
        let svg = root.elements().next().unwrap();
        let names: Vec<&str> = svg.attributes.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["xmlns", "xmlns:xlink", "xmlns:sodipodi", "width"]);
    }

    #[test]
    fn test_preset_default_drops_unused_xlink() {
        let root = run(
            "preset-default".into(),
            r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink" width="24"><rect/></svg>"#,
            None,
        );
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.attribute("xmlns:xlink"), None);
        assert_eq!(svg.attribute("width"), Some("24"));
    }

    #[test]
    fn test_prefix_ids_from_path() {
        let root = run(
            "prefixIds".into(),
            r##"<svg><linearGradient id="a"/><rect fill="url(#a)"/><use xlink:href="#a" href="#a"/></svg>"##,
            Some("icons/cog.svg"),
        );
        let svg = root.elements().next().unwrap();
        let ids: Vec<Vec<(&str, &str)>> = svg
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|el| {
                el.attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                vec![("id", "cog_svg__a")],
                vec![("fill", "url(#cog_svg__a)")],
                vec![("xlink:href", "#cog_svg__a"), ("href", "#cog_svg__a")],
            ]
        );
    }

    #[test]
    fn test_prefix_ids_with_explicit_prefix() {
        let spec = PluginSpec::Configured {
            name: "prefixIds".to_string(),
            params: Some(json!({ "prefix": "icon" })),
        };
        let root = run(spec, r#"<svg id="root"/>"#, Some("cog.svg"));
        assert_eq!(root.elements().next().unwrap().attribute("id"), Some("icon__root"));
    }

    #[test]
    fn test_rename_elements() {
        let spec = PluginSpec::Configured {
            name: "renameElements".to_string(),
            params: Some(json!({ "svg": "Svg", "circle": "Circle" })),
        };
        let root = run(spec, r#"<svg><circle r="1"/><rect/></svg>"#, None);
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.name, "Svg");
        assert_eq!(svg.children[0].as_element().unwrap().name, "Circle");
        assert_eq!(svg.children[1].as_element().unwrap().name, "rect");
    }

    #[test]
    fn test_unknown_plugin() {
        let err = resolve_name("removeEverything").unwrap_err();
        assert_eq!(err, "Unknown builtin plugin \"removeEverything\" specified.");
    }

    #[test]
    fn test_spec_deserializes_both_shapes() {
        let specs: Vec<PluginSpec> =
            serde_json::from_value(json!(["removeXMLNS", { "name": "prefixIds" }])).unwrap();
        assert_eq!(specs[0], PluginSpec::Name("removeXMLNS".to_string()));
        assert_eq!(specs[1].name(), "prefixIds");
    }
}
