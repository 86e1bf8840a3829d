//! Syntax-aware segmentation.

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser};

use crate::domain::Segment;

/// Node kinds for one grammar.
struct DefinitionKinds {
    /// Nodes that are a callable definition on their own
    callables: &'static [&'static str],
    /// Wrappers whose `definition` field holds the real node (decorators)
    wrappers: &'static [&'static str],
    /// Nodes whose `body` may hold further callables (classes, impls)
    containers: &'static [&'static str],
}

pub fn supported_tree_sitter_languages() -> &'static [&'static str] {
    &["python", "rust"]
}

/// Segment `content` into callable definitions found by tree-sitter.
///
/// Each segment spans a whole definition, keyword and decorators included.
/// Methods inside classes and impl/trait blocks are segments of their own;
/// functions nested inside another function stay in the enclosing segment.
pub fn segment_with_tree_sitter(content: &str, language_name: &str) -> Result<Vec<Segment>> {
    let (language, kinds): (Language, DefinitionKinds) = match language_name {
        "python" => (
            tree_sitter_python::LANGUAGE.into(),
            DefinitionKinds {
                callables: &["function_definition"],
                wrappers: &["decorated_definition"],
                containers: &["class_definition"],
            },
        ),
        "rust" => (
            tree_sitter_rust::LANGUAGE.into(),
            DefinitionKinds {
                callables: &["function_item"],
                wrappers: &[],
                containers: &["impl_item", "trait_item", "mod_item"],
            },
        ),
        other => anyhow::bail!(
            "Syntax segmenter does not support '{other}'. Supported: {}",
            supported_tree_sitter_languages().join(", ")
        ),
    };

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .with_context(|| format!("failed to load the {language_name} grammar"))?;
    let tree = parser
        .parse(content, None)
        .with_context(|| format!("tree-sitter could not parse {language_name} source"))?;

    let mut spans = Vec::new();
    collect_definitions(tree.root_node(), &kinds, &mut spans);
    spans.sort_unstable();

    Ok(spans
        .into_iter()
        .filter_map(|(start, end)| content.get(start..end))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(ordinal, text)| Segment { ordinal, text: text.to_string() })
        .collect())
}

fn collect_definitions(node: Node<'_>, kinds: &DefinitionKinds, spans: &mut Vec<(usize, usize)>) {
    for i in 0..node.named_child_count() {
        let Some(child) = node.named_child(i) else {
            continue;
        };
        let kind = child.kind();

        if kinds.callables.contains(&kind) {
            spans.push((child.start_byte(), child.end_byte()));
        } else if kinds.wrappers.contains(&kind) {
            let Some(inner) = child.child_by_field_name("definition") else {
                continue;
            };
            if kinds.callables.contains(&inner.kind()) {
                spans.push((child.start_byte(), child.end_byte()));
            } else if kinds.containers.contains(&inner.kind()) {
                collect_container(inner, kinds, spans);
            }
        } else if kinds.containers.contains(&kind) {
            collect_container(child, kinds, spans);
        }
    }
}

fn collect_container(node: Node<'_>, kinds: &DefinitionKinds, spans: &mut Vec<(usize, usize)>) {
    if let Some(body) = node.child_by_field_name("body") {
        collect_definitions(body, kinds, spans);
    }
}
