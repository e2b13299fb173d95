//! Coded-component extraction from EMIS template XML.
//!
//! EMIS template exports are frequently malformed: one file can hold several
//! concatenated XML documents, each with its own declaration. Such files are
//! repaired by wrapping all fragments in a single synthetic root before
//! parsing. Tag lookups use local names only, so namespace-qualified exports
//! behave the same as plain ones.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};
use tracing::debug;

use emis_model::ComponentRecord;

use crate::error::{IngestError, Result};

/// Tag of a coded data-entry field definition.
const COMPONENT_TAG: &str = "component";
/// Tag of coded concepts below a component.
const CODE_TAG: &str = "code";
/// Attribute on a `code` element carrying the internal EMIS identifier.
const CODE_ID_ATTRIBUTE: &str = "code";
/// Library item name element. The misspelling is the vendor's own.
const LIBRARY_NAME_TAG: &str = "libraryItemDefintionName";
const TITLE_TAG: &str = "title";
const SYNTHETIC_ROOT: &str = "templates";

static XML_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?xml[^>]*\?>").expect("declaration pattern"));

/// Trailing version-and-extension suffix of a template file name: optional
/// whitespace, then either a bare `.xml` or `v`/`V` followed by one or two
/// dot-separated numeric components and `.xml`.
static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(\.xml|[vV][0-9]+(\.[0-9]+)?\.xml)$").expect("version suffix pattern")
});

/// Extracts all coded component records from one template file.
///
/// Documents with no coded components yield an empty vec. Trees shallower
/// than the expected nesting simply produce no matches; neither case is an
/// error.
pub fn extract(path: &Path) -> Result<Vec<ComponentRecord>> {
    let raw = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let repaired = repair_document(&raw);
    let was_repaired = matches!(repaired, Cow::Owned(_));
    let document = Document::parse(&repaired).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let records = extract_records(&document, path, was_repaired)?;
    debug!(
        path = %path.display(),
        records = records.len(),
        "template extracted"
    );
    Ok(records)
}

/// Repairs a multi-declaration export.
///
/// A document with at most one `<?xml ?>` header is returned untouched.
/// Anything more holds concatenated documents: the declarations are stripped
/// and the sibling fragments wrapped in one synthetic root so the parser
/// accepts them as a single tree. Each fragment's internal structure is left
/// as-is, so ancestor relationships within a fragment are unchanged.
fn repair_document(raw: &str) -> Cow<'_, str> {
    if XML_DECLARATION.find_iter(raw).take(2).count() < 2 {
        return Cow::Borrowed(raw);
    }
    let stripped = XML_DECLARATION.replace_all(raw, "");
    Cow::Owned(format!("<{SYNTHETIC_ROOT}>{stripped}</{SYNTHETIC_ROOT}>"))
}

/// Walks the tree by fixed relative depth and emits one record per coded
/// entry.
///
/// Starting from every element, the walk descends exactly five levels:
/// library item, intermediate, page, section, field group, then the
/// candidate children at the component level. Depth is what qualifies a
/// node; only the final level is matched by tag. A component is therefore
/// paired with the one ancestor five levels above it, which is where the
/// library name lives, with the page title two levels down from there and
/// the location title on the direct parent.
///
/// A synthetic root introduced by repair is not a start candidate: each
/// wrapped fragment must yield exactly the records it would yield parsed on
/// its own.
fn extract_records(
    document: &Document<'_>,
    path: &Path,
    skip_root: bool,
) -> Result<Vec<ComponentRecord>> {
    let template_name = derive_template_name(path);
    let mut records = Vec::new();
    for library_item in document.descendants().filter(Node::is_element) {
        if skip_root && library_item == document.root_element() {
            continue;
        }
        for intermediate in elements(library_item) {
            for page in elements(intermediate) {
                for section in elements(page) {
                    for field_group in elements(section) {
                        for component in elements(field_group) {
                            if component.tag_name().name() != COMPONENT_TAG {
                                continue;
                            }
                            extract_component(
                                path,
                                &template_name,
                                library_item,
                                page,
                                field_group,
                                component,
                                &mut records,
                            )?;
                        }
                    }
                }
            }
        }
    }
    Ok(records)
}

fn extract_component(
    path: &Path,
    template_name: &str,
    library_item: Node<'_, '_>,
    page: Node<'_, '_>,
    field_group: Node<'_, '_>,
    component: Node<'_, '_>,
    records: &mut Vec<ComponentRecord>,
) -> Result<()> {
    let prompt_label = required_text(component, "label", path)?;
    let prompt_for_date_flag = required_text(component, "promptForDate", path)?;
    let mandatory_flag = required_text(component, "mandatory", path)?;
    let diary_flag = if find_child(component, "diary").is_some() {
        "diary".to_string()
    } else {
        String::new()
    };

    // The direct parent's title is required context; the library name and
    // page title are best-effort and fall back to empty.
    let location_title = required_text(field_group, TITLE_TAG, path)?;
    let library_name = optional_text(library_item, LIBRARY_NAME_TAG);
    let page_name = optional_text(page, TITLE_TAG);

    for code in component
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == CODE_TAG)
    {
        // Attribute-less placeholders and codes without an internal
        // identifier are not real coded entries.
        let Some(code_system_id) = code
            .attribute(CODE_ID_ATTRIBUTE)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            continue;
        };

        let code_attributes: BTreeMap<String, String> = code
            .attributes()
            .filter(|attribute| attribute.name() != CODE_ID_ATTRIBUTE)
            .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
            .collect();

        records.push(ComponentRecord {
            code_system_id: code_system_id.to_string(),
            code_attributes,
            template_name: template_name.to_string(),
            library_name: library_name.clone(),
            page_name: page_name.clone(),
            location_title: location_title.clone(),
            prompt_label: prompt_label.clone(),
            mandatory_flag: mandatory_flag.clone(),
            prompt_for_date_flag: prompt_for_date_flag.clone(),
            diary_flag: diary_flag.clone(),
            source_path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Derives the template name from the file name.
///
/// A trailing version-and-extension suffix is removed when present
/// (`Assessment v2.1.xml` -> `Assessment`); otherwise a plain trailing
/// `.xml` is stripped.
pub fn derive_template_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    match VERSION_SUFFIX.find(file_name) {
        Some(suffix) => file_name[..suffix.start()].to_string(),
        None => file_name
            .strip_suffix(".xml")
            .unwrap_or(file_name)
            .to_string(),
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// First child element with the given local tag name.
fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

/// Text of a required child element; absence indicates a structurally
/// unexpected template and propagates as an error.
fn required_text(node: Node<'_, '_>, tag: &'static str, path: &Path) -> Result<String> {
    let child = find_child(node, tag).ok_or_else(|| IngestError::MissingRequiredField {
        path: path.to_path_buf(),
        field: tag,
    })?;
    Ok(text_of(child))
}

/// Text of an optional child element, empty when the element is absent.
fn optional_text(node: Node<'_, '_>, tag: &str) -> String {
    find_child(node, tag).map(text_of).unwrap_or_default()
}

fn text_of(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn single_declaration_document_is_untouched() {
        let raw = "<?xml version=\"1.0\"?><template/>";
        assert!(matches!(repair_document(raw), Cow::Borrowed(_)));
    }

    #[test]
    fn multi_declaration_document_is_wrapped() {
        let raw = "<?xml version=\"1.0\"?><template/>\n<?xml version=\"1.0\"?><template/>";
        let repaired = repair_document(raw);
        assert_eq!(
            repaired.as_ref(),
            "<templates><template/>\n<template/></templates>"
        );
        assert!(Document::parse(&repaired).is_ok());
    }

    #[test]
    fn template_name_strips_versioned_suffix() {
        assert_eq!(
            derive_template_name(&PathBuf::from("Assessment v2.1.xml")),
            "Assessment"
        );
        assert_eq!(
            derive_template_name(&PathBuf::from("Diabetes Review V3.xml")),
            "Diabetes Review"
        );
    }

    #[test]
    fn template_name_strips_bare_extension() {
        assert_eq!(derive_template_name(&PathBuf::from("Basic.xml")), "Basic");
        assert_eq!(
            derive_template_name(&PathBuf::from("dir/Nested Form.xml")),
            "Nested Form"
        );
    }

    #[test]
    fn template_name_without_extension_is_unchanged() {
        assert_eq!(derive_template_name(&PathBuf::from("Notes")), "Notes");
    }
}
