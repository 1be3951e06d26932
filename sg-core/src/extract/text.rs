//! Text helpers over element trees

use scraper::ElementRef;

use crate::model::SideMap;

/// Text nodes of the element, each trimmed, empty ones dropped, joined by `sep`
pub fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Single-line text of an element
pub fn stripped_text(element: ElementRef<'_>) -> String {
    joined_text(element, "")
}

/// Text of an element with one line per text node
pub fn multiline_text(element: ElementRef<'_>) -> String {
    joined_text(element, "\n")
}

/// Class tokens in the order they appear in the attribute
pub fn class_tokens<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
}

/// True when the element has no class tokens at all
pub fn is_unclassed(element: ElementRef<'_>) -> bool {
    class_tokens(element).next().is_none()
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    class_tokens(element).any(|c| c == class)
}

/// Number of ancestors above the element
pub fn depth(element: ElementRef<'_>) -> usize {
    element.ancestors().count()
}

/// Collect side texts from every descendant of `container`.
///
/// A descendant's key is its first class token ending in `suffix`. Later
/// descendants with the same key replace earlier ones.
pub fn extract_sides(container: ElementRef<'_>, suffix: &str) -> SideMap {
    let mut sides = SideMap::new();
    for element in container.descendants().skip(1).filter_map(ElementRef::wrap) {
        if let Some(key) = class_tokens(element).find(|c| c.ends_with(suffix)) {
            sides.insert(key, multiline_text(element));
        }
    }
    sides
}
