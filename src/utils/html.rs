// src/utils/html.rs

//! Text lookups over parsed HTML.
//!
//! "Own text" means the text nodes that are direct children of an element,
//! as opposed to `ElementRef::text`, which walks every descendant.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures to `AppError::Selector`.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Direct child text nodes of an element, in document order.
pub fn own_text<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    el.children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
}

/// First non-blank own text node of any element matched under `scope`.
pub fn first_own_text<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<&'a str> {
    scope
        .select(selector)
        .flat_map(own_text)
        .find(|t| !t.trim().is_empty())
}

/// First non-blank descendant text of any element matched under `scope`.
pub fn first_text<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<&'a str> {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .find(|t| !t.trim().is_empty())
}

/// Every own text node of every matched element, blanks included.
pub fn all_own_text<'a>(scope: ElementRef<'a>, selector: &Selector) -> Vec<&'a str> {
    scope.select(selector).flat_map(own_text).collect()
}

/// Every non-blank descendant text of every matched element, trimmed.
pub fn all_text(scope: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Attribute value of the first matched element.
pub fn first_attr<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    attr: &str,
) -> Option<&'a str> {
    scope
        .select(selector)
        .find_map(|el| el.value().attr(attr))
}
