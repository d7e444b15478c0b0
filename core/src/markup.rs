//! Markup scanning helpers.
//!
//! Fetched pages arrive as raw markup strings. Before a transition can be
//! chosen or a container spliced in, a few fragments must be pulled out of
//! that string: the `<title>`, the namespace annotation, and the container
//! element itself. These helpers do that with plain string scanning; the
//! orchestrator never needs a full DOM of the *next* page.

use crate::schema::AttributeSchema;

/// Extract the text of the first `<title>` element.
pub fn title_of(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + html[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;
    Some(html[start..end].trim().to_string())
}

/// Extract the namespace annotation, e.g. `data-glissade-namespace="home"`.
pub fn namespace_of(html: &str, schema: &AttributeSchema) -> Option<String> {
    attr_positions(html, &schema.namespace_attr())
        .next()
        .map(|(value, _)| value.to_string())
}

/// Extract the container element, marked `data-glissade="container"`.
///
/// Returns the full element markup, balancing nested elements of the same
/// tag name.
pub fn container_of(html: &str, schema: &AttributeSchema) -> Option<String> {
    let at = attr_positions(html, schema.marker())
        .find(|(value, _)| *value == schema.container)
        .map(|(_, at)| at)?;
    let start = html[..at].rfind('<')?;
    balanced_element(html, start).map(str::to_string)
}

/// Iterate `attr="value"` occurrences, yielding the value and the byte
/// position of the attribute name.
fn attr_positions<'a>(
    html: &'a str,
    attr: &str,
) -> impl Iterator<Item = (&'a str, usize)> + use<'a> {
    let needle = format!("{attr}=");
    let mut search = 0usize;
    std::iter::from_fn(move || {
        while let Some(found) = html[search..].find(&needle) {
            let at = search + found;
            let val_start = at + needle.len();
            search = val_start;
            let bounded = at == 0
                || html[..at].ends_with(|c: char| c.is_ascii_whitespace());
            if !bounded {
                continue;
            }
            let bytes = html.as_bytes();
            let quote = match bytes.get(val_start) {
                Some(b'"') => '"',
                Some(b'\'') => '\'',
                _ => continue,
            };
            if let Some(len) = html[val_start + 1..].find(quote) {
                return Some((&html[val_start + 1..val_start + 1 + len], at));
            }
        }
        None
    })
}

/// Slice out the element starting at `start` (which must point at `<`),
/// balancing nested same-name tags.
fn balanced_element(html: &str, start: usize) -> Option<&str> {
    let tag: String = html[start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if tag.is_empty() {
        return None;
    }
    let open = format!("<{tag}");
    let close = format!("</{tag}");

    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let open_at = find_tag(html, &open, pos);
        let close_at = find_tag(html, &close, pos);
        match (open_at, close_at) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos = o + open.len();
            }
            (_, Some(c)) => {
                depth = depth.checked_sub(1)?;
                let end = c + html[c..].find('>')?;
                if depth == 0 {
                    return Some(&html[start..=end]);
                }
                pos = c + close.len();
            }
            (Some(o), None) => {
                // Unclosed tag; keep scanning so a malformed page degrades
                // to "no container" instead of looping.
                depth += 1;
                pos = o + open.len();
            }
            (None, None) => return None,
        }
    }
}

/// Find `needle` at a tag boundary (not matching `<div` inside `<divider`).
fn find_tag(html: &str, needle: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(found) = html[search..].find(needle) {
        let at = search + found;
        let after = html[at + needle.len()..].chars().next();
        match after {
            Some(c) if c.is_ascii_alphanumeric() || c == '-' => {
                search = at + needle.len();
            }
            _ => return Some(at),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
  <head><title> About us </title></head>
  <body>
    <main data-glissade="wrapper">
      <div class="page" data-glissade="container" data-glissade-namespace="about">
        <div class="inner"><p>hello</p></div>
      </div>
    </main>
  </body>
</html>"#;

    #[test]
    fn extracts_title() {
        assert_eq!(title_of(PAGE).as_deref(), Some("About us"));
        assert_eq!(title_of("<p>no title</p>"), None);
    }

    #[test]
    fn extracts_namespace() {
        let schema = AttributeSchema::default();
        assert_eq!(namespace_of(PAGE, &schema).as_deref(), Some("about"));
        assert_eq!(namespace_of("<div></div>", &schema), None);
    }

    #[test]
    fn extracts_container_with_nested_same_tag() {
        let schema = AttributeSchema::default();
        let container = container_of(PAGE, &schema).unwrap();
        assert!(container.starts_with("<div class=\"page\""));
        assert!(container.ends_with("</div>"));
        assert!(container.contains("<div class=\"inner\""));
        // Balanced: the trailing </main> stayed outside.
        assert!(!container.contains("</main>"));
    }

    #[test]
    fn container_requires_marker_value() {
        let schema = AttributeSchema::default();
        let html = r#"<div data-glissade="wrapper"><p>empty</p></div>"#;
        assert_eq!(container_of(html, &schema), None);
    }

    #[test]
    fn tag_boundary_is_respected() {
        let schema = AttributeSchema::default();
        let html = r#"<section data-glissade="container"><sectioned-widget>x</sectioned-widget></section>"#;
        let container = container_of(html, &schema).unwrap();
        assert!(container.ends_with("</section>"));
    }
}
