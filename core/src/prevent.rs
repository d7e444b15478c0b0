use crate::dom::{Document, ElementRef};
use crate::error::SetupError;
use crate::schema::AttributeSchema;
use crate::url::PageUrl;

/// Everything a prevent rule may inspect.
pub struct PreventCheck<'a> {
    /// The candidate element, absent for URL-only checks (programmatic
    /// prefetch).
    pub el: Option<ElementRef>,
    pub href: &'a str,
    /// Parsed form of `href`.
    pub url: PageUrl,
    /// URL of the presently-active page.
    pub current: &'a PageUrl,
    pub doc: &'a dyn Document,
    pub schema: &'a AttributeSchema,
}

impl PreventCheck<'_> {
    fn attr(&self, name: &str) -> Option<String> {
        self.el.and_then(|el| self.doc.attribute(el, name))
    }
}

/// A named exclusion predicate. Returning `true` means "leave this
/// navigation to the browser".
pub type PreventRule = Box<dyn Fn(&PreventCheck<'_>) -> bool + Send + Sync>;

/// Predicate engine deciding which links escape interception and prefetch.
///
/// Ships the built-in exclusions (cross-origin targets, `_blank` links,
/// downloads, non-page protocols, explicit opt-out markers); embedding
/// code appends its own rules with [`PreventGuard::add`].
pub struct PreventGuard {
    rules: Vec<(String, PreventRule)>,
}

impl PreventGuard {
    pub fn new() -> Self {
        let mut guard = Self { rules: Vec::new() };
        guard.builtin("no_href", |check| check.href.is_empty());
        guard.builtin("protocol", |check| {
            ["mailto:", "tel:", "javascript:", "ftp:"]
                .iter()
                .any(|p| check.href.starts_with(p))
        });
        guard.builtin("external", |check| !check.url.same_origin(check.current));
        guard.builtin("blank", |check| {
            check.attr("target").as_deref() == Some("_blank")
        });
        guard.builtin("download", |check| check.attr("download").is_some());
        guard.builtin("marked", |check| {
            check.attr(&check.schema.prevent_attr()).is_some()
        });
        guard
    }

    fn builtin(&mut self, name: &str, rule: impl Fn(&PreventCheck<'_>) -> bool + Send + Sync + 'static) {
        self.rules.push((name.to_string(), Box::new(rule)));
    }

    /// Register a custom rule. Duplicate names are a setup error.
    pub fn add(&mut self, name: &str, rule: PreventRule) -> Result<(), SetupError> {
        if self.rules.iter().any(|(n, _)| n == name) {
            return Err(SetupError::PreventRule(format!(
                "rule {name:?} is already registered"
            )));
        }
        self.rules.push((name.to_string(), rule));
        Ok(())
    }

    /// Run one named rule.
    pub fn run(&self, name: &str, check: &PreventCheck<'_>) -> bool {
        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule(check))
            .unwrap_or(false)
    }

    /// URL-level exclusion (no element involved).
    pub fn check_url(
        &self,
        href: &str,
        current: &PageUrl,
        doc: &dyn Document,
        schema: &AttributeSchema,
    ) -> bool {
        self.check(None, href, current, doc, schema)
    }

    /// Element-level exclusion.
    pub fn check_link(
        &self,
        el: ElementRef,
        href: &str,
        current: &PageUrl,
        doc: &dyn Document,
        schema: &AttributeSchema,
    ) -> bool {
        self.check(Some(el), href, current, doc, schema)
    }

    /// Run every rule; any single match excludes the candidate.
    pub fn check(
        &self,
        el: Option<ElementRef>,
        href: &str,
        current: &PageUrl,
        doc: &dyn Document,
        schema: &AttributeSchema,
    ) -> bool {
        let check = PreventCheck {
            el,
            href,
            url: PageUrl::parse(href),
            current,
            doc,
            schema,
        };
        self.rules.iter().any(|(_, rule)| rule(&check))
    }

    /// Is `href` the same logical page as `current`? Path and query are
    /// compared, the fragment is ignored.
    pub fn same_url(&self, href: &str, current: &PageUrl) -> bool {
        PageUrl::parse(href).same_page(current)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for PreventGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NavEvent;
    use std::collections::HashMap;

    struct FakeDoc {
        attrs: HashMap<(ElementRef, String), String>,
    }

    impl FakeDoc {
        fn new() -> Self {
            Self {
                attrs: HashMap::new(),
            }
        }

        fn with_attr(mut self, el: ElementRef, name: &str, value: &str) -> Self {
            self.attrs.insert((el, name.to_string()), value.to_string());
            self
        }
    }

    impl Document for FakeDoc {
        fn wrapper(&self) -> Option<ElementRef> {
            Some(ElementRef(1))
        }
        fn container(&self, _wrapper: ElementRef) -> Option<ElementRef> {
            Some(ElementRef(2))
        }
        fn outer_html(&self, _el: ElementRef) -> String {
            String::new()
        }
        fn current_href(&self) -> String {
            "https://example.test/home".to_string()
        }
        fn closest_href(&self, _el: ElementRef) -> Option<String> {
            None
        }
        fn attribute(&self, el: ElementRef, name: &str) -> Option<String> {
            self.attrs.get(&(el, name.to_string())).cloned()
        }
        fn mark_live_region(&self, _wrapper: ElementRef) {}
        fn set_title(&self, _title: &str) {}
        fn suppress_default(&self, _event: &NavEvent) {}
        fn replace_container(&self, _wrapper: ElementRef, _html: &str) -> ElementRef {
            ElementRef(3)
        }
        fn hard_navigate(&self, _href: &str) {}
    }

    fn current() -> PageUrl {
        PageUrl::parse("https://example.test/home")
    }

    #[test]
    fn plain_same_origin_link_is_allowed() {
        let guard = PreventGuard::new();
        let doc = FakeDoc::new();
        let schema = AttributeSchema::default();
        assert!(!guard.check_link(ElementRef(7), "/about", &current(), &doc, &schema));
    }

    #[test]
    fn cross_origin_is_prevented() {
        let guard = PreventGuard::new();
        let doc = FakeDoc::new();
        let schema = AttributeSchema::default();
        assert!(guard.check_url("https://elsewhere.test/x", &current(), &doc, &schema));
    }

    #[test]
    fn protocol_links_are_prevented() {
        let guard = PreventGuard::new();
        let doc = FakeDoc::new();
        let schema = AttributeSchema::default();
        assert!(guard.check_url("mailto:team@example.test", &current(), &doc, &schema));
        assert!(guard.check_url("tel:+123456", &current(), &doc, &schema));
    }

    #[test]
    fn blank_download_and_marker_attributes_are_prevented() {
        let el = ElementRef(7);
        let schema = AttributeSchema::default();
        let guard = PreventGuard::new();

        let doc = FakeDoc::new().with_attr(el, "target", "_blank");
        assert!(guard.check_link(el, "/about", &current(), &doc, &schema));

        let doc = FakeDoc::new().with_attr(el, "download", "");
        assert!(guard.check_link(el, "/file", &current(), &doc, &schema));

        let doc = FakeDoc::new().with_attr(el, "data-glissade-prevent", "");
        assert!(guard.check_link(el, "/about", &current(), &doc, &schema));
    }

    #[test]
    fn custom_rule_participates() {
        let mut guard = PreventGuard::new();
        guard
            .add("no_admin", Box::new(|check| check.url.path.starts_with("/admin")))
            .unwrap();
        let doc = FakeDoc::new();
        let schema = AttributeSchema::default();
        assert!(guard.check_url("/admin/users", &current(), &doc, &schema));
        assert!(!guard.check_url("/about", &current(), &doc, &schema));
    }

    #[test]
    fn duplicate_rule_name_is_rejected() {
        let mut guard = PreventGuard::new();
        guard.add("custom", Box::new(|_| false)).unwrap();
        let err = guard.add("custom", Box::new(|_| false)).unwrap_err();
        assert!(matches!(err, SetupError::PreventRule(_)));
    }

    #[test]
    fn same_url_ignores_fragment() {
        let guard = PreventGuard::new();
        assert!(guard.same_url("/home#anchor", &current()));
        assert!(!guard.same_url("/about", &current()));
    }
}
