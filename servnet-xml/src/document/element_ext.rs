use minidom::Element;

use super::ElementError;

/// attribute and child accessors over the parsed document tree. the
/// `try_` variants produce structured errors naming the element, the
/// plain variants leave absence handling to the caller.
pub trait ElementExt {
    fn attribute(&self, name: &str) -> Option<String>;

    /// attribute value when present and non-blank after trimming.
    fn non_blank_attribute(&self, name: &str) -> Option<String>;

    fn try_attribute(&self, name: &str) -> Result<String, ElementError>;

    fn only_child(&self, name: &str) -> Option<&Element>;

    fn try_only_child(&self, name: &str) -> Result<&Element, ElementError>;

    fn children_named<'a>(&'a self, name: &'a str) -> Box<dyn Iterator<Item = &'a Element> + 'a>;
}

impl ElementExt for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attr(name).map(String::from)
    }

    fn non_blank_attribute(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    }

    fn try_attribute(&self, name: &str) -> Result<String, ElementError> {
        self.attr(name)
            .map(String::from)
            .ok_or_else(|| ElementError::MissingAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
            })
    }

    fn only_child(&self, name: &str) -> Option<&Element> {
        self.children().find(|child| child.name() == name)
    }

    fn try_only_child(&self, name: &str) -> Result<&Element, ElementError> {
        self.only_child(name).ok_or_else(|| ElementError::MissingChild {
            element: self.name().to_string(),
            child: name.to_string(),
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> Box<dyn Iterator<Item = &'a Element> + 'a> {
        Box::new(self.children().filter(move |child| child.name() == name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_attribute_access() {
        let element: Element = r#"<leg id="l1" nodearef="  " nodebref="s2"/>"#
            .parse()
            .expect("fixture parses");
        assert_eq!(element.attribute("id"), Some("l1".to_string()));
        assert_eq!(element.non_blank_attribute("nodearef"), None);
        assert_eq!(element.non_blank_attribute("nodebref"), Some("s2".to_string()));
        assert!(matches!(
            element.try_attribute("direction"),
            Err(ElementError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_child_access() {
        let element: Element = r#"<trip id="t1"><schedule/><other/></trip>"#
            .parse()
            .expect("fixture parses");
        assert!(element.only_child("schedule").is_some());
        assert!(element.only_child("frequency").is_none());
        assert_eq!(element.children_named("schedule").count(), 1);
        assert!(matches!(
            element.try_only_child("frequency"),
            Err(ElementError::MissingChild { .. })
        ));
    }
}
