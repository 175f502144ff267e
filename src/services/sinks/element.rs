use crate::debug_if_enabled;
use crate::error::Result;
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::info;

use super::r#trait::{class_name, ClassToggleSink};

/// Список CSS-классов отслеживаемого элемента
pub struct ElementClassList {
    name: String,
    classes: RwLock<SmallVec<[String; 4]>>,
}

impl ElementClassList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: RwLock::new(SmallVec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes.write();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) -> bool {
        let mut classes = self.classes.write();
        let before = classes.len();
        classes.retain(|c| c != class);
        classes.len() != before
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.read().iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.read().to_vec()
    }
}

impl ClassToggleSink for ElementClassList {
    fn swap_class(&self, prefix: &str, old: Option<&str>, new: &str) -> Result<()> {
        if let Some(old) = old {
            let old_class = class_name(prefix, old);
            if !self.remove_class(&old_class) {
                debug_if_enabled!("У элемента '{}' не было класса {}", self.name, old_class);
            }
        }

        let new_class = class_name(prefix, new);
        self.add_class(&new_class);
        info!("Элемент '{}': классы {:?}", self.name, self.classes.read().as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_class_keeps_single_viewport_class() {
        let el = ElementClassList::new("body");
        el.add_class("page");

        el.swap_class("viewport-", None, "desktop").unwrap();
        assert!(el.has_class("viewport-desktop"));

        el.swap_class("viewport-", Some("desktop"), "tablet-portrait").unwrap();
        assert!(!el.has_class("viewport-desktop"));
        assert!(el.has_class("viewport-tablet-portrait"));
        assert_eq!(el.classes(), vec!["page".to_string(), "viewport-tablet-portrait".to_string()]);
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let el = ElementClassList::new("main");
        el.add_class("vp-desktop");
        el.add_class("vp-desktop");
        assert_eq!(el.classes().len(), 1);
        assert!(!el.remove_class("vp-mobile"));
        assert!(el.remove_class("vp-desktop"));
        assert_eq!(el.name(), "main");
    }
}
