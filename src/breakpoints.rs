use crate::error::Result;
use crate::viewport_error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Именованный диапазон ширин окна, ограниченный сверху
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    /// `None` означает отсутствие верхней границы (последний брейкпоинт)
    #[serde(default)]
    pub max_width: Option<u32>,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, max_width: u32) -> Self {
        Self {
            name: name.into(),
            max_width: Some(max_width),
        }
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_width: None,
        }
    }

    pub fn matches(&self, width: u32) -> bool {
        self.max_width.map_or(true, |max| width <= max)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_width {
            Some(max) => write!(f, "{} (<= {}px)", self.name, max),
            None => write!(f, "{} (без ограничения)", self.name),
        }
    }
}

static DEFAULT_BREAKPOINTS: Lazy<Vec<Breakpoint>> = Lazy::new(|| {
    vec![
        Breakpoint::new("mobile-mini", 240),
        Breakpoint::new("mobile-portrait", 320),
        Breakpoint::new("mobile-landscape", 480),
        Breakpoint::new("tablet-portrait", 768),
        Breakpoint::unbounded("desktop"),
    ]
});

pub fn default_breakpoints() -> Vec<Breakpoint> {
    DEFAULT_BREAKPOINTS.clone()
}

/// Упорядоченная таблица брейкпоинтов.
///
/// Гарантии после [`BreakpointTable::new`]:
/// - таблица не пуста;
/// - имена непустые и уникальные (из них строятся CSS-классы);
/// - брейкпоинт без верхней границы может быть только один и только последним.
///
/// Порядок по возрастанию `max_width` не проверяется, нарушение лишь логируется.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new(entries: Vec<Breakpoint>) -> Result<Self> {
        if entries.is_empty() {
            return Err(viewport_error!(invalid_table, "таблица брейкпоинтов пуста"));
        }

        let last = entries.len() - 1;
        let mut seen = HashSet::with_capacity(entries.len());

        for (i, bp) in entries.iter().enumerate() {
            if bp.name.trim().is_empty() {
                return Err(viewport_error!(invalid_table, "пустое имя у брейкпоинта #{}", i + 1));
            }
            if !seen.insert(bp.name.as_str()) {
                return Err(viewport_error!(invalid_table, "брейкпоинт '{}' указан дважды", bp.name));
            }
            if bp.max_width.is_none() && i != last {
                return Err(viewport_error!(
                    invalid_table,
                    "брейкпоинт '{}' без верхней границы должен быть последним",
                    bp.name
                ));
            }
        }

        let ascending = entries.windows(2).all(|pair| match (pair[0].max_width, pair[1].max_width) {
            (Some(a), Some(b)) => a < b,
            _ => true,
        });
        if !ascending {
            warn!("Брейкпоинты не упорядочены по возрастанию ширины, используется первый подходящий");
        }

        Ok(Self { entries })
    }

    /// Первый брейкпоинт, чья граница >= `width`; если ни один не подошёл, последний.
    pub fn resolve(&self, width: u32) -> &Breakpoint {
        self.entries
            .iter()
            .find(|bp| bp.matches(width))
            .unwrap_or_else(|| self.catch_all())
    }

    fn catch_all(&self) -> &Breakpoint {
        // Непустота гарантирована конструктором
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|bp| bp.name == name)
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            entries: default_breakpoints(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewportError;

    fn short_table() -> BreakpointTable {
        BreakpointTable::new(vec![
            Breakpoint::new("mini", 240),
            Breakpoint::new("portrait", 320),
            Breakpoint::new("landscape", 480),
            Breakpoint::new("tablet", 768),
            Breakpoint::unbounded("desktop"),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_examples() {
        let table = short_table();
        assert_eq!(table.resolve(800).name, "desktop");
        assert_eq!(table.resolve(240).name, "mini");
        assert_eq!(table.resolve(241).name, "portrait");
        assert_eq!(table.resolve(0).name, "mini");
        assert_eq!(table.resolve(768).max_width, Some(768));
        assert_eq!(table.resolve(u32::MAX).max_width, None);
    }

    #[test]
    fn test_resolve_always_returns_table_entry() {
        let table = short_table();
        for width in (0..2000).step_by(7) {
            let bp = table.resolve(width);
            assert!(table.entries().contains(bp), "ширина {} -> {}", width, bp);
        }
    }

    #[test]
    fn test_resolve_is_monotonic_for_ordered_table() {
        let table = short_table();
        let index_of = |width: u32| {
            let name = &table.resolve(width).name;
            table.entries().iter().position(|bp| &bp.name == name).unwrap()
        };

        let mut prev = index_of(0);
        for width in 1..1500 {
            let idx = index_of(width);
            assert!(idx >= prev, "ширина {}: {} < {}", width, idx, prev);
            prev = idx;
        }
    }

    #[test]
    fn test_bounded_last_entry_is_catch_all() {
        let table = BreakpointTable::new(vec![
            Breakpoint::new("mobile", 480),
            Breakpoint::new("desktop", 960),
        ])
        .unwrap();

        assert_eq!(table.resolve(1920).name, "desktop");
        assert_eq!(table.resolve(1920).max_width, Some(960));
    }

    #[test]
    fn test_default_table() {
        let table = BreakpointTable::default();
        assert_eq!(table.len(), 5);
        assert_eq!(table.resolve(300).name, "mobile-portrait");
        assert_eq!(table.resolve(500).name, "tablet-portrait");
        assert_eq!(table.resolve(1024).name, "desktop");
        assert!(table.contains("mobile-mini"));
        assert_eq!(BreakpointTable::new(default_breakpoints()).unwrap(), table);
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = BreakpointTable::new(vec![]).unwrap_err();
        assert!(matches!(err, ViewportError::InvalidTable(_)));
    }

    #[test]
    fn test_rejects_unbounded_not_last() {
        let err = BreakpointTable::new(vec![
            Breakpoint::unbounded("desktop"),
            Breakpoint::new("mobile", 480),
        ])
        .unwrap_err();
        assert!(matches!(err, ViewportError::InvalidTable(_)));

        let err = BreakpointTable::new(vec![
            Breakpoint::new("mobile", 480),
            Breakpoint::unbounded("wide"),
            Breakpoint::unbounded("desktop"),
        ])
        .unwrap_err();
        assert!(matches!(err, ViewportError::InvalidTable(_)));
    }

    #[test]
    fn test_rejects_duplicate_and_empty_names() {
        let dup = BreakpointTable::new(vec![
            Breakpoint::new("mobile", 480),
            Breakpoint::unbounded("mobile"),
        ]);
        assert!(matches!(dup, Err(ViewportError::InvalidTable(_))));

        let empty = BreakpointTable::new(vec![Breakpoint::unbounded(" ")]);
        assert!(matches!(empty, Err(ViewportError::InvalidTable(_))));
    }

    #[test]
    fn test_unordered_table_is_accepted() {
        let table = BreakpointTable::new(vec![
            Breakpoint::new("tablet", 768),
            Breakpoint::new("mobile", 320),
            Breakpoint::unbounded("desktop"),
        ])
        .unwrap();

        // Первый подходящий выигрывает, даже если он шире
        assert_eq!(table.resolve(100).name, "tablet");
    }
}
