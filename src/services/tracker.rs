use crate::breakpoints::BreakpointTable;
use crate::debug_if_enabled;
use crate::events::{Direction, TransitionEvent};

/// Последний зафиксированный брейкпоинт и ширина окна при входе в него.
///
/// Обновляется только при смене брейкпоинта: замеры внутри того же
/// брейкпоинта ширину не перезаписывают.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub current_bucket: Option<String>,
    pub current_width: Option<u32>,
}

impl ViewportState {
    #[allow(dead_code)]
    pub fn is_initialized(&self) -> bool {
        self.current_bucket.is_some()
    }
}

/// Превращает поток ширин окна в переходы между брейкпоинтами
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    table: BreakpointTable,
    state: ViewportState,
}

impl ViewportTracker {
    pub fn new(table: BreakpointTable) -> Self {
        Self {
            table,
            state: ViewportState::default(),
        }
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn on_measurement(&mut self, width: u32) -> Option<TransitionEvent> {
        let breakpoint = self.table.resolve(width);

        let direction = match (&self.state.current_bucket, self.state.current_width) {
            (None, _) => Direction::Initial,
            (Some(current), _) if *current == breakpoint.name => {
                debug_if_enabled!("Ширина {}px остаётся в брейкпоинте {}", width, current);
                return None;
            }
            (Some(_), Some(prev_width)) if width > prev_width => Direction::Grew,
            (Some(_), _) => Direction::Shrank,
        };

        let event = TransitionEvent::new(breakpoint, width, direction, self.state.current_bucket.take());
        self.state.current_bucket = Some(event.viewport.clone());
        self.state.current_width = Some(width);

        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoints::Breakpoint;

    fn tracker() -> ViewportTracker {
        let table = BreakpointTable::new(vec![
            Breakpoint::new("mini", 240),
            Breakpoint::new("portrait", 320),
            Breakpoint::new("landscape", 480),
            Breakpoint::new("tablet", 768),
            Breakpoint::unbounded("desktop"),
        ])
        .unwrap();
        ViewportTracker::new(table)
    }

    #[test]
    fn test_first_measurement_is_initial() {
        for width in [0, 100, 320, 5000] {
            let mut t = tracker();
            assert!(!t.state().is_initialized());
            let event = t.on_measurement(width).unwrap();
            assert_eq!(event.direction, Direction::Initial);
            assert_eq!(event.previous, None);
            assert_eq!(t.state().current_width, Some(width));
        }
    }

    #[test]
    fn test_sequence_produces_two_events() {
        let mut t = tracker();
        let events: Vec<_> = [900, 900, 500].into_iter().filter_map(|w| t.on_measurement(w)).collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].viewport, "desktop");
        assert_eq!(events[0].direction, Direction::Initial);
        assert_eq!(events[1].viewport, "tablet");
        assert_eq!(events[1].direction, Direction::Shrank);
        assert_eq!(events[1].previous.as_deref(), Some("desktop"));
    }

    #[test]
    fn test_grow_and_shrink_directions() {
        let mut t = tracker();
        t.on_measurement(300);

        let grew = t.on_measurement(470).unwrap();
        assert_eq!(grew.viewport, "landscape");
        assert_eq!(grew.direction, Direction::Grew);

        let shrank = t.on_measurement(300).unwrap();
        assert_eq!(shrank.viewport, "portrait");
        assert_eq!(shrank.direction, Direction::Shrank);
    }

    #[test]
    fn test_300_to_500_grows_and_back_shrinks() {
        let mut t = tracker();
        t.on_measurement(300);

        let grew = t.on_measurement(500).unwrap();
        assert_eq!(grew.viewport, "tablet");
        assert_eq!(grew.direction, Direction::Grew);
        assert_eq!(grew.previous.as_deref(), Some("portrait"));

        let shrank = t.on_measurement(300).unwrap();
        assert_eq!(shrank.viewport, "portrait");
        assert_eq!(shrank.direction, Direction::Shrank);
        assert_eq!(shrank.direction.resized(), -1);
    }

    #[test]
    fn test_same_width_twice_is_idempotent() {
        let mut t = tracker();
        assert!(t.on_measurement(600).is_some());
        assert!(t.on_measurement(600).is_none());
        assert!(t.on_measurement(600).is_none());
    }

    #[test]
    fn test_width_only_recorded_on_transition() {
        let mut t = tracker();
        t.on_measurement(330);
        t.on_measurement(470);
        t.on_measurement(400);
        assert_eq!(t.state().current_bucket.as_deref(), Some("landscape"));
        assert_eq!(t.state().current_width, Some(330));

        // 300 < 330, сравнение идёт с шириной на входе в брейкпоинт
        let event = t.on_measurement(300).unwrap();
        assert_eq!(event.direction, Direction::Shrank);
        assert_eq!(t.state().current_width, Some(300));
    }

    #[test]
    fn test_direction_compares_entry_width_not_last_sample() {
        let mut t = tracker();
        t.on_measurement(470);
        // Сжатие внутри landscape не сбрасывает ширину входа
        assert!(t.on_measurement(330).is_none());

        let event = t.on_measurement(800).unwrap();
        assert_eq!(event.viewport, "desktop");
        assert_eq!(event.direction, Direction::Grew);
        assert_eq!(event.max_width, None);
    }
}
