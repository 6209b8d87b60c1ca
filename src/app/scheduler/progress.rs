//! Scan progress events

use tokio::sync::mpsc;

use crate::app::models::ChartKey;

/// Emitted once per settled fetch task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    /// Tasks settled so far, this one included
    pub completed: usize,
    /// Tasks in the whole scan
    pub total: usize,
    /// Chart that just settled
    pub key: ChartKey,
    /// Ranked entries it returned (zero for an empty or failed chart)
    pub entries: usize,
}

impl ScanProgress {
    /// Whether the chart returned any data
    pub fn is_hit(&self) -> bool {
        self.entries > 0
    }

    pub fn is_last(&self) -> bool {
        self.completed == self.total
    }

    /// Completion in percent
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Optional sink for progress events
pub type ProgressSender = mpsc::UnboundedSender<ScanProgress>;

/// Forward an event if anyone is listening; a dropped receiver is ignored
pub(crate) fn emit(sink: Option<&ProgressSender>, event: ScanProgress) {
    if let Some(tx) = sink {
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ChartCategory;

    fn event(completed: usize, total: usize, entries: usize) -> ScanProgress {
        ScanProgress {
            completed,
            total,
            key: ChartKey::new("us", ChartCategory::TopFree),
            entries,
        }
    }

    #[test]
    fn test_progress_helpers() {
        let first = event(1, 4, 0);
        assert!(!first.is_hit());
        assert!(!first.is_last());
        assert_eq!(first.percent(), 25.0);

        let last = event(4, 4, 12);
        assert!(last.is_hit());
        assert!(last.is_last());
        assert_eq!(last.percent(), 100.0);
    }

    #[test]
    fn test_emit_tolerates_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        emit(Some(&tx), event(1, 1, 0));
        emit(None, event(1, 1, 0));
    }
}
