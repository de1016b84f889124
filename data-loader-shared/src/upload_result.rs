//! Aggregate result of one upload.

use std::fmt;

use crate::document::IndexAction;

/// Counters and queued actions for a single upload.
///
/// The transformer fills it in row by row; the bulk coordinator then moves
/// engine-rejected documents from `successful` to `failed`. `total` never
/// changes after transformation, so `total == successful + failed` holds at
/// every stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadResult {
    /// Rows that reached a success or failure decision.
    pub total: usize,
    /// Rows currently considered indexed.
    pub successful: usize,
    /// Rows that failed to transform or were rejected by the engine.
    pub failed: usize,
    /// Actions queued for the bulk write, in source order.
    pub actions: Vec<IndexAction>,
}

impl UploadResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a transformed row and queue its action.
    pub fn record_success(&mut self, action: IndexAction) {
        self.total += 1;
        self.successful += 1;
        self.actions.push(action);
    }

    /// Count a row that failed to transform.
    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    /// Move `rejected` documents from `successful` to `failed`.
    ///
    /// The engine cannot reject more documents than were submitted, so the
    /// count is clamped to `successful`. Returns the number actually moved.
    pub fn apply_rejections(&mut self, rejected: usize) -> usize {
        let moved = rejected.min(self.successful);
        self.successful -= moved;
        self.failed += moved;
        moved
    }

    /// Whether the counters add up.
    pub fn is_consistent(&self) -> bool {
        self.total == self.successful + self.failed
    }
}

impl fmt::Display for UploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully processed {}/{} records ({} failed)",
            self.successful, self.total, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ProjectDocument;

    fn action() -> IndexAction {
        IndexAction::new(
            "mu_data",
            ProjectDocument {
                proj_id: "1".to_string(),
                title: None,
                description: "annotation".to_string(),
                reg_code: None,
                uco: None,
            },
        )
    }

    #[test]
    fn test_counters_stay_consistent() {
        let mut result = UploadResult::new();
        result.record_success(action());
        result.record_failure();
        result.record_success(action());

        assert_eq!(result.total, 3);
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.actions.len(), 2);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_apply_rejections_moves_counts() {
        let mut result = UploadResult::new();
        for _ in 0..10 {
            result.record_success(action());
        }

        assert_eq!(result.apply_rejections(2), 2);
        assert_eq!(result.total, 10);
        assert_eq!(result.successful, 8);
        assert_eq!(result.failed, 2);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_apply_rejections_is_clamped() {
        let mut result = UploadResult::new();
        result.record_success(action());
        result.record_failure();

        assert_eq!(result.apply_rejections(5), 1);
        assert_eq!(result.successful, 0);
        assert_eq!(result.failed, 2);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_display_summary() {
        let mut result = UploadResult::new();
        result.record_success(action());
        result.record_failure();

        assert_eq!(
            result.to_string(),
            "Successfully processed 1/2 records (1 failed)"
        );
    }
}
