//! Request and response types for search index operations.

/// Outcome of an index creation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// The index did not exist and was created.
    Created,
    /// The index was already there and was left untouched.
    AlreadyExists,
}

/// A single document the engine refused during a bulk write.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedItem {
    /// Identifier of the rejected document as echoed by the engine.
    pub id: String,
    /// HTTP status the engine reported for the item.
    pub status: u16,
    /// Engine-provided reason, typically `"<type>: <reason>"`.
    pub reason: String,
}

/// Summary of a bulk write that reached the engine.
///
/// Transport or cluster-level failures are returned as errors instead; an
/// outcome always means every action received a per-item verdict.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    /// Number of actions sent.
    pub submitted: usize,
    /// Items the engine rejected.
    pub rejected: Vec<RejectedItem>,
}

impl BulkOutcome {
    /// Number of rejected items.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Number of accepted items.
    pub fn accepted_count(&self) -> usize {
        self.submitted.saturating_sub(self.rejected.len())
    }

    /// Fold another chunk's outcome into this one.
    pub fn merge(&mut self, other: BulkOutcome) {
        self.submitted += other.submitted;
        self.rejected.extend(other.rejected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_outcome_merge() {
        let mut outcome = BulkOutcome {
            submitted: 3,
            rejected: vec![],
        };
        outcome.merge(BulkOutcome {
            submitted: 2,
            rejected: vec![RejectedItem {
                id: "8d7f3c1e-1b2a-4c5d-9e8f-0a1b2c3d4e5f".to_string(),
                status: 400,
                reason: "mapper_parsing_exception: failed to parse field [ID]".to_string(),
            }],
        });

        assert_eq!(outcome.submitted, 5);
        assert_eq!(outcome.rejected_count(), 1);
        assert_eq!(outcome.accepted_count(), 4);
    }
}
