/// Terminal result of one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The scan completed and `resolved` records of the batch were matched
    /// (not necessarily all). `partial` marks a scan cut short by the time
    /// budget; examined posts still counted.
    Success { resolved: usize, partial: bool },
    /// Every attempt was classified as rate limiting.
    RetriesExhausted,
    /// A non-retryable failure ended the call on the spot.
    NonRetryableFailure,
}

impl ResolveOutcome {
    /// Coarse abort view for callers that only branch on pass/fail:
    /// `true` means no record in the batch can be trusted.
    pub fn aborted(&self) -> bool {
        !matches!(self, ResolveOutcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_is_not_aborted() {
        assert!(!ResolveOutcome::Success {
            resolved: 0,
            partial: false
        }
        .aborted());
        assert!(ResolveOutcome::RetriesExhausted.aborted());
        assert!(ResolveOutcome::NonRetryableFailure.aborted());
    }
}
