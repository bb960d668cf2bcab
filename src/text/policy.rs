//! Limits applied to every edit.

use crate::error::Rejection;

/// Default total rune limit.
pub const DEFAULT_CHAR_LIMIT: usize = 400;
/// Default logical line limit.
pub const DEFAULT_MAX_LINES: usize = 99;

/// Limits checked before and after a mutation.
///
/// `None` disables a limit. A failed check rejects the whole edit; there
/// is no partial insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditPolicy {
    /// Maximum total runes, line breaks included.
    pub char_limit: Option<usize>,
    /// Maximum number of logical lines.
    pub max_lines: Option<usize>,
    /// Maximum wrapped rows for the line holding the cursor.
    pub row_budget: Option<usize>,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            char_limit: Some(DEFAULT_CHAR_LIMIT),
            max_lines: Some(DEFAULT_MAX_LINES),
            row_budget: None,
        }
    }
}

impl EditPolicy {
    /// A policy with every limit disabled.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            char_limit: None,
            max_lines: None,
            row_budget: None,
        }
    }

    /// Check that adding `inserted` runes to `current` stays within the limit.
    pub fn check_chars(&self, current: usize, inserted: usize) -> Result<(), Rejection> {
        match self.char_limit {
            Some(limit) if current + inserted > limit => Err(Rejection::CharLimitExceeded {
                limit,
                attempted: current + inserted,
            }),
            _ => Ok(()),
        }
    }

    /// Check that growing to `lines` logical lines stays within the limit.
    pub fn check_lines(&self, lines: usize) -> Result<(), Rejection> {
        match self.max_lines {
            Some(limit) if lines > limit => Err(Rejection::LineLimitExceeded {
                limit,
                attempted: lines,
            }),
            _ => Ok(()),
        }
    }

    /// Check the wrapped row count of an edited line.
    ///
    /// `before` is the row count prior to the edit. A line that already
    /// exceeded the budget (after a resize or a programmatic value) may
    /// still be edited as long as the edit does not make it taller.
    pub fn check_rows(&self, before: usize, after: usize) -> Result<(), Rejection> {
        match self.row_budget {
            Some(budget) if after > budget && after > before => Err(Rejection::OverflowGuard {
                rows: after,
                budget,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let policy = EditPolicy::default();
        assert_eq!(policy.char_limit, Some(400));
        assert_eq!(policy.max_lines, Some(99));
        assert_eq!(policy.row_budget, None);
    }

    #[test]
    fn test_char_limit_is_all_or_nothing() {
        let policy = EditPolicy {
            char_limit: Some(7),
            ..EditPolicy::unrestricted()
        };
        assert!(policy.check_chars(0, 7).is_ok());
        assert_eq!(
            policy.check_chars(7, 4),
            Err(Rejection::CharLimitExceeded {
                limit: 7,
                attempted: 11
            })
        );
    }

    #[test]
    fn test_line_limit() {
        let policy = EditPolicy {
            max_lines: Some(2),
            ..EditPolicy::unrestricted()
        };
        assert!(policy.check_lines(2).is_ok());
        assert!(policy.check_lines(3).is_err());
    }

    #[test]
    fn test_row_budget_allows_shrinking() {
        let policy = EditPolicy {
            row_budget: Some(3),
            ..EditPolicy::unrestricted()
        };
        assert!(policy.check_rows(2, 3).is_ok());
        assert_eq!(
            policy.check_rows(3, 4),
            Err(Rejection::OverflowGuard { rows: 4, budget: 3 })
        );
        // Already over budget but not growing.
        assert!(policy.check_rows(5, 5).is_ok());
        assert!(policy.check_rows(5, 4).is_ok());
    }

    #[test]
    fn test_unrestricted() {
        let policy = EditPolicy::unrestricted();
        assert!(policy.check_chars(usize::MAX / 2, 10).is_ok());
        assert!(policy.check_lines(10_000).is_ok());
        assert!(policy.check_rows(0, 10_000).is_ok());
    }
}
