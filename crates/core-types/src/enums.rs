use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

/// The four levels of the trading-book hierarchy, ordered from the coarsest
/// grouping (business unit) down to the individual book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HierarchyLevel {
    BusinessUnit,
    SubBusinessUnit,
    TradingDesk,
    Book,
}

impl HierarchyLevel {
    /// All levels, top-down. The order here defines the roll-up order everywhere else.
    pub const ALL: [HierarchyLevel; 4] = [
        HierarchyLevel::BusinessUnit,
        HierarchyLevel::SubBusinessUnit,
        HierarchyLevel::TradingDesk,
        HierarchyLevel::Book,
    ];

    /// Returns the 1-based depth of this level below the hierarchy root.
    pub fn depth(&self) -> usize {
        match self {
            HierarchyLevel::BusinessUnit => 1,
            HierarchyLevel::SubBusinessUnit => 2,
            HierarchyLevel::TradingDesk => 3,
            HierarchyLevel::Book => 4,
        }
    }

    /// Returns the level at the given depth, if any. Depth 0 is the root,
    /// which has no level.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(HierarchyLevel::BusinessUnit),
            2 => Some(HierarchyLevel::SubBusinessUnit),
            3 => Some(HierarchyLevel::TradingDesk),
            4 => Some(HierarchyLevel::Book),
            _ => None,
        }
    }

    /// Returns the level directly above this one, or `None` for the top level.
    pub fn parent(&self) -> Option<Self> {
        Self::from_depth(self.depth() - 1)
    }

    /// Returns the level directly below this one, or `None` for `Book`.
    pub fn child(&self) -> Option<Self> {
        Self::from_depth(self.depth() + 1)
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyLevel::BusinessUnit => write!(f, "Business Unit"),
            HierarchyLevel::SubBusinessUnit => write!(f, "Sub Business Unit"),
            HierarchyLevel::TradingDesk => write!(f, "Trading Desk"),
            HierarchyLevel::Book => write!(f, "Book"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_is_consistent() {
        for (i, level) in HierarchyLevel::ALL.iter().enumerate() {
            assert_eq!(level.depth(), i + 1);
            assert_eq!(HierarchyLevel::from_depth(i + 1), Some(*level));
        }
        assert_eq!(HierarchyLevel::from_depth(0), None);
        assert_eq!(HierarchyLevel::from_depth(5), None);
    }

    #[test]
    fn parent_and_child_walk_the_ladder() {
        assert_eq!(HierarchyLevel::BusinessUnit.parent(), None);
        assert_eq!(
            HierarchyLevel::Book.parent(),
            Some(HierarchyLevel::TradingDesk)
        );
        assert_eq!(
            HierarchyLevel::BusinessUnit.child(),
            Some(HierarchyLevel::SubBusinessUnit)
        );
        assert_eq!(HierarchyLevel::Book.child(), None);
    }
}
