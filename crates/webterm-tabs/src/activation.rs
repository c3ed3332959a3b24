//! Tree activation signal
//!
//! The input layer decides between single and double activation; only a
//! double activation opens a session (or folds a group).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Plain selection, no side effects
    Single,
    /// Double click / double tap
    Double,
}

impl Activation {
    /// Map a click count from the input layer (1 for the first click of a
    /// sequence, 2 for the second, ...)
    pub fn from_click_count(count: u32) -> Self {
        if count > 1 {
            Activation::Double
        } else {
            Activation::Single
        }
    }

    pub fn opens_session(&self) -> bool {
        matches!(self, Activation::Double)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activation::Single => "single",
            Activation::Double => "double",
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_counts() {
        assert_eq!(Activation::from_click_count(0), Activation::Single);
        assert_eq!(Activation::from_click_count(1), Activation::Single);
        assert_eq!(Activation::from_click_count(2), Activation::Double);
        assert_eq!(Activation::from_click_count(3), Activation::Double);
    }

    #[test]
    fn test_only_double_opens() {
        assert!(Activation::Double.opens_session());
        assert!(!Activation::Single.opens_session());
    }
}
