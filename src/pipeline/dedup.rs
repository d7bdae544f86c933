//! Adjacent de-duplication

/// Suppresses a value equal to the one immediately before it.
///
/// Only adjacency is checked: `x, y, x` passes all three.
#[derive(Debug, Clone, Default)]
pub struct RemoveDuplicates<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> RemoveDuplicates<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` if `value` should be forwarded
    pub fn accept(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_repeats_suppressed() {
        let mut dedup = RemoveDuplicates::new();
        let passed: Vec<&str> = ["a", "a", "b", "b", "b", "a"]
            .into_iter()
            .filter(|v| dedup.accept(v))
            .collect();

        assert_eq!(passed, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_first_value_always_passes() {
        let mut dedup = RemoveDuplicates::new();
        assert!(dedup.accept(&String::new()));
        assert!(!dedup.accept(&String::new()));
    }
}
