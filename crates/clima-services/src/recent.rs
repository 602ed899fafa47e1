//! Bounded, de-duplicated list of recently searched cities.

/// Capacity of the recent-search list; larger requested capacities are clamped
pub const MAX_RECENT: usize = 5;

/// Recently searched cities, most recent first.
///
/// A city already in the list keeps its position when searched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    cities: Vec<String>,
    capacity: usize,
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(MAX_RECENT)
    }
}

impl RecentSearches {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_RECENT);
        Self {
            cities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build from a persisted list, dropping duplicates and overflow.
    pub fn from_stored(stored: Vec<String>, capacity: usize) -> Self {
        let capacity = capacity.min(MAX_RECENT);
        let mut cities: Vec<String> = Vec::with_capacity(capacity);
        for city in stored {
            if cities.len() == capacity {
                break;
            }
            if !cities.contains(&city) {
                cities.push(city);
            }
        }
        Self { cities, capacity }
    }

    /// Record a search. Returns true if the list changed.
    pub fn add(&mut self, city: &str) -> bool {
        if self.contains(city) {
            return false;
        }
        self.cities.insert(0, city.to_string());
        self.cities.truncate(self.capacity);
        true
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &RecentSearches) -> Vec<&str> {
        list.as_slice().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_add_prepends() {
        let mut list = RecentSearches::default();
        assert!(list.add("Paris"));
        assert!(list.add("Lisboa"));
        assert_eq!(names(&list), ["Lisboa", "Paris"]);
    }

    #[test]
    fn test_repeat_is_noop() {
        let mut list = RecentSearches::default();
        list.add("Paris");
        let before = list.clone();

        assert!(!list.add("Paris"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_repeat_keeps_first_seen_position() {
        let mut list = RecentSearches::default();
        list.add("Paris");
        list.add("Lisboa");
        list.add("Paris");
        assert_eq!(names(&list), ["Lisboa", "Paris"]);
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut list = RecentSearches::default();
        for city in ["A", "B", "C", "D", "E", "F", "G"] {
            list.add(city);
        }
        assert_eq!(list.len(), MAX_RECENT);
        assert_eq!(names(&list), ["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_capacity_never_exceeds_max() {
        let mut list = RecentSearches::new(8);
        for city in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            list.add(city);
        }
        assert_eq!(names(&list), ["h", "g", "f", "e", "d"]);

        let stored = (0..8).map(|i| format!("c{}", i)).collect();
        assert_eq!(RecentSearches::from_stored(stored, 8).len(), MAX_RECENT);
    }

    #[test]
    fn test_evicted_city_can_return() {
        let mut list = RecentSearches::new(2);
        list.add("A");
        list.add("B");
        list.add("C");
        assert!(!list.contains("A"));

        assert!(list.add("A"));
        assert_eq!(names(&list), ["A", "C"]);
    }

    #[test]
    fn test_mixed_sequence_invariants() {
        let mut list = RecentSearches::default();
        let sequence = [
            "Paris", "Roma", "Paris", "Tóquio", "Lima", "Roma", "Oslo", "Quito", "Lima", "Cairo",
        ];
        for city in sequence {
            list.add(city);
            assert!(list.len() <= MAX_RECENT);
            let mut sorted = names(&list);
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len(), "duplicates in {:?}", list);
        }
        assert_eq!(names(&list), ["Cairo", "Quito", "Oslo", "Lima", "Tóquio"]);
    }

    #[test]
    fn test_case_sensitive_names() {
        let mut list = RecentSearches::default();
        list.add("paris");
        assert!(list.add("Paris"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_stored_sanitizes() {
        let stored = ["A", "B", "A", "C", "D", "E", "F"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let list = RecentSearches::from_stored(stored, 5);
        assert_eq!(names(&list), ["A", "B", "C", "D", "E"]);
    }
}
