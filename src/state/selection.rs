/// Checked-row tracking for list views
///
/// Holds the identifiers of rows currently checked in a list. Purely
/// local state with no side effects; it never validates that an id
/// still exists server-side — a stale id submitted to a bulk action
/// simply yields a per-item server error.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Flip membership of one identifier
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Set membership for a whole page at once
    pub fn toggle_all(&mut self, ids: &[String], on: bool) {
        if on {
            self.ids.extend(ids.iter().cloned());
        } else {
            for id in ids {
                self.ids.remove(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when every id of the page is checked (and the page is
    /// non-empty); drives the header checkbox
    pub fn covers(&self, page: &[String]) -> bool {
        !page.is_empty() && page.iter().all(|id| self.ids.contains(id))
    }

    /// Drop identifiers that are no longer present in the freshly
    /// fetched page, keeping the invariant selection ⊆ current page
    pub fn prune(&mut self, page: &[String]) {
        let live: HashSet<&str> = page.iter().map(String::as_str).collect();
        self.ids.retain(|id| live.contains(id.as_str()));
    }

    /// The checked identifiers in the page's display order
    pub fn in_page_order(&self, page: &[String]) -> Vec<String> {
        page.iter()
            .filter(|id| self.ids.contains(*id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = Selection::default();
        selection.toggle("u1");
        assert!(selection.contains("u1"));
        selection.toggle("u1");
        assert!(!selection.contains("u1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_sets_and_clears_a_page() {
        let mut selection = Selection::default();
        let ids = page(&["a1", "a2", "a3"]);
        selection.toggle_all(&ids, true);
        assert_eq!(selection.len(), 3);
        assert!(selection.covers(&ids));

        selection.toggle_all(&ids[..2].to_vec(), false);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains("a3"));
        assert!(!selection.covers(&ids));
    }

    #[test]
    fn test_prune_drops_stale_ids_only() {
        let mut selection = Selection::default();
        selection.toggle("u1");
        selection.toggle("gone");
        selection.prune(&page(&["u1", "u2"]));
        assert!(selection.contains("u1"));
        assert!(!selection.contains("gone"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_in_page_order_follows_the_page() {
        let mut selection = Selection::default();
        selection.toggle("c");
        selection.toggle("a");
        let ordered = selection.in_page_order(&page(&["a", "b", "c"]));
        assert_eq!(ordered, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_covers_is_false_for_empty_page() {
        let selection = Selection::default();
        assert!(!selection.covers(&[]));
    }
}
