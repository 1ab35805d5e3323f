use indexmap::IndexMap;
use serde::Serialize;

/// Index-aligned id/name pairs: `ids[i]` is the row named `names[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    ids: Vec<u32>,
    names: Vec<String>,
}

/// Per-category item catalogs, iterated in category-catalog order.
pub type ItemLists = IndexMap<u32, Catalog>;

impl Catalog {
    /// Keep scan order.
    pub fn unsorted(ids: Vec<u32>, names: Vec<String>) -> Self {
        debug_assert_eq!(ids.len(), names.len());
        Catalog { ids, names }
    }

    /// Order by name (ordinal), carrying ids along. Equal names keep scan order.
    pub fn sorted(ids: Vec<u32>, names: Vec<String>) -> Self {
        debug_assert_eq!(ids.len(), names.len());
        let mut order: Vec<usize> = (0..names.len()).collect();
        order.sort_by(|&a, &b| names[a].cmp(&names[b]));

        let ids = order.iter().map(|&i| ids[i]).collect();
        let mut names: Vec<Option<String>> = names.into_iter().map(Some).collect();
        let names = order
            .iter()
            .map(|&i| names[i].take().unwrap_or_default())
            .collect();
        Catalog { ids, names }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.ids
            .iter()
            .copied()
            .zip(self.names.iter().map(String::as_str))
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.ids
            .iter()
            .position(|&candidate| candidate == id)
            .map(|index| self.names[index].as_str())
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| self.ids[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn sorted_permutes_ids_with_names() {
        let catalog = Catalog::sorted(vec![1, 2, 3], names(&["Zed", "Ann", "Mid"]));
        assert_eq!(catalog.ids(), &[2, 3, 1]);
        assert_eq!(catalog.names(), &["Ann", "Mid", "Zed"]);
        assert_eq!(catalog.name_of(1), Some("Zed"));
        assert_eq!(catalog.id_of("Mid"), Some(3));
    }

    #[test]
    fn sort_is_ordinal_and_stable() {
        let catalog = Catalog::sorted(
            vec![10, 11, 12, 13],
            names(&["beta", "Beta", "beta", "Alpha"]),
        );
        // uppercase sorts before lowercase; the two "beta" rows keep scan order
        assert_eq!(catalog.ids(), &[13, 11, 10, 12]);
    }

    #[test]
    fn unsorted_keeps_scan_order() {
        let catalog = Catalog::unsorted(vec![5, 4], names(&["b", "a"]));
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec![(5, "b"), (4, "a")]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::sorted(Vec::new(), Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.name_of(1), None);
    }
}
