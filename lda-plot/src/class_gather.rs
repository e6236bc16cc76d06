use std::collections::BTreeMap;

use crate::Series;

/// Collects plot points grouped by class
#[derive(Debug, Clone, Default)]
pub struct ClassGather {
    classes: BTreeMap<String, Series>,
}

impl ClassGather {
    #[inline(always)]
    pub fn push(&mut self, class: &str, x: f64, y: f64) {
        self.classes.entry(class.to_string()).or_default().push((x, y))
    }

    #[inline(always)]
    pub fn n_points(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    /// The gathered series, sorted by class name
    pub fn into_series(self) -> Vec<(String, Series)> {
        self.classes.into_iter().collect()
    }
}
