use std::collections::BTreeMap;

/// Dense encoding of class labels into `0..K`, in sorted label order
#[derive(Debug, Clone)]
pub struct ClassIndex<L> {
    labels: Vec<L>,
    codes: Vec<usize>,
}

impl<L> ClassIndex<L>
where
    L: Ord + Clone,
{
    /// Encode each label as the rank of its class among the distinct labels
    pub fn encode(labels: &[L]) -> Self {
        let mut index: BTreeMap<L, usize> = labels.iter().map(|l| (l.clone(), 0)).collect();
        index.values_mut().enumerate().for_each(|(code, v)| *v = code);

        let codes = labels.iter().map(|l| index[l]).collect();

        Self {
            labels: index.into_keys().collect(),
            codes,
        }
    }

    /// The distinct labels, position `i` holding the label of class `i`
    #[inline(always)]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// The class of each sample
    #[inline(always)]
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// Number of distinct classes
    #[inline(always)]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Number of samples in each class
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes()];
        for &c in &self.codes {
            counts[c] += 1;
        }
        counts
    }
}
