//! Lazy Cartesian product over per-product candidate sets.
//!
//! Clusters are produced in odometer order: the last set varies fastest.
//! Each cluster carries its ordinal within that order, so a range of
//! ordinals can be handed to a worker without materializing the rest.

/// One concrete choice per set; `members[i]` was taken from set `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<T> {
    pub ordinal: u128,
    pub members: Vec<T>,
}

/// Restartable enumerator over every cluster of the given sets.
#[derive(Debug, Clone, Copy)]
pub struct ClusterEnumerator<'a, T> {
    sets: &'a [Vec<T>],
}

impl<'a, T: Clone> ClusterEnumerator<'a, T> {
    pub fn new(sets: &'a [Vec<T>]) -> Self {
        Self { sets }
    }

    /// Number of clusters: the product of set sizes, saturating at `u128::MAX`.
    ///
    /// Zero sets yield exactly one (empty) cluster; any empty set yields none.
    pub fn cardinality(&self) -> u128 {
        cardinality_of(self.sets.iter().map(Vec::len))
    }

    /// Iterates all clusters from the beginning.
    pub fn iter(&self) -> Clusters<'a, T> {
        self.range(0, self.cardinality())
    }

    /// Iterates clusters with ordinals in `start..end`.
    pub fn range(&self, start: u128, end: u128) -> Clusters<'a, T> {
        let end = end.min(self.cardinality());
        let start = start.min(end);
        let digits = if start < end {
            digits_for(self.sets, start)
        } else {
            Vec::new()
        };

        Clusters {
            sets: self.sets,
            digits,
            next: start,
            end,
        }
    }

    /// The cluster at a given ordinal, if in range.
    pub fn cluster_at(&self, ordinal: u128) -> Option<Cluster<T>> {
        self.range(ordinal, ordinal.saturating_add(1)).next()
    }
}

/// Product of set sizes, saturating at `u128::MAX`.
pub fn cardinality_of(sizes: impl IntoIterator<Item = usize>) -> u128 {
    sizes
        .into_iter()
        .try_fold(1u128, |acc, size| acc.checked_mul(size as u128))
        .unwrap_or(u128::MAX)
}

fn digits_for<T>(sets: &[Vec<T>], mut ordinal: u128) -> Vec<usize> {
    let mut digits = vec![0; sets.len()];
    for (digit, set) in digits.iter_mut().zip(sets).rev() {
        let radix = set.len() as u128;
        *digit = (ordinal % radix) as usize;
        ordinal /= radix;
    }
    digits
}

/// Iterator returned by [`ClusterEnumerator`].
#[derive(Debug, Clone)]
pub struct Clusters<'a, T> {
    sets: &'a [Vec<T>],
    digits: Vec<usize>,
    next: u128,
    end: u128,
}

impl<T: Clone> Iterator for Clusters<'_, T> {
    type Item = Cluster<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }

        let members = self
            .digits
            .iter()
            .zip(self.sets)
            .map(|(&digit, set)| set[digit].clone())
            .collect();
        let cluster = Cluster {
            ordinal: self.next,
            members,
        };

        for (digit, set) in self.digits.iter_mut().zip(self.sets).rev() {
            *digit += 1;
            if *digit < set.len() {
                break;
            }
            *digit = 0;
        }
        self.next += 1;

        Some(cluster)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
