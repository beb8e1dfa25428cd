//! Deposit size buckets for the distribution panel.

/// Ordered deposit-size bins. Labels carry a lexicographic prefix so that
/// sorting by label yields bucket order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DepositSizeBucket {
    /// Deposits below $100.
    Below100,
    /// Deposits from $100 up to $1K.
    From100To1K,
    /// Deposits from $1K up to $10K.
    From1KTo10K,
    /// Deposits from $10K up to $100K.
    From10KTo100K,
    /// Deposits of $100K and above.
    Above100K,
}

impl DepositSizeBucket {
    /// All buckets in ascending amount order.
    pub const ALL: [Self; 5] =
        [Self::Below100, Self::From100To1K, Self::From1KTo10K, Self::From10KTo100K, Self::Above100K];

    /// Display label, sortable into bucket order.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Below100 => "a/ below $100",
            Self::From100To1K => "b/ $100 - $1K",
            Self::From1KTo10K => "c/ $1K - $10K",
            Self::From10KTo100K => "d/ $10K - $100K",
            Self::Above100K => "e/ $100K+",
        }
    }

    /// Exclusive upper bound of the bucket in USD, or `None` for the last one.
    pub const fn upper_bound(&self) -> Option<f64> {
        match self {
            Self::Below100 => Some(100.0),
            Self::From100To1K => Some(1_000.0),
            Self::From1KTo10K => Some(10_000.0),
            Self::From10KTo100K => Some(100_000.0),
            Self::Above100K => None,
        }
    }

    /// Classify a deposit amount into its bucket.
    pub fn classify(amount: f64) -> Self {
        for bucket in Self::ALL {
            match bucket.upper_bound() {
                Some(limit) if amount < limit => return bucket,
                Some(_) => {}
                None => return bucket,
            }
        }
        Self::Above100K
    }
}

#[cfg(test)]
mod tests {
    use super::DepositSizeBucket;

    #[test]
    fn labels_sort_in_bucket_order() {
        let labels: Vec<_> = DepositSizeBucket::ALL.iter().map(|b| b.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(DepositSizeBucket::classify(0.0), DepositSizeBucket::Below100);
        assert_eq!(DepositSizeBucket::classify(99.99), DepositSizeBucket::Below100);
        assert_eq!(DepositSizeBucket::classify(100.0), DepositSizeBucket::From100To1K);
        assert_eq!(DepositSizeBucket::classify(5_000.0), DepositSizeBucket::From1KTo10K);
        assert_eq!(DepositSizeBucket::classify(99_999.0), DepositSizeBucket::From10KTo100K);
        assert_eq!(DepositSizeBucket::classify(100_000.0), DepositSizeBucket::Above100K);
        assert_eq!(DepositSizeBucket::classify(1e9), DepositSizeBucket::Above100K);
    }

    #[test]
    fn buckets_partition_the_amount_line() {
        // every amount lands in exactly one bucket
        for amount in [0.0, 50.0, 100.0, 999.0, 1_000.0, 42_000.0, 100_000.0, 2e6] {
            let hits = DepositSizeBucket::ALL
                .iter()
                .filter(|b| DepositSizeBucket::classify(amount) == **b)
                .count();
            assert_eq!(hits, 1);
        }
    }
}
