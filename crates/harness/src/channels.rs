//! Channel-wise value statistics
//!
//! Accelerator outputs are interleaved by channel: value `i` belongs to
//! channel `i % channel_count`.

/// Descriptive statistics for one output channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    /// Channel index
    pub channel: usize,
    /// Number of values attributed to the channel
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: i64,
    /// Maximum value
    pub max: i64,
    /// Number of nonzero values
    pub non_zero: usize,
}

impl ChannelStats {
    /// Fraction of nonzero values in the channel
    pub fn non_zero_fraction(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.non_zero as f64 / self.count as f64
        }
    }
}

/// Group interleaved values by channel and compute per-channel statistics.
/// Channels that receive no values are omitted.
pub fn channel_distribution(values: &[i64], channel_count: usize) -> Vec<ChannelStats> {
    if channel_count == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); channel_count];
    for (i, &value) in values.iter().enumerate() {
        buckets[i % channel_count].push(value);
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, data)| !data.is_empty())
        .map(|(channel, data)| {
            let count = data.len();
            let mean = data.iter().map(|&v| v as f64).sum::<f64>() / count as f64;
            let variance = data
                .iter()
                .map(|&v| {
                    let d = v as f64 - mean;
                    d * d
                })
                .sum::<f64>()
                / count as f64;
            ChannelStats {
                channel,
                count,
                mean,
                std_dev: variance.sqrt(),
                min: data.iter().copied().min().unwrap_or(0),
                max: data.iter().copied().max().unwrap_or(0),
                non_zero: data.iter().filter(|&&v| v != 0).count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_grouping() {
        // 32 values over 16 channels: channel 0 gets indices 0 and 16
        let values: Vec<i64> = (0..32).collect();
        let stats = channel_distribution(&values, 16);

        assert_eq!(stats.len(), 16);
        let channel0 = &stats[0];
        assert_eq!(channel0.channel, 0);
        assert_eq!(channel0.count, 2);
        assert_eq!(channel0.min, 0);
        assert_eq!(channel0.max, 16);
        assert_eq!(channel0.mean, 8.0);
    }

    #[test]
    fn test_statistics() {
        let values = [2i64, 0, 4, 0, 6, 0];
        let stats = channel_distribution(&values, 2);

        assert_eq!(stats.len(), 2);
        // Channel 0: [2, 4, 6]
        assert_eq!(stats[0].mean, 4.0);
        assert!((stats[0].std_dev - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats[0].non_zero, 3);
        assert_eq!(stats[0].non_zero_fraction(), 1.0);
        // Channel 1: [0, 0, 0]
        assert_eq!(stats[1].mean, 0.0);
        assert_eq!(stats[1].non_zero, 0);
    }

    #[test]
    fn test_short_input_omits_empty_channels() {
        let values = [5i64, 7];
        let stats = channel_distribution(&values, 16);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].channel, 0);
        assert_eq!(stats[1].channel, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(channel_distribution(&[], 16).is_empty());
        assert!(channel_distribution(&[1, 2], 0).is_empty());
    }
}
