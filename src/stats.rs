//! Pixel statistics shared by the estimators
//!
//! Provides a borrowed grayscale plane with rectangular region means,
//! a 256-bin brightness histogram with percentile lookup, and a running
//! mean/variance accumulator. Empty inputs produce `0.0` rather than NaN so
//! degenerate images never poison downstream ratios.

use image::GrayImage;

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// Streaming mean and population variance (Welford)
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = RunningStats::new();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

/// Row-major view over an 8-bit grayscale buffer
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> Plane<'a> {
    pub fn new(image: &'a GrayImage) -> Self {
        Self {
            data: image.as_raw(),
            width: image.width() as usize,
            height: image.height() as usize,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn full(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x] as f64
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Mean brightness of a region, `0.0` when the region is empty
    pub fn region_mean(&self, region: Region) -> f64 {
        if region.is_empty() {
            return 0.0;
        }
        let sum: u64 = (region.y0..region.y1)
            .map(|y| {
                self.row(y)[region.x0..region.x1]
                    .iter()
                    .map(|&v| v as u64)
                    .sum::<u64>()
            })
            .sum();
        sum as f64 / region.area() as f64
    }

    pub fn mean(&self) -> f64 {
        self.region_mean(self.full())
    }

    /// Population standard deviation over the whole plane
    pub fn std_dev(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).collect::<RunningStats>().std_dev()
    }

    pub fn histogram(&self) -> Histogram {
        Histogram::from_values(self.data)
    }
}

/// 256-bin brightness histogram
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    pub fn from_values(values: &[u8]) -> Self {
        let mut bins = [0u64; 256];
        for &v in values {
            bins[v as usize] += 1;
        }
        Self {
            bins,
            total: values.len() as u64,
        }
    }

    pub fn bins(&self) -> &[u64; 256] {
        &self.bins
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Cumulative distribution normalized to `[0, 1]`; all zeros when empty
    pub fn cdf(&self) -> [f64; 256] {
        let mut cdf = [0.0f64; 256];
        if self.total == 0 {
            return cdf;
        }
        let mut running = 0u64;
        for (level, &count) in self.bins.iter().enumerate() {
            running += count;
            cdf[level] = running as f64 / self.total as f64;
        }
        cdf
    }

    /// Value at the given rank of the sorted samples
    fn value_at_rank(&self, rank: u64) -> f64 {
        let mut seen = 0u64;
        for (level, &count) in self.bins.iter().enumerate() {
            seen += count;
            if seen > rank {
                return level as f64;
            }
        }
        255.0
    }

    /// Percentile with linear interpolation between closest ranks
    pub fn percentile(&self, percent: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let position = percent.clamp(0.0, 100.0) / 100.0 * (self.total - 1) as f64;
        let lower = position.floor() as u64;
        let upper = position.ceil() as u64;
        let low_value = self.value_at_rank(lower);
        if upper == lower {
            return low_value;
        }
        let high_value = self.value_at_rank(upper);
        low_value + (high_value - low_value) * (position - lower as f64)
    }

    /// Fraction of samples strictly brighter than `threshold`
    pub fn fraction_above(&self, threshold: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let above: u64 = self
            .bins
            .iter()
            .enumerate()
            .filter(|(level, _)| *level as f64 > threshold)
            .map(|(_, &count)| count)
            .sum();
        above as f64 / self.total as f64
    }
}

/// Ratio guarded against a zero denominator
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}
