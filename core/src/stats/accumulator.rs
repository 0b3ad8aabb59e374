//! Statistics Accumulator

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::OnceLock;

/// Return the global statistics accumulator.
pub fn stats_accumulator() -> &'static Mutex<StatsAccumulator> {
    static DATA: OnceLock<Mutex<StatsAccumulator>> = OnceLock::new();
    DATA.get_or_init(|| Mutex::new(StatsAccumulator::new()))
}

/// Floating point distribution statistic.
#[derive(Default, Clone)]
pub struct StatsDistribution {
    /// Sum of all values.
    sum: f64,

    /// Count of all values.
    count: u64,

    /// Minimum value.
    min: Option<f64>,

    /// Maximum value.
    max: Option<f64>,
}

impl StatsDistribution {
    /// Accumulate stats from another distribution.
    ///
    /// * `distrib` - The other distribution.
    pub fn accumulate(&mut self, distrib: Self) {
        self.sum += distrib.sum;
        self.count += distrib.count;
        self.min = match (self.min, distrib.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, distrib.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Report a sample value.
    ///
    /// * `val`  - Sample value.
    pub fn report(&mut self, val: f64) {
        self.sum += val;
        self.count += 1;
        self.min = Some(self.min.map_or(val, |m| m.min(val)));
        self.max = Some(self.max.map_or(val, |m| m.max(val)));
    }

    /// Returns the number of reported values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the average of reported values, if any.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Clear stats.
    pub fn clear(&mut self) {
        self.sum = 0.0;
        self.count = 0;
        self.min = None;
        self.max = None;
    }
}

/// Aggregate different types of statistics.
#[derive(Default)]
pub struct StatsAccumulator {
    /// Counters.
    counters: HashMap<String, i64>,

    /// Float distribution.
    float_distribution: HashMap<String, StatsDistribution>,

    /// Percentages.
    percentages: HashMap<String, (i64, i64)>,
}

impl StatsAccumulator {
    /// Create a new instance of `StatsAccumulator`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates a counter value.
    ///
    /// * `name` - Statistic name.
    /// * `val`  - Counter value.
    pub fn report_counter(&mut self, name: &str, val: i64) {
        *self.counters.entry(name.to_string()).or_insert(0) += val;
    }

    /// Accumulates floating point distribution samples.
    ///
    /// * `name`    - Statistic name.
    /// * `distrib` - Distribution.
    pub fn report_float_distribution(&mut self, name: &str, distrib: StatsDistribution) {
        self.float_distribution
            .entry(name.to_string())
            .or_default()
            .accumulate(distrib);
    }

    /// Accumulates a percentage value.
    ///
    /// * `name`  - Statistic name.
    /// * `num`   - Numerator (actual count).
    /// * `denom` - Denominator (total count).
    pub fn report_percentage(&mut self, name: &str, num: i64, denom: i64) {
        let v = self.percentages.entry(name.to_string()).or_insert((0, 0));
        v.0 += num;
        v.1 += denom;
    }

    /// Returns the accumulated value of a counter.
    ///
    /// * `name` - Statistic name.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Returns the accumulated numerator and denominator of a percentage.
    ///
    /// * `name` - Statistic name.
    pub fn percentage(&self, name: &str) -> (i64, i64) {
        self.percentages.get(name).copied().unwrap_or((0, 0))
    }

    /// Returns the accumulated float distribution.
    ///
    /// * `name` - Statistic name.
    pub fn float_distribution(&self, name: &str) -> Option<&StatsDistribution> {
        self.float_distribution.get(name)
    }

    /// Formats the report lines grouped by category, sorted by name.
    pub fn report_lines(&self) -> Vec<String> {
        let mut to_print: HashMap<String, Vec<String>> = HashMap::new();

        for (k, v) in self.counters.iter() {
            if *v == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(k);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}               {v:12}"));
        }

        for (k, v) in self.float_distribution.iter() {
            if v.count == 0 {
                continue;
            }
            let mn = v.min.unwrap_or(f64::MAX);
            let mx = v.max.unwrap_or(f64::MIN);
            let avg = v.sum / v.count as f64;
            let (category, title) = get_category_and_title(k);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}                      {avg:.3} avg [range {mn} - {mx}]"));
        }

        for (k, &(num, denom)) in self.percentages.iter() {
            if denom == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(k);
            to_print.entry(category).or_default().push(format!(
                "{title:<42}{num:12} / {denom:12} ({:.2}%)",
                (100.0 * num as f64) / denom as f64,
            ));
        }

        let mut categories: Vec<_> = to_print.into_iter().collect();
        categories.sort_by(|a, b| a.0.cmp(&b.0));

        let mut lines = vec![];
        for (category, mut items) in categories {
            items.sort();
            lines.push(format!("  {category}"));
            lines.extend(items.into_iter().map(|item| format!("    {item}")));
        }
        lines
    }

    /// Prints the report.
    pub fn print(&self) {
        info!("Statistics:");
        for line in self.report_lines() {
            info!("{line}");
        }
    }

    /// Clear the accumulated statistics.
    pub fn clear(&mut self) {
        self.counters.clear();
        self.float_distribution.clear();
        self.percentages.clear();
    }
}

/// Splits a statistic name at the first `/` as the separator and returns category and title. If there is no `/`, then
/// category is the empty string.
///
/// * `s` - The statistic name to split.
fn get_category_and_title(s: &str) -> (String, String) {
    if let Some(slash) = s.find('/') {
        let category = &s[0..slash];
        let title = &s[slash + 1..];
        (category.to_string(), title.to_string())
    } else {
        ("".to_string(), s.to_string())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
