use serde::Serialize;

/// Per-tier hit and access counts: cache levels in order, then RAM, then Disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub hits: Vec<u64>,
    pub accesses: Vec<u64>,
}

impl Counters {
    pub fn new(n_caches: usize) -> Self {
        Counters {
            hits: vec![0; n_caches + 2],
            accesses: vec![0; n_caches + 2],
        }
    }

    pub fn n_caches(&self) -> usize {
        self.hits.len() - 2
    }

    pub fn ram_idx(&self) -> usize {
        self.n_caches()
    }

    pub fn disk_idx(&self) -> usize {
        self.n_caches() + 1
    }

    /// Charges an access to every tier up to and including `level`, which
    /// served the request.
    pub fn record(&mut self, level: usize) {
        for accesses in &mut self.accesses[..=level] {
            *accesses += 1;
        }
        self.hits[level] += 1;
    }

    pub fn clear(&mut self) {
        self.hits.iter_mut().for_each(|h| *h = 0);
        self.accesses.iter_mut().for_each(|a| *a = 0);
    }

    /// Fraction in `[0, 1]`; a tier never reached counts as zero.
    pub fn hit_ratio(&self, level: usize) -> f64 {
        ratio(self.hits[level], self.accesses[level])
    }

    pub fn miss_ratio(&self, level: usize) -> f64 {
        let accesses = self.accesses[level];
        ratio(accesses - self.hits[level], accesses)
    }
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

pub fn level_name(level: usize, n_caches: usize) -> String {
    if level < n_caches {
        format!("L{}", level + 1)
    } else if level == n_caches {
        "RAM".to_owned()
    } else {
        "Disk".to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelStats {
    pub name: String,
    pub hits: u64,
    pub accesses: u64,
    pub hit_rate: f64,
}

/// Aggregate metrics of one run. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSnapshot {
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub amat: f64,
    pub levels: Vec<LevelStats>,
}

impl PerformanceSnapshot {
    /// `hit_times` holds one entry per cache level, outermost first.
    pub fn compute(
        counters: &Counters,
        hit_times: &[u32],
        ram_access_time: u32,
        disk_access_time: u32,
    ) -> Self {
        let n = counters.n_caches();
        debug_assert_eq!(hit_times.len(), n);

        let total = counters.accesses[0];
        let served: u64 = counters.hits[..=counters.ram_idx()].iter().sum();
        let (hit_rate, miss_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            let hit_rate = served as f64 / total as f64 * 100.0;
            (hit_rate, 100.0 - hit_rate)
        };

        let levels = (0..counters.hits.len())
            .map(|level| LevelStats {
                name: level_name(level, n),
                hits: counters.hits[level],
                accesses: counters.accesses[level],
                hit_rate: counters.hit_ratio(level) * 100.0,
            })
            .collect();

        PerformanceSnapshot {
            hit_rate,
            miss_rate,
            amat: amat(counters, hit_times, ram_access_time, disk_access_time),
            levels,
        }
    }
}

/// Folds from the innermost cache outward, each level's miss penalty being
/// the AMAT of the level below it (RAM time for the last one), then blends in
/// what the last level's misses cost at RAM and Disk.
pub fn amat(
    counters: &Counters,
    hit_times: &[u32],
    ram_access_time: u32,
    disk_access_time: u32,
) -> f64 {
    let n = counters.n_caches();
    if n == 0 {
        return 0.0;
    }
    let ram_time = ram_access_time as f64;
    let disk_time = disk_access_time as f64;

    let mut penalty = ram_time;
    let mut tier = 0.0;
    for level in (0..n).rev() {
        tier = hit_times[level] as f64 + counters.miss_ratio(level) * penalty;
        penalty = tier;
    }

    let last_miss = counters.miss_ratio(n - 1);
    let ram_hit = counters.hit_ratio(counters.ram_idx());
    tier + last_miss * (ram_hit * ram_time + (1.0 - ram_hit) * disk_time)
}
