use std::fmt;

use super::{Algorithm, PathInfo};

/// Winner of one ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Best {
    pub algorithm: Algorithm,
    pub value: u64,
}

impl fmt::Display for Best {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.algorithm, self.value)
    }
}

/// Results of every algorithm from the same start, kept in [`Algorithm::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    results: Vec<(Algorithm, PathInfo)>,
}

impl Comparison {
    pub fn new(mut results: Vec<(Algorithm, PathInfo)>) -> Self {
        results.sort_by_key(|(algorithm, _)| *algorithm);
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&PathInfo> {
        self.results
            .iter()
            .find(|(a, _)| *a == algorithm)
            .map(|(_, info)| info)
    }

    /// Lookup by display name, `"A*"` and `"astar"` both work.
    pub fn by_name(&self, name: &str) -> Option<&PathInfo> {
        name.parse().ok().and_then(|algorithm| self.get(algorithm))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &PathInfo)> {
        self.results.iter().map(|(a, info)| (*a, info))
    }

    /// Minimum of `key`; the first algorithm in order wins a tie.
    fn best_by(&self, key: impl Fn(&PathInfo) -> u64) -> Option<Best> {
        let mut best: Option<Best> = None;
        for (algorithm, info) in self.iter() {
            let value = key(info);
            if best.map_or(true, |b| value < b.value) {
                best = Some(Best { algorithm, value });
            }
        }
        best
    }

    pub fn best_cost(&self) -> Option<Best> {
        self.best_by(|info| info.total_cost)
    }

    pub fn best_length(&self) -> Option<Best> {
        self.best_by(|info| info.length as u64)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>8} {:>8} {:>10}",
            "Algorithm", "Steps", "Cost", "Explored"
        )?;
        for (algorithm, info) in self.iter() {
            if info.is_found() {
                writeln!(
                    f,
                    "{:<10} {:>8} {:>8} {:>10}",
                    algorithm.name(),
                    info.length,
                    info.total_cost,
                    info.explored
                )?;
            } else {
                writeln!(
                    f,
                    "{:<10} {:>8} {:>8} {:>10}",
                    algorithm.name(),
                    "-",
                    "-",
                    info.explored
                )?;
            }
        }

        if let Some(best) = self.best_cost() {
            writeln!(f, "Lowest cost: {}", best)?;
        }
        if let Some(best) = self.best_length() {
            write!(f, "Shortest path: {}", best)?;
        }
        Ok(())
    }
}
