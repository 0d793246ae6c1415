//! Aggregate run diagnostics.

use std::fmt;

use geo_match::{KeyCollision, MatchStats};
use serde::Serialize;

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Triangles in the merged mesh.
    pub triangle_count: usize,
    /// Clusters found.
    pub cluster_count: usize,
    /// Single-triangle clusters.
    pub singleton_clusters: usize,
    /// Clusters that produced no mesh.
    pub skipped_clusters: Vec<usize>,
    /// No two triangles were adjacent.
    pub no_adjacency: bool,
    /// Whether a geographic dataset was available.
    pub attributes_available: bool,
    /// Join counters.
    pub matches: MatchStats,
    /// Percentage of buildings matched, `0.0` when there were none.
    pub match_rate: f64,
    /// Dataset records that shared a centroid key.
    pub collisions: usize,
}

impl Diagnostics {
    /// Fill in join results.
    pub(crate) fn set_matches(&mut self, stats: MatchStats, collisions: &[KeyCollision]) {
        self.matches = stats;
        self.match_rate = stats.match_rate();
        self.collisions = collisions.len();
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "triangles:    {}", self.triangle_count)?;
        writeln!(
            f,
            "clusters:     {} ({} singletons, {} skipped)",
            self.cluster_count,
            self.singleton_clusters,
            self.skipped_clusters.len()
        )?;
        if self.no_adjacency {
            writeln!(f, "warning:      no adjacent triangles; epsilon may be too small")?;
        }
        if self.attributes_available {
            writeln!(f, "matched:      {}", self.matches)?;
            write!(f, "collisions:   {}", self.collisions)
        } else {
            write!(f, "matched:      attributes unavailable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_rate() {
        let mut stats = MatchStats::default();
        stats.record(true);
        stats.record(false);
        let mut d = Diagnostics {
            triangle_count: 10,
            cluster_count: 2,
            attributes_available: true,
            ..Default::default()
        };
        d.set_matches(stats, &[]);

        let text = d.to_string();
        assert!(text.contains("1/2 matched (50.0%)"));
        assert!(text.contains("collisions:   0"));
        assert!((d.match_rate - 50.0).abs() < 1e-12);
    }

    #[test]
    fn json_includes_rate() {
        let mut stats = MatchStats::default();
        stats.record(true);
        stats.record(true);
        stats.record(false);
        stats.record(false);
        let mut d = Diagnostics::default();
        d.set_matches(stats, &[]);

        let json = serde_json::to_value(&d).expect("serializable");
        assert_eq!(json["match_rate"], 50.0);
        assert_eq!(json["matches"]["matched"], 2);
    }

    #[test]
    fn display_without_attributes() {
        let d = Diagnostics {
            no_adjacency: true,
            ..Default::default()
        };
        let text = d.to_string();
        assert!(text.contains("attributes unavailable"));
        assert!(text.contains("no adjacent triangles"));
    }
}
