use crate::{IterationReport, KMeansState, Primitive, RunConfig};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::io::{self, Write};

const RUN_SEPARATOR: &str = "===========================";
const ITERATION_SEPARATOR: &str = "-----------------------------------";

/// Writer of the append-only run log: a timestamped header, one block per iteration with its timing
/// and a snapshot of every cluster, and a final summary.
///
/// The log does not open or own files itself; pass any [`Write`] (e.g. a file opened in append mode).
/// Every block is flushed once written.
pub struct RunLog<W: Write> {
    out: W
}
impl<W: Write> RunLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header<Tz>(&mut self, started_at: &DateTime<Tz>, config: &RunConfig) -> io::Result<()>
                where Tz: TimeZone, Tz::Offset: Display {
        writeln!(self.out, "{}", RUN_SEPARATOR)?;
        writeln!(self.out, "Run started: {}", started_at.format("%a %b %e %H:%M:%S %Y"))?;
        writeln!(self.out, "Configuration: points={}, k={}, max_iterations={}, threads={}, strategy={}",
            config.num_points, config.k, config.max_iterations, config.num_threads, config.strategy)?;
        self.out.flush()
    }

    pub fn iteration<T: Primitive>(&mut self, report: &IterationReport<'_, T>) -> io::Result<()> {
        writeln!(self.out, "Iteration {}:", report.iteration)?;
        writeln!(self.out, "   Start: {:.4} s, End: {:.4} s, Duration: {:.4} s",
            report.started.as_secs_f64(), report.finished.as_secs_f64(), report.duration().as_secs_f64())?;
        for (j, (c, count)) in report.centroids.iter().zip(report.counts.iter()).enumerate() {
            writeln!(self.out, "   Cluster {}: centroid ({:.4}, {:.4}), points {}", j, c.x, c.y, count)?;
        }
        writeln!(self.out, "{}", ITERATION_SEPARATOR)?;
        self.out.flush()
    }

    pub fn summary<T: Primitive>(&mut self, state: &KMeansState<T>) -> io::Result<()> {
        writeln!(self.out, "Final summary:")?;
        writeln!(self.out, "k-means finished after {} iterations ({}).", state.iterations, state.status)?;
        writeln!(self.out, "Total time: {:.4} s", state.elapsed.as_secs_f64())?;
        for (j, (c, count)) in state.centroids.iter().zip(state.centroid_frequency.iter()).enumerate() {
            writeln!(self.out, "   Cluster {}: centroid ({:.4}, {:.4}), points {}", j, c.x, c.y, count)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Centroid, RunStatus};
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn record_layout() {
        let mut log = RunLog::new(Vec::new());
        let config = RunConfig::default().with_num_points(6).with_k(2).with_max_iterations(5).with_num_threads(1);
        let started_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        log.header(&started_at, &config).unwrap();

        let centroids = [Centroid::new(1.0 / 3.0, 1.0 / 3.0), Centroid::new(10.0, 10.5)];
        log.iteration(&IterationReport {
            iteration: 1,
            started: Duration::from_millis(250),
            finished: Duration::from_millis(1500),
            changed: true,
            centroids: &centroids,
            counts: &[3, 3]
        }).unwrap();
        log.summary(&KMeansState {
            k: 2,
            centroids: centroids.to_vec(),
            centroid_frequency: vec![3, 3],
            iterations: 2,
            status: RunStatus::Converged,
            elapsed: Duration::from_secs(2)
        }).unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], RUN_SEPARATOR);
        assert_eq!(lines[1], "Run started: Sat Mar  9 14:05:07 2024");
        assert_eq!(lines[2], "Configuration: points=6, k=2, max_iterations=5, threads=1, strategy=local");
        assert_eq!(lines[3], "Iteration 1:");
        assert_eq!(lines[4], "   Start: 0.2500 s, End: 1.5000 s, Duration: 1.2500 s");
        assert_eq!(lines[5], "   Cluster 0: centroid (0.3333, 0.3333), points 3");
        assert_eq!(lines[6], "   Cluster 1: centroid (10.0000, 10.5000), points 3");
        assert_eq!(lines[7], ITERATION_SEPARATOR);
        assert_eq!(lines[8], "Final summary:");
        assert_eq!(lines[9], "k-means finished after 2 iterations (converged).");
        assert_eq!(lines[10], "Total time: 2.0000 s");
        assert_eq!(lines.len(), 14);
        assert!(text.ends_with("\n\n"));
    }
}
