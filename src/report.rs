//! Console summary of an energy history.

use std::fmt;

/// Number of values shown at each end of the history.
pub const EDGE_LEN: usize = 10;

const INTERPRETATION: [&str; 3] = ["- Energy remains approximately constant.",
                                   "- Wave shape propagates without collapse.",
                                   "This confirms informational wave propagation."];

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReport {
    /// First `EDGE_LEN` values, or the whole history if shorter.
    pub head: Vec<f64>,
    /// Last `EDGE_LEN` values, or the whole history if shorter.
    pub tail: Vec<f64>,
    pub initial_energy: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Largest `|e - e₀| / |e₀|` with `e₀` the first recorded value.
    pub max_relative_drift: Option<f64>,
}

impl EnergyReport {
    pub fn from_history(history: &[f64], initial_energy: f64) -> Self {
        let head = history[..history.len().min(EDGE_LEN)].to_vec();
        let tail = history[history.len().saturating_sub(EDGE_LEN)..].to_vec();

        let min = history.iter().cloned().reduce(f64::min);
        let max = history.iter().cloned().reduce(f64::max);
        let max_relative_drift = history.first().map(|&e0| {
            history.iter()
                .map(|&e| (e - e0).abs() / e0.abs())
                .fold(0., f64::max)
        });

        EnergyReport {
            head,
            tail,
            initial_energy,
            min,
            max,
            max_relative_drift,
        }
    }
}

impl fmt::Display for EnergyReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== Verification: informational wave propagation ===")?;
        writeln!(f)?;
        writeln!(f, "First {} energy values: {:?}", EDGE_LEN, self.head)?;
        writeln!(f, "Last {} energy values: {:?}", EDGE_LEN, self.tail)?;
        writeln!(f)?;
        writeln!(f, "Interpretation:")?;
        for line in INTERPRETATION.iter() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_history_is_shown_whole() {
        let report = EnergyReport::from_history(&[1., 2., 3.], 1.);
        assert_eq!(report.head, vec![1., 2., 3.]);
        assert_eq!(report.tail, vec![1., 2., 3.]);
        assert_eq!(report.min, Some(1.));
        assert_eq!(report.max, Some(3.));
        assert_eq!(report.max_relative_drift, Some(2.));
    }

    #[test]
    fn long_history_is_cut_at_both_ends() {
        let history: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let report = EnergyReport::from_history(&history, 0.);
        assert_eq!(report.head, history[..10].to_vec());
        assert_eq!(report.tail, history[15..].to_vec());
    }

    #[test]
    fn empty_history() {
        let report = EnergyReport::from_history(&[], 4.);
        assert!(report.head.is_empty());
        assert!(report.tail.is_empty());
        assert_eq!(report.min, None);
        assert_eq!(report.max_relative_drift, None);
        assert_eq!(report.initial_energy, 4.);
    }

    #[test]
    fn display_lists_both_ends_and_interpretation() {
        let text = EnergyReport::from_history(&[0.5, 0.25], 1.).to_string();
        assert!(text.contains("First 10 energy values: [0.5, 0.25]"));
        assert!(text.contains("Last 10 energy values: [0.5, 0.25]"));
        assert!(text.contains("Interpretation:"));
        assert!(text.contains("- Energy remains approximately constant."));
    }
}
