/// Progress of a running batch dataset generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchProgress {
    /// Index of the record just emitted
    pub step: u64,
    pub total_steps: u64,
    pub sim_time_s: f64,
    pub fraction_complete: f64,
}

impl BatchProgress {
    pub fn new(step: u64, total_steps: u64, time_step: f64) -> Self {
        let fraction_complete = if total_steps == 0 {
            1.0
        } else {
            step as f64 / total_steps as f64
        };
        Self {
            step,
            total_steps,
            sim_time_s: step as f64 * time_step,
            fraction_complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_time() {
        let p = BatchProgress::new(5, 10, 0.1);
        assert_eq!(p.fraction_complete, 0.5);
        assert!((p.sim_time_s - 0.5).abs() < 1e-12);
        assert!(!p.is_complete());
    }

    #[test]
    fn zero_length_run_is_complete() {
        let p = BatchProgress::new(0, 0, 0.1);
        assert_eq!(p.fraction_complete, 1.0);
        assert!(p.is_complete());
    }
}
