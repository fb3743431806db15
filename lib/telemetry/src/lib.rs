#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

use std::convert::Infallible;

use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, TextEncoder};

lazy_static! {
    static ref SUCCESS: IntCounterVec = register_int_counter_vec!(
        "query_success_total",
        "Queries answered, including those rejected as invalid input",
        &["app_layer", "class_function"]
    )
    .unwrap();
    static ref FAILURE: IntCounterVec = register_int_counter_vec!(
        "query_failure_total",
        "Queries that failed for a reason other than invalid input",
        &["app_layer", "class_function"]
    )
    .unwrap();
    static ref TIMER: HistogramVec = register_histogram_vec!(
        "query_duration_seconds",
        "Time spent answering a query",
        &["app_layer", "class_function"]
    )
    .unwrap();
}

// Rejected input is the caller's problem, so implementors can opt out of
// being counted as failures
pub trait IsErr {
    fn is_err(&self) -> bool {
        true
    }
}

impl IsErr for Infallible {
    fn is_err(&self) -> bool {
        false
    }
}

/// Success, failure and latency for one labelled function.
#[derive(Clone)]
pub struct Measure {
    success: IntCounter,
    failure: IntCounter,
    timer: Histogram,
}

impl Measure {
    pub fn new(layer: &str, function: &str) -> Measure {
        Measure {
            success: SUCCESS.with_label_values(&[layer, function]),
            failure: FAILURE.with_label_values(&[layer, function]),
            timer: TIMER.with_label_values(&[layer, function]),
        }
    }

    pub fn stats<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: IsErr,
    {
        let timer = self.timer.start_timer();
        let r = inner();
        timer.observe_duration();
        match &r {
            Ok(_) => self.success.inc(),
            Err(e) if !e.is_err() => self.success.inc(),
            Err(_) => self.failure.inc(),
        }
        r
    }
}

pub fn encode() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    enum TestError {
        Fatal,
        Rejected,
    }

    impl IsErr for TestError {
        fn is_err(&self) -> bool {
            match self {
                Self::Fatal => true,
                Self::Rejected => false,
            }
        }
    }

    fn counts(layer: &str, function: &str) -> (i64, i64, u64) {
        (
            SUCCESS.with_label_values(&[layer, function]).get(),
            FAILURE.with_label_values(&[layer, function]).get(),
            TIMER
                .with_label_values(&[layer, function])
                .get_sample_count(),
        )
    }

    #[test]
    fn test_success() {
        let m = Measure::new("layer", "test_success");

        let r = m.stats(|| {
            std::thread::sleep(Duration::from_millis(10));
            Ok::<_, Infallible>("3")
        });

        assert_eq!(r.ok(), Some("3"));
        assert_eq!(counts("layer", "test_success"), (1, 0, 1));
        assert!(
            TIMER
                .with_label_values(&["layer", "test_success"])
                .get_sample_sum()
                >= 0.01
        );
    }

    #[test]
    fn test_failure() {
        let m = Measure::new("layer", "test_failure");

        let _ = m.stats(|| Err::<(), _>(TestError::Fatal));

        assert_eq!(counts("layer", "test_failure"), (0, 1, 1));
    }

    #[test]
    fn test_rejected() {
        let m = Measure::new("layer", "test_rejected");

        let _ = m.stats(|| Err::<(), _>(TestError::Rejected));
        let _ = m.stats(|| Err::<(), _>(TestError::Rejected));

        assert_eq!(counts("layer", "test_rejected"), (2, 0, 2));
    }

    #[test]
    fn test_encode() -> Result<(), Box<dyn std::error::Error>> {
        let m = Measure::new("layer", "test_encode");
        let _ = m.stats(|| Ok::<_, Infallible>(()));

        let text = encode()?;
        assert!(text.contains("query_success_total"));
        assert!(text.contains("class_function=\"test_encode\""));
        Ok(())
    }
}
