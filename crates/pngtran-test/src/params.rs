//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use pngtran_core::RowDescriptor;

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index and success status.
pub struct RegParams {
    /// Name of the test (e.g., "gamma_table")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs the test logging subscriber on first use.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record(&mut self, err: TestError) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, err);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two numeric values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two byte buffers for exact equality
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.record(TestError::LengthMismatch {
                index: self.index,
                expected: expected.len(),
                actual: actual.len(),
            });
            return false;
        }

        match expected.iter().zip(actual).position(|(e, a)| e != a) {
            Some(offset) => {
                eprintln!(
                    "  offset {}: expected {:#04x}, got {:#04x}",
                    offset, expected[offset], actual[offset]
                );
                self.record(TestError::ByteMismatch {
                    index: self.index,
                    offset,
                });
                false
            }
            None => true,
        }
    }

    /// Compare two row layouts
    pub fn compare_descriptor(&mut self, expected: &RowDescriptor, actual: &RowDescriptor) -> bool {
        self.index += 1;

        if expected != actual {
            self.record(TestError::DescriptorMismatch {
                index: self.index,
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            });
            false
        } else {
            true
        }
    }

    /// Record the outcome of a boolean check
    ///
    /// # Arguments
    ///
    /// * `ok` - Whether the check passed
    /// * `what` - Description reported on failure
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;

        if !ok {
            self.record(TestError::CheckFailed {
                index: self.index,
                what: what.to_string(),
            });
        }
        ok
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Like [`cleanup`](Self::cleanup), as a `Result`.
    pub fn finish(self) -> TestResult<()> {
        let test = self.test_name.clone();
        let count = self.failures.len();
        if self.cleanup() {
            Ok(())
        } else {
            Err(TestError::Failed { test, count })
        }
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pngtran_core::ColorType;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_bytes() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_bytes(&[1, 2, 3], &[1, 2, 3]));
        assert!(!rp.compare_bytes(&[1, 2, 3], &[1, 9, 3]));
        assert!(!rp.compare_bytes(&[1, 2], &[1, 2, 3]));
        assert_eq!(rp.index(), 3);
        assert!(matches!(
            rp.finish(),
            Err(TestError::Failed { count: 2, .. })
        ));
    }

    #[test]
    fn test_compare_descriptor() {
        let mut rp = RegParams::new("test");
        let a = RowDescriptor::new(4, ColorType::Rgb, 8).unwrap();
        let b = RowDescriptor::with_channels(4, ColorType::Rgb, 8, 4).unwrap();
        assert!(rp.compare_descriptor(&a, &a));
        assert!(!rp.compare_descriptor(&a, &b));
        assert!(rp.check(true, "always"));
        assert!(!rp.cleanup());
    }
}
