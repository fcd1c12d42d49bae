//! Regression test parameters and operations

use textseg_core::{Box, Pix};

/// Regression test parameters
///
/// Tracks the test name, the current comparison index and every recorded
/// failure.
pub struct RegParams {
    /// Name of the test (e.g., "pageseg")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    ///
    /// Also installs the test `tracing` subscriber.
    pub fn new(test_name: &str) -> Self {
        crate::init_tracing();

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

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values.
    ///
    /// Returns `true` if they differ by at most `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two boxes coordinate by coordinate.
    ///
    /// Returns `true` if every one of `x`, `y`, `w`, `h` differs by at
    /// most `delta`.
    pub fn compare_boxes(&mut self, expected: &Box, actual: &Box, delta: i32) -> bool {
        self.index += 1;
        let worst = [
            expected.x - actual.x,
            expected.y - actual.y,
            expected.w - actual.w,
            expected.h - actual.h,
        ]
        .iter()
        .map(|d| d.abs())
        .max()
        .unwrap_or(0);

        if worst > delta {
            let msg = format!(
                "Failure in {}_reg: box comparison for index {}\n\
                 expected = {:?}, actual = {:?}, allowed delta = {}",
                self.test_name, self.index, expected, actual, delta
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two Pix images for exact equality.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) || pix1.depth() != pix2.depth() {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                if pix1.get_pixel(x, y) != pix2.get_pixel(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    return self.fail(msg);
                }
            }
        }

        true
    }

    /// Compare two strings for exact equality.
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Clean up and report results.
    ///
    /// Returns `true` if all comparisons passed.
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

    /// Check if all comparisons have passed so far
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

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 1);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_boxes() {
        let mut rp = RegParams::new("test");
        let a = Box::new_unchecked(10, 10, 100, 40);
        assert!(rp.compare_boxes(&a, &Box::new_unchecked(12, 9, 98, 41), 2));
        assert!(!rp.compare_boxes(&a, &Box::new_unchecked(10, 10, 90, 40), 2));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_strings() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_strings("abc", "abc"));
        assert!(!rp.compare_strings("abc", "abd"));
    }
}
