use std::time::Duration;

use crate::error::FetchError;

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt and no delay.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Run `op` until it returns a value `accept` likes or the attempts run out.
    ///
    /// A value rejected by `accept` counts as a failed attempt. `on_failure`
    /// sees every failed attempt (1-based) before the delay. The delay is not
    /// taken after the final attempt. Returns the last error when exhausted.
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> Result<T, FetchError>,
        accept: impl Fn(&T) -> bool,
        mut on_failure: impl FnMut(u32, &FetchError),
    ) -> Result<T, FetchError> {
        let mut attempt = 1;
        loop {
            let err = match op() {
                Ok(value) if accept(&value) => return Ok(value),
                Ok(_) => FetchError::rejected("result failed acceptance check"),
                Err(e) => e,
            };
            on_failure(attempt, &err);
            if attempt >= self.max_attempts {
                return Err(err);
            }
            attempt += 1;
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeds_on_later_attempt() {
        let mut calls = 0;
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let result = policy.run(
            || {
                calls += 1;
                if calls < 3 {
                    Err(FetchError::transient("timeout"))
                } else {
                    Ok(calls)
                }
            },
            |_| true,
            |_, _| {},
        );
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausts_budget_and_returns_last_error() {
        let mut failures = Vec::new();
        let policy = RetryPolicy::new(4, Duration::ZERO);
        let result: Result<(), _> = policy.run(
            || Err(FetchError::transient("down")),
            |_| true,
            |attempt, _| failures.push(attempt),
        );
        assert!(matches!(result, Err(FetchError::Transient(_))));
        assert_eq!(failures, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejected_values_count_as_failures() {
        let mut calls = 0;
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let result = policy.run(
            || {
                calls += 1;
                Ok(Vec::<u8>::new())
            },
            |v| !v.is_empty(),
            |_, _| {},
        );
        assert!(matches!(result, Err(FetchError::Rejected(_))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.run(|| Ok(7), |_| true, |_, _| {}).unwrap(), 7);
    }
}
