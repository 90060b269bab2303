use std::time::Duration;

/// How long to wait before each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    Exponential {
        initial: Duration,
        factor: u32,
        max: Duration,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            backoff: Backoff::Fixed(Duration::from_secs(1)),
        }
    }
}

impl RetryPolicy {
    /// Delay before `attempt`, counted from 1.
    pub fn delay(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => {
                let exp = attempt.saturating_sub(1);
                let scale = factor.checked_pow(exp).unwrap_or(u32::MAX);
                initial.checked_mul(scale).unwrap_or(max).min(max)
            }
        }
    }

    pub fn attempts(&self) -> impl Iterator<Item = (u32, Duration)> + '_ {
        (1..=self.max_attempts).map(move |attempt| (attempt, self.delay(attempt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_polls_thirty_times_a_second_apart() {
        let policy = RetryPolicy::default();
        let delays: Vec<_> = policy.attempts().collect();
        assert_eq!(delays.len(), 30);
        assert!(delays.iter().all(|(_, d)| *d == Duration::from_secs(1)));
        assert_eq!(delays.last().unwrap().0, 30);
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let policy = RetryPolicy {
            max_attempts: 6,
            backoff: Backoff::Exponential {
                initial: Duration::from_millis(100),
                factor: 2,
                max: Duration::from_millis(1000),
            },
        };
        let delays: Vec<_> = policy.attempts().map(|(_, d)| d.as_millis()).collect();
        assert_eq!(delays, vec![100, 200, 400, 800, 1000, 1000]);
    }

    #[test]
    fn huge_exponents_do_not_overflow() {
        let policy = RetryPolicy {
            max_attempts: 100,
            backoff: Backoff::Exponential {
                initial: Duration::from_secs(1),
                factor: 10,
                max: Duration::from_secs(30),
            },
        };
        assert_eq!(policy.delay(100), Duration::from_secs(30));
    }

    #[test]
    fn zero_attempts_yield_nothing() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts().count(), 0);
    }
}
