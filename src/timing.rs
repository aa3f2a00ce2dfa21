//! Wall-clock timing for query execution.
//!
//! The measured span covers running the query and pulling the full result
//! set into memory. Anything the caller does with the result afterwards
//! (formatting, printing) is outside it.

use std::time::{Duration, Instant};

/// A value together with how long it took to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }

    /// Elapsed time in fractional seconds.
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Move the error out so the timing is only kept on success.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Run `operation` once and measure it.
pub fn timed<T, F>(operation: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = operation();
    let elapsed = start.elapsed();
    Timed { value, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_measures_operation() {
        let timed = timed(|| {
            std::thread::sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(timed.value, 42);
        assert!(timed.elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_transpose() {
        let ok: Timed<Result<u8, &str>> = Timed {
            value: Ok(1),
            elapsed: Duration::from_micros(250),
        };
        let ok = ok.transpose().unwrap();
        assert_eq!(ok.into_parts(), (1, Duration::from_micros(250)));

        let err: Timed<Result<u8, &str>> = Timed {
            value: Err("boom"),
            elapsed: Duration::ZERO,
        };
        assert_eq!(err.transpose().unwrap_err(), "boom");
    }
}
