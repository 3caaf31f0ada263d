use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs an HTTP call up to `max_attempts` times, doubling the delay between
/// attempts starting from `initial_delay_ms`. Returns the first success or
/// the last error once the budget is spent.
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    max_attempts: usize,
    initial_delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut delay = Duration::from_millis(initial_delay_ms);
    let mut last_err = None;

    for attempt in 1..=max_attempts.max(1) {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                debug!(attempt, max_attempts, error = %err, "Request attempt failed");
                last_err = Some(Error::from(err));
                if attempt < max_attempts {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    // max_attempts >= 1, so at least one error was recorded
    Err(last_err.unwrap_or_else(|| Error::msg("request failed")))
}

/// Minimal percent-encoding for URL query values; everything outside the
/// unreserved set is escaped.
pub fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn flaky(counter: &std::cell::Cell<u32>, succeed_on: u32) -> Result<u32, reqwest::Error> {
        counter.set(counter.get() + 1);
        if counter.get() >= succeed_on {
            Ok(counter.get())
        } else {
            // A request against an unroutable address yields a real
            // reqwest::Error for the retry path.
            reqwest::get("http://127.0.0.1:1/unreachable").await?;
            unreachable!("request to closed port must fail")
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let counter = std::cell::Cell::new(0);
        let result = with_retry(|| flaky(&counter, 2), 3, 1).await;
        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_retry_exhausts_budget() {
        let counter = std::cell::Cell::new(0);
        let result = with_retry(|| flaky(&counter, 10), 2, 1).await;
        assert!(result.is_err());
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_urlencode_spaces_and_symbols() {
        assert_eq!(urlencode("iphone 15"), "iphone%2015");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("plain-query_1.0~x"), "plain-query_1.0~x");
    }
}
