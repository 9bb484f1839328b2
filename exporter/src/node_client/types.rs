//! Wire types for the node's `GET /v3/info` response.
//!
//! Only `supportedChains` is required. Every per-chain field is kept as a
//! loose [`Value`] so a single malformed record degrades to best-effort
//! gauge values instead of failing the whole scrape.

use serde::Deserialize;
use serde_json::Value;

/// Top-level `/v3/info` body. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub supported_chains: Vec<ChainRecord>,
}

/// One entry of `supportedChains`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    #[serde(default)]
    pub chain_id: Value,
    #[serde(default)]
    pub name: Value,
    /// `null` or absent degrades like an empty object.
    #[serde(default)]
    pub health_check: Option<HealthCheck>,
}

/// The `healthCheck` object of a chain record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub native_balance: Value,
    #[serde(default)]
    pub exec_queue_active_jobs: Value,
    #[serde(default)]
    pub exec_queue_pending_jobs: Value,
}

/// Per-chain values extracted from one successful scrape.
///
/// This is transient: it is rebuilt from the response every cycle and only
/// survives as gauge values.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainStatus {
    pub chain_id: String,
    pub chain_name: String,
    pub healthy: bool,
    pub native_balance: f64,
    pub active_queue_jobs: f64,
    pub pending_queue_jobs: f64,
}

impl ChainStatus {
    /// Label values in gauge label order (`chainId`, `chainName`).
    pub fn labels(&self) -> [&str; 2] {
        [&self.chain_id, &self.chain_name]
    }
}

/// Status string the node reports for a healthy chain.
pub const HEALTHY: &str = "healthy";

impl ChainRecord {
    /// Derives the gauge-facing view of this record.
    pub fn status(&self) -> ChainStatus {
        let hc = self.health_check.clone().unwrap_or_default();
        ChainStatus {
            chain_id: label_value(&self.chain_id),
            chain_name: label_value(&self.name),
            healthy: hc.status.as_str() == Some(HEALTHY),
            native_balance: balance_value(&hc.native_balance),
            active_queue_jobs: hc.exec_queue_active_jobs.as_f64().unwrap_or(f64::NAN),
            pending_queue_jobs: hc.exec_queue_pending_jobs.as_f64().unwrap_or(f64::NAN),
        }
    }
}

fn label_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // `1.0` and `1` name the same chain.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn balance_value(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

/// Parses the longest leading decimal number of `s`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so
/// `"1.5 ETH"` yields `1.5`. Returns NaN when no number prefix exists.
pub fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_info_parses_reference_payload() {
        let body = json!({
            "supportedChains": [{
                "chainId": 1,
                "name": "Ethereum",
                "healthCheck": {
                    "status": "healthy",
                    "nativeBalance": "1.5",
                    "execQueueActiveJobs": 2,
                    "execQueuePendingJobs": 0
                }
            }],
            "version": "3.1.0"
        });

        let info: NodeInfo = serde_json::from_value(body).expect("NodeInfo should parse");
        assert_eq!(info.supported_chains.len(), 1);

        let status = info.supported_chains[0].status();
        assert_eq!(
            status,
            ChainStatus {
                chain_id: "1".into(),
                chain_name: "Ethereum".into(),
                healthy: true,
                native_balance: 1.5,
                active_queue_jobs: 2.0,
                pending_queue_jobs: 0.0,
            }
        );
        assert_eq!(status.labels(), ["1", "Ethereum"]);
    }

    #[test]
    fn missing_supported_chains_is_an_error() {
        assert!(serde_json::from_value::<NodeInfo>(json!({})).is_err());
        assert!(serde_json::from_value::<NodeInfo>(json!({ "supportedChains": null })).is_err());
        assert!(serde_json::from_value::<NodeInfo>(json!({ "supportedChains": 3 })).is_err());
    }

    #[test]
    fn only_exact_healthy_status_counts() {
        for status in [
            json!("degraded"),
            json!(""),
            json!("Healthy"),
            json!(null),
            json!(true),
            json!(1),
        ] {
            let record: ChainRecord = serde_json::from_value(json!({
                "chainId": 10,
                "name": "Optimism",
                "healthCheck": { "status": status.clone() }
            }))
            .expect("record should parse");
            assert!(!record.status().healthy, "status {status} must not be healthy");
        }
    }

    #[test]
    fn sparse_record_degrades_to_best_effort_values() {
        let record: ChainRecord = serde_json::from_value(json!({ "chainId": "0x89" }))
            .expect("record should parse");
        let status = record.status();

        assert_eq!(status.chain_id, "0x89");
        assert_eq!(status.chain_name, "");
        assert!(!status.healthy);
        assert!(status.native_balance.is_nan());
        assert!(status.active_queue_jobs.is_nan());
        assert!(status.pending_queue_jobs.is_nan());
    }

    #[test]
    fn null_health_check_does_not_fail_the_record() {
        let info: NodeInfo = serde_json::from_value(json!({
            "supportedChains": [{ "chainId": 8453, "name": "Base", "healthCheck": null }]
        }))
        .expect("NodeInfo should parse");

        let status = info.supported_chains[0].status();
        assert_eq!(status.labels(), ["8453", "Base"]);
        assert!(!status.healthy);
    }

    #[test]
    fn integral_float_chain_id_renders_like_an_integer() {
        assert_eq!(label_value(&json!(1.0)), "1");
        assert_eq!(label_value(&json!(137)), "137");
        assert_eq!(label_value(&json!(-5.0)), "-5");
        assert_eq!(label_value(&json!(2.5)), "2.5");
        assert_eq!(label_value(&json!(null)), "");

        let record: ChainRecord =
            serde_json::from_value(json!({ "chainId": 8453.0, "name": "Base" })).expect("record");
        assert_eq!(record.status().labels(), ["8453", "Base"]);
    }

    #[test]
    fn numeric_balance_is_used_verbatim() {
        assert_eq!(balance_value(&json!(0.25)), 0.25);
        assert!(balance_value(&json!({ "wei": "1" })).is_nan());
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float_prefix("1.5"), 1.5);
        assert_eq!(parse_float_prefix("  42"), 42.0);
        assert_eq!(parse_float_prefix("1.5 ETH"), 1.5);
        assert_eq!(parse_float_prefix("-3.25e2x"), -325.0);
        assert_eq!(parse_float_prefix("7e"), 7.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix("abc").is_nan());
        assert!(parse_float_prefix("-").is_nan());
        assert!(parse_float_prefix(".").is_nan());
    }
}
