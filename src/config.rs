use std::time::Duration;

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 这些是默认值，如果配置源中没有定义（或无法解析），则使用这些值
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub const KEY_API_BASE_URL: &str = "API_BASE_URL";
pub const KEY_REFRESH_INTERVAL_SECS: &str = "REFRESH_INTERVAL_SECS";

/// 客户端运行时配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端根地址；空字符串表示与页面同源
    pub api_base_url: String,
    /// 静默刷新会话的周期
    pub refresh_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl ClientConfig {
    /// 从任意键值来源读取配置，实现与存储介质解耦
    ///
    /// 前端传入 LocalStorage + 编译期环境变量，测试传入 HashMap。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup(KEY_API_BASE_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let refresh_interval = match lookup(KEY_REFRESH_INTERVAL_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "ignoring invalid {}={:?}, using {:?}",
                        KEY_REFRESH_INTERVAL_SECS,
                        raw,
                        defaults.refresh_interval
                    );
                    defaults.refresh_interval
                }
            },
            None => defaults.refresh_interval,
        };

        Self {
            api_base_url,
            refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.refresh_interval, Duration::from_secs(600));
    }

    #[test]
    fn values_are_read_and_normalised() {
        let config = ClientConfig::from_lookup(lookup(&[
            (KEY_API_BASE_URL, " http://localhost:8080/ "),
            (KEY_REFRESH_INTERVAL_SECS, "90"),
        ]));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.refresh_interval, Duration::from_secs(90));
    }

    #[test]
    fn unusable_intervals_are_ignored() {
        for raw in ["0", "-5", "ten"] {
            let config = ClientConfig::from_lookup(lookup(&[(KEY_REFRESH_INTERVAL_SECS, raw)]));
            assert_eq!(config.refresh_interval, DEFAULT_REFRESH_INTERVAL);
        }
    }
}
