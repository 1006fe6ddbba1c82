//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`。只用于读取运行时配置覆盖项，
//! 会话 token 永远不落盘。

/// 配置键在 LocalStorage 中的前缀
const KEY_PREFIX: &str = "moviewatch.";

/// 浏览器本地存储
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 读取带前缀的配置项，例如 `moviewatch.API_BASE_URL`
    pub fn config(key: &str) -> Option<String> {
        Self::get(&format!("{}{}", KEY_PREFIX, key))
    }
}
