//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 替代 `gloo-timers`。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # 参数
    /// - `millis`: 间隔时间（毫秒）
    /// - `callback`: 每次间隔触发的回调函数
    pub fn new<F>(millis: u32, callback: F) -> Result<Self, JsValue>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window object"))?;

        let timeout = i32::try_from(millis).unwrap_or(i32::MAX);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout,
        )?;

        Ok(Self {
            handle,
            _closure: closure,
        })
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
