//! 页面任务作用域
//!
//! 把核心库的 `TaskScope` 挂到组件的 Owner 上：组件卸载时中止所有在途请求。

use leptos::prelude::*;
use leptos::task::spawn_local;
use moviewatch::TaskScope;
use std::future::Future;

/// 当前组件的任务作用域，随组件一起清理
#[derive(Clone, Copy)]
pub struct PageScope(StoredValue<TaskScope, LocalStorage>);

impl PageScope {
    /// 派发一个页面级任务；页面已卸载时结果被丢弃
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let Some(bound) = self.0.try_with_value(|scope| scope.bind(task)) else {
            log::debug!("page already unmounted, task dropped");
            return;
        };
        spawn_local(async move {
            if bound.await.is_none() {
                log::debug!("page task aborted");
            }
        });
    }
}

pub fn use_page_scope() -> PageScope {
    let scope = StoredValue::new_local(TaskScope::new());
    on_cleanup(move || {
        scope.try_with_value(TaskScope::abort_all);
    });
    PageScope(scope)
}
