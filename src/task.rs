//! 页面级任务作用域
//!
//! 页面发起的请求都经由 `TaskScope::bind` 包装；页面卸载时调用
//! `abort_all`（或直接 drop 作用域），仍在途中的请求被中止，
//! 其结果不会再写回已经卸载的页面状态。

use futures::future::{AbortHandle, abortable};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

/// 在途任务登记表；任务结束时自行注销
#[derive(Default)]
struct Pending {
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
}

#[derive(Default)]
pub struct TaskScope {
    pending: Rc<RefCell<Pending>>,
    closed: Cell<bool>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把任务绑定到作用域
    ///
    /// 返回的 future 在任务完成时产出 `Some(output)`，被中止时产出 `None`。
    /// 作用域已关闭时绑定的任务立即视为中止。
    pub fn bind<F>(&self, task: F) -> impl Future<Output = Option<F::Output>> + use<F>
    where
        F: Future,
    {
        let (task, handle) = abortable(task);
        let id = if self.closed.get() {
            handle.abort();
            None
        } else {
            let mut pending = self.pending.borrow_mut();
            let id = pending.next_id;
            pending.next_id += 1;
            pending.handles.retain(|(_, h)| !h.is_aborted());
            pending.handles.push((id, handle));
            Some(id)
        };
        let registry = Rc::downgrade(&self.pending);
        async move {
            let output = task.await.ok();
            if let (Some(id), Some(registry)) = (id, registry.upgrade()) {
                registry.borrow_mut().handles.retain(|(k, _)| *k != id);
            }
            output
        }
    }

    /// 中止所有在途任务并关闭作用域（幂等）
    pub fn abort_all(&self) {
        self.closed.set(true);
        let handles = std::mem::take(&mut self.pending.borrow_mut().handles);
        if !handles.is_empty() {
            log::debug!("aborting {} page task(s)", handles.len());
        }
        for (_, handle) in handles {
            handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// 尚未结束的任务数
    pub fn pending(&self) -> usize {
        self.pending.borrow().handles.len()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;

    #[test]
    fn completed_task_yields_its_output() {
        let scope = TaskScope::new();

        assert_eq!(block_on(scope.bind(async { 42 })), Some(42));
    }

    #[test]
    fn aborting_discards_a_pending_response() {
        let mut pool = LocalPool::new();
        let scope = TaskScope::new();
        let applied = Rc::new(Cell::new(None));
        let (tx, rx) = oneshot::channel::<&'static str>();

        let task = scope.bind(async move { rx.await.ok() });
        let sink = Rc::clone(&applied);
        pool.spawner()
            .spawn_local(async move {
                if let Some(body) = task.await {
                    sink.set(body);
                }
            })
            .unwrap();
        pool.run_until_stalled();

        scope.abort_all();
        // 卸载后响应才到达
        let _ = tx.send("late");
        pool.run_until_stalled();

        assert_eq!(applied.get(), None);
    }

    #[test]
    fn finished_tasks_leave_the_scope() {
        let scope = TaskScope::new();
        for n in 0..5 {
            assert_eq!(block_on(scope.bind(async move { n })), Some(n));
        }
        let (_tx, rx) = oneshot::channel::<u8>();
        let _waiting = scope.bind(rx);

        assert_eq!(scope.pending(), 1);
    }

    #[test]
    fn closed_scope_rejects_new_tasks() {
        let scope = TaskScope::new();
        scope.abort_all();
        scope.abort_all();

        assert!(scope.is_closed());
        assert_eq!(block_on(scope.bind(async { 1 })), None);
    }

    #[test]
    fn dropping_the_scope_aborts_tasks() {
        let scope = TaskScope::new();
        let (_tx, rx) = oneshot::channel::<u8>();
        let task = scope.bind(rx);

        drop(scope);

        assert_eq!(block_on(task), None);
    }
}
