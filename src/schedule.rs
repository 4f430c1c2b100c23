//! Single-threaded task queue for deferred node mutation.
//!
//! The scene graph is not safe for concurrent mutation, so everything the
//! screen controller does must happen on one designated thread. Work that
//! cannot run synchronously inside `update` — the deferred spherical build —
//! is pushed onto a [`TaskQueue`] instead, and the host drains the queue on
//! that same thread once per frame (or per event-loop turn).
//!
//! The queue is `Rc`-backed and therefore `!Send`: handing a clone to another
//! thread is a compile error, which makes the single-writer discipline
//! structural rather than conventional.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

/// A FIFO queue of one-shot tasks bound to the thread that created it.
///
/// Cloning is cheap and shares the same queue; producers hold clones and
/// [`push`](TaskQueue::push) work, the host calls
/// [`run_pending`](TaskQueue::run_pending) to drain it.
#[derive(Clone)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            tasks: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Enqueues a task to run on the next drain.
    pub fn push(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Runs queued tasks until the queue is empty, returning how many ran.
    ///
    /// Tasks enqueued by other tasks during the drain run in the same call.
    /// The queue's borrow is released before each task executes, so tasks may
    /// freely push.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn runs_in_fifo_order() {
        let queue = TaskQueue::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let seen = Rc::clone(&seen);
            queue.push(move || seen.borrow_mut().push(i));
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn tasks_pushed_during_drain_also_run() {
        let queue = TaskQueue::new();
        let hit = Rc::new(RefCell::new(false));

        let inner_queue = queue.clone();
        let inner_hit = Rc::clone(&hit);
        queue.push(move || {
            inner_queue.push(move || *inner_hit.borrow_mut() = true);
        });

        assert_eq!(queue.run_pending(), 2);
        assert!(*hit.borrow());
    }
}
