use gloo_timers::callback::Timeout;

pub type Task = Box<dyn FnOnce()>;

/// Source of one-shot timers.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Task) -> Self::Handle;
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Task) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn cancel(&self, handle: Timeout) {
        handle.cancel();
    }
}

/// Single pending-task slot: scheduling replaces whatever was pending.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    pub fn schedule(&mut self, delay_ms: u32, task: Task) {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(delay_ms, task));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
pub mod manual {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Scheduler, Task};

    struct Entry {
        id: u64,
        delay_ms: u32,
        task: Task,
    }

    #[derive(Default)]
    struct Queue {
        next_id: u64,
        entries: Vec<Entry>,
    }

    /// Timer queue driven by the test instead of a clock.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        queue: Rc<RefCell<Queue>>,
    }

    impl ManualScheduler {
        pub fn pending(&self) -> usize {
            self.queue.borrow().entries.len()
        }

        pub fn pending_delays(&self) -> Vec<u32> {
            self.queue
                .borrow()
                .entries
                .iter()
                .map(|entry| entry.delay_ms)
                .collect()
        }

        /// Fire every pending task in scheduling order.
        pub fn run_all(&self) {
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    if queue.entries.is_empty() {
                        None
                    } else {
                        Some(queue.entries.remove(0))
                    }
                };
                match next {
                    Some(entry) => (entry.task)(),
                    None => break,
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = u64;

        fn schedule(&self, delay_ms: u32, task: Task) -> u64 {
            let mut queue = self.queue.borrow_mut();
            queue.next_id += 1;
            let id = queue.next_id;
            queue.entries.push(Entry { id, delay_ms, task });
            id
        }

        fn cancel(&self, handle: u64) {
            self.queue
                .borrow_mut()
                .entries
                .retain(|entry| entry.id != handle);
        }
    }
}
