//! Cancellable one-shot and repeating tasks on a logical millisecond clock.
//!
//! The host advances the clock; the scheduler never reads wall time. Due
//! tasks are handed out one at a time so a handler can cancel or schedule
//! work before the next task is popped.

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    task: T,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, task: T, delay_ms: u64, period_ms: Option<u64>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            due_ms: self.now_ms + delay_ms,
            period_ms,
        });
        handle
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, task: T, delay_ms: u64) -> TaskHandle {
        self.push(task, delay_ms, None)
    }

    /// Run `task` every `period_ms`, first after one full period.
    pub fn schedule_repeating(&mut self, task: T, period_ms: u64) -> TaskHandle {
        let period_ms = period_ms.max(1);
        self.push(task, period_ms, Some(period_ms))
    }

    /// Returns false if the task already ran (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest task due at or before `horizon_ms`, moving the clock
    /// to its due time. Ties go to the task scheduled first.
    pub fn pop_due(&mut self, horizon_ms: u64) -> Option<(TaskHandle, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= horizon_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle))
            .map(|(i, _)| i)?;

        let (handle, task, due_ms, period_ms) = {
            let e = &self.entries[index];
            (e.handle, e.task, e.due_ms, e.period_ms)
        };
        self.now_ms = self.now_ms.max(due_ms);

        match period_ms {
            Some(period) => self.entries[index].due_ms = due_ms + period,
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some((handle, task))
    }

    /// Move the clock forward without popping anything.
    pub fn advance_to(&mut self, horizon_ms: u64) {
        self.now_ms = self.now_ms.max(horizon_ms);
    }
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
