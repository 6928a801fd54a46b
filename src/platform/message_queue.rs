//! A bounded FIFO with a priority-push escape hatch. Grounded on
//! `atlink/platform/api/MessageQueue.h`'s `get`/`put`/`putFront`
//! contract. `std::sync::mpsc` has no `putFront`, so this is a small
//! `Mutex<VecDeque<T>>` plus `Condvar` instead — the same shape the
//! original's Linux backend builds over a native condition variable.
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

pub struct MessageQueue<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> MessageQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Block until there is room, then push to the back.
    pub fn put(&self, msg: T) {
        let mut items = self.items.lock().unwrap();
        while items.len() >= self.capacity {
            items = self.not_full.wait(items).unwrap();
        }
        items.push_back(msg);
        self.not_empty.notify_one();
    }

    /// Priority push: block until there is room, then push to the front so
    /// `get` returns this before any already-queued message — used to jump
    /// a `ShutDown` event ahead of queued RX work.
    pub fn put_front(&self, msg: T) {
        let mut items = self.items.lock().unwrap();
        while items.len() >= self.capacity {
            items = self.not_full.wait(items).unwrap();
        }
        items.push_front(msg);
        self.not_empty.notify_one();
    }

    /// Block until a message is available, then pop from the front.
    pub fn get(&self) -> T {
        let mut items = self.items.lock().unwrap();
        loop {
            if let Some(msg) = items.pop_front() {
                self.not_full.notify_one();
                return msg;
            }
            items = self.not_empty.wait(items).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_front_jumps_the_queue() {
        let q: MessageQueue<i32> = MessageQueue::new(4);
        q.put(1);
        q.put(2);
        q.put_front(0);
        assert_eq!(q.get(), 0);
        assert_eq!(q.get(), 1);
        assert_eq!(q.get(), 2);
    }

    #[test]
    fn get_blocks_until_put() {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let q = Arc::new(MessageQueue::<i32>::new(4));
        let q2 = q.clone();
        let handle = thread::spawn(move || q2.get());
        thread::sleep(Duration::from_millis(20));
        q.put(42);
        assert_eq!(handle.join().unwrap(), 42);
    }
}
