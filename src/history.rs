//! Fixed-capacity circular histories of command lines and process ids.

use crate::argv::Argv;

/// A fixed-capacity circular buffer that overwrites its oldest entry once full.
///
/// Slots start empty. A single write cursor points at the slot the next
/// [`record`](RingBuffer::record) will fill.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    cursor: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a buffer with `capacity` empty slots.
    ///
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.resize_with(capacity.max(1), || None);
        Self { slots, cursor: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Stores `value` at the cursor and advances it.
    ///
    /// Returns the entry that was evicted from the slot, if any.
    pub fn record(&mut self, value: T) -> Option<T> {
        let evicted = self.slots[self.cursor].replace(value);
        self.cursor = (self.cursor + 1) % self.capacity();
        evicted
    }

    /// The entry `n` steps back from the newest one (0 = newest).
    pub fn lookup(&self, n: usize) -> Option<&T> {
        let cap = self.capacity();
        if n >= cap {
            return None;
        }
        let idx = (self.cursor + cap - 1 - n) % cap;
        self.slots[idx].as_ref()
    }

    /// Occupied entries from oldest to newest, numbered from 0.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        let cap = self.capacity();
        (0..cap)
            .filter_map(move |i| self.slots[(self.cursor + i) % cap].as_ref())
            .enumerate()
    }
}

pub type CommandHistory = RingBuffer<Argv>;
pub type PidHistory = RingBuffer<u32>;

/// The interpreter's two histories.
///
/// Owns every stored [`Argv`]; they are released when overwritten or when the
/// store is dropped.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    pub commands: CommandHistory,
    pub pids: PidHistory,
}

impl HistoryStore {
    pub fn new(command_capacity: usize, pid_capacity: usize) -> Self {
        Self {
            commands: RingBuffer::with_capacity(command_capacity),
            pids: RingBuffer::with_capacity(pid_capacity),
        }
    }

    pub fn record_command(&mut self, argv: Argv) -> Option<Argv> {
        self.commands.record(argv)
    }

    pub fn lookup_command(&self, n: usize) -> Option<&Argv> {
        self.commands.lookup(n)
    }

    /// Records a spawned child's pid. Pid 0 never denotes a child and is ignored.
    pub fn record_pid(&mut self, pid: u32) {
        if pid != 0 {
            self.pids.record(pid);
        }
    }

    pub fn list_pids(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.pids.iter().map(|(i, pid)| (i, *pid))
    }

    pub fn list_commands(&self) -> impl Iterator<Item = (usize, &Argv)> + '_ {
        self.commands.iter()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        use crate::config::{COMMAND_HISTORY_SIZE, PID_HISTORY_SIZE};
        Self::new(COMMAND_HISTORY_SIZE, PID_HISTORY_SIZE)
    }
}
