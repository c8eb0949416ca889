use std::collections::VecDeque;
use std::collections::vec_deque::Iter;
use std::fmt::Arguments;

use chrono::Local;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Info,
    Debug,
    Warn,
}

impl Level {
    fn tag(&self) -> &str {
        match self {
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN ",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub level: Level,
    pub line: String,
}

/// Board events, newest last. The terminal is in the alternate screen while
/// the board runs, so entries are kept in memory and shown in the log modal.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        EventLog {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: Level, args: Arguments) {
        let local = Local::now().format("%H:%M:%S");
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Entry {
            level,
            line: format!("[{}] [{local}] {args}", level.tag()),
        });
    }

    pub fn entries(&self) -> Iter<'_, Entry> {
        self.entries.iter()
    }
}

#[macro_export]
macro_rules! board_log {
    ($log:expr, INFO, $($arg:tt)*) => {
        $log.push($crate::log::Level::Info, format_args!($($arg)*))
    };
    ($log:expr, DEBUG, $($arg:tt)*) => {
        $log.push($crate::log::Level::Debug, format_args!($($arg)*))
    };
    ($log:expr, WARN, $($arg:tt)*) => {
        $log.push($crate::log::Level::Warn, format_args!($($arg)*))
    };
}
