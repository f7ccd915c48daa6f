use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Activate buffering. While the TUI owns the terminal, warnings are stored
/// here instead of being printed over the interface.
pub fn activate() {
    *BUFFER.lock().unwrap() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER.lock().unwrap().take().unwrap_or_default()
}

/// Write a warning message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = BUFFER.lock().unwrap();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Works like `eprintln!` but routes through the stderr buffer when active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_messages_are_held_until_drain() {
        activate();
        warn("first".to_string());
        warn("second".to_string());
        let drained = drain();
        assert_eq!(drained, vec!["first".to_string(), "second".to_string()]);

        // After drain, buffering is off and drain returns nothing.
        assert!(drain().is_empty());
    }
}
