use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Routes `log` records into a shared buffer the UI drains each frame
pub struct TuiLogger {
    log_buffer: Arc<Mutex<Vec<String>>>,
    level: LevelFilter,
    capacity: usize,
}

impl TuiLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                log_buffer: log_buffer.clone(),
                level,
                capacity,
            },
            log_buffer,
        )
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{}", record.args());
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                // Undrained messages are dropped oldest first
                if buffer.len() > self.capacity {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_buffer_respects_level_and_capacity() {
        let (logger, buffer) = TuiLogger::new(LevelFilter::Info, 2);
        for i in 0..3 {
            logger.log(
                &Record::builder()
                    .args(format_args!("line {i}"))
                    .level(Level::Info)
                    .build(),
            );
        }
        logger.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(Level::Debug)
                .build(),
        );
        let lines = buffer.lock().unwrap().clone();
        assert_eq!(lines, vec!["line 1".to_string(), "line 2".to_string()]);
    }
}
