#![cfg(feature = "logging")]

use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use darray::{
    logging::{set_logger, LogLevel, Logger},
    prelude::*,
};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

static LOGGER: Logger = Logger::new();

#[test]
fn resizes_are_logged() {
    let buffer = SharedBuffer::default();
    LOGGER.set_log_to_console(false);
    LOGGER.set_always_flush(true);
    LOGGER.set_max_level(LogLevel::Verbose);
    assert!(LOGGER.add_writer(Box::new(buffer.clone())).is_ok());
    set_logger(&LOGGER);

    let mut arr = DArray::new(None).unwrap();
    for i in 0..4 {
        arr.append(i).unwrap();
    }

    let storage = TrackingStorage::with_limit(4);
    let mut limited = DArray::<u32, _>::new_in(None, storage).unwrap();
    limited.append(0).unwrap();
    assert!(limited.append(1).is_err());

    let contents = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    assert!(contents.contains("[darray]"));
    assert!(contents.contains("resized backing storage from 2 to 4 items"));
    assert!(contents.contains("failed to resize backing storage to 2 items"));
}
