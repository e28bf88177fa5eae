use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

static BUFFER: Mutex<Option<Vec<u8>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<u8>>> {
    BUFFER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Activate buffering. While active, log output is stored instead of
/// being printed to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return everything collected.
pub fn drain() -> String {
    let bytes = lock().take().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Log writer that routes through the buffer when it is active and to
/// stderr otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferedStderr;

/// Writer factory for `tracing_subscriber::fmt().with_writer(...)`.
pub fn writer() -> BufferedStderr {
    BufferedStderr
}

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = lock();
        if let Some(buffer) = guard.as_mut() {
            buffer.extend_from_slice(buf);
            Ok(buf.len())
        } else {
            drop(guard);
            io::stderr().write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
