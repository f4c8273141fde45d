use std::io::{self, BufWriter, Write};

/// Capacity of the builtin output buffer.
pub const OUTPUT_BUFFER_SIZE: usize = 1024;

/// Buffered standard output shared by all builtins.
///
/// The buffer is flushed when it fills, before an external program is spawned,
/// before the prompt is printed and when the sink is dropped, so builtin output
/// and child output appear in command order.
pub struct OutputSink {
    inner: BufWriter<Box<dyn Write>>,
}

impl OutputSink {
    pub fn new(writer: Box<dyn Write>) -> Self {
        OutputSink {
            inner: BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Flushes, logging instead of failing; a closed stdout must not stop the loop.
    pub fn sync(&mut self) {
        if let Err(e) = self.inner.flush() {
            log::warn!("failed to flush output: {}", e);
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        self.sync();
    }
}
