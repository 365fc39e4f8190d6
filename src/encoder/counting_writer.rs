use std::io::{self, Write};

/// Writer adapter counting the bytes that went through it.
///
/// Used instead of querying the stream position, so any [`Write`] target
/// (files, sockets, in-memory buffers) can be encoded into.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        CountingWriter { inner, written: 0 }
    }

    /// Bytes accepted by the inner writer since creation.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod test_counting_writer {
    use super::*;

    #[test]
    fn test_counts_all_bytes() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(&[1, 2, 3]).unwrap();
        writer.write_all(&[]).unwrap();
        writer.write_all(&[4; 10]).unwrap();
        assert_eq!(writer.written(), 13);
        assert_eq!(writer.into_inner().len(), 13);
    }

    #[test]
    fn test_counts_through_a_borrowed_writer() {
        let mut buffer = Vec::new();
        {
            let mut writer = CountingWriter::new(&mut buffer);
            writer.write_all(b"gadget").unwrap();
            assert_eq!(writer.written(), 6);
        }
        assert_eq!(buffer, b"gadget");
    }
}
