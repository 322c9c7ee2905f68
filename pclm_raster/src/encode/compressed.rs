use super::RasterEncoder;
use futures::ready;
use futures::task::Context;
use futures::task::Poll;
use futures::AsyncWrite;
use pin_project::pin_project;
use std::io;
use std::mem;
use std::ops::DerefMut;
use std::pin::Pin;

/// PackBits-style encoder for the `RaS2` (and PWG) line format.
///
/// Each line is emitted as a repeat byte (number of extra copies of the line)
/// followed by runs of `chunk_size` byte units. Input is buffered one line at a
/// time so identical consecutive lines collapse into one record of up to 256 lines.
#[pin_project(project = CompressedRasterEncoderProj)]
pub struct CompressedRasterEncoder<W> {
    writer: Pin<W>,
    chunk_size: u8,
    bytes_remaining: u64,
    /// Line currently being received.
    line_buffer: Vec<u8>,
    pos_in_line: usize,
    /// Last complete line, not yet emitted.
    held_line: Vec<u8>,
    line_repeat: Option<u8>,
    /// Encoded bytes waiting for the underlying writer.
    pending: Vec<u8>,
    pending_pos: usize,
}

impl<W> CompressedRasterEncoder<W> {
    pub fn new(
        writer: Pin<W>,
        chunk_size: u8,
        bytes_per_line: u64,
        num_bytes: u64,
    ) -> io::Result<Self> {
        if bytes_per_line != 0 && (chunk_size == 0 || bytes_per_line % chunk_size as u64 != 0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "bytes_per_line must be multiple of chunk_size",
            ));
        }
        if (num_bytes != 0) && (bytes_per_line == 0 || num_bytes % bytes_per_line != 0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "num_bytes must be multiple of bytes_per_line",
            ));
        }
        // an empty page never touches the line buffers
        let line_buffer_size = usize::try_from(bytes_per_line.min(num_bytes)).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "bytes_per_line is too large")
        })?;
        let mut line_buffer = Vec::new();
        line_buffer.try_reserve_exact(line_buffer_size)?;
        line_buffer.resize(line_buffer_size, 0);
        let mut held_line = Vec::new();
        held_line.try_reserve_exact(line_buffer_size)?;
        held_line.resize(line_buffer_size, 0);
        Ok(Self {
            writer,
            chunk_size,
            bytes_remaining: num_bytes,
            line_buffer,
            pos_in_line: 0,
            held_line,
            line_repeat: None,
            pending: Vec::new(),
            pending_pos: 0,
        })
    }
}

impl<W> RasterEncoder<W> for CompressedRasterEncoder<W>
where
    W: DerefMut<Target: AsyncWrite>,
{
    fn bytes_remaining(&self) -> u64 {
        self.bytes_remaining
    }

    fn into_pin_mut(self) -> Pin<W> {
        self.writer
    }
}

/// Appends one line record to `out`.
fn encode_line(out: &mut Vec<u8>, chunk_size: u8, line_repeat: u8, line: &[u8]) {
    let chunk_size = chunk_size as usize;
    out.push(line_repeat);
    let mut start = 0;
    while start < line.len() {
        let mut chunks = line[start..].chunks(chunk_size);
        let Some(first_chunk) = chunks.next() else {
            break;
        };
        match chunks.next() {
            Some(second_chunk) if first_chunk == second_chunk => {
                let mut tag = 1u8;
                for chunk in chunks {
                    if chunk != first_chunk || tag >= 0x7f {
                        break;
                    }
                    tag += 1;
                }
                out.push(tag);
                out.extend_from_slice(first_chunk);
                start += chunk_size * (tag as usize + 1);
            }
            Some(second_chunk) => {
                let mut count = 1u8;
                let mut prev_chunk = second_chunk;
                for chunk in chunks {
                    if chunk == prev_chunk {
                        break;
                    }
                    count += 1;
                    prev_chunk = chunk;
                    if count >= 0x7f {
                        break;
                    }
                }
                let end = start + chunk_size * count as usize;
                out.push((!count).wrapping_add(2));
                out.extend_from_slice(&line[start..end]);
                start = end;
            }
            None => {
                // only one chunk remaining
                out.push(0);
                out.extend_from_slice(first_chunk);
                start += chunk_size;
            }
        }
    }
}

fn poll_drain<W>(
    cx: &mut Context<'_>,
    writer: &mut Pin<W>,
    pending: &mut Vec<u8>,
    pending_pos: &mut usize,
) -> Poll<io::Result<()>>
where
    W: DerefMut<Target: AsyncWrite>,
{
    while *pending_pos < pending.len() {
        let n_written = ready!(writer.as_mut().poll_write(cx, &pending[*pending_pos..]))?;
        if n_written == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "failed to write to writer",
            )));
        }
        *pending_pos += n_written;
    }
    pending.clear();
    *pending_pos = 0;
    Poll::Ready(Ok(()))
}

impl<W> CompressedRasterEncoderProj<'_, W> {
    /// Folds the completed `line_buffer` into the held line, emitting records as needed.
    fn complete_line(&mut self) {
        let chunk_size = *self.chunk_size;
        match *self.line_repeat {
            Some(line_repeat) if self.line_buffer[..] == self.held_line[..] => {
                if line_repeat + 1 == u8::MAX {
                    encode_line(&mut *self.pending, chunk_size, u8::MAX, &self.held_line[..]);
                    *self.line_repeat = None;
                } else {
                    *self.line_repeat = Some(line_repeat + 1);
                }
            }
            Some(line_repeat) => {
                encode_line(&mut *self.pending, chunk_size, line_repeat, &self.held_line[..]);
                mem::swap(&mut *self.line_buffer, &mut *self.held_line);
                *self.line_repeat = Some(0);
            }
            None => {
                mem::swap(&mut *self.line_buffer, &mut *self.held_line);
                *self.line_repeat = Some(0);
            }
        }
        if *self.bytes_remaining == 0 {
            if let Some(line_repeat) = self.line_repeat.take() {
                encode_line(&mut *self.pending, chunk_size, line_repeat, &self.held_line[..]);
            }
        }
    }
}

impl<W> AsyncWrite for CompressedRasterEncoder<W>
where
    W: DerefMut<Target: AsyncWrite>,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut this = self.project();
        ready!(poll_drain(cx, this.writer, this.pending, this.pending_pos))?;

        let bytes_to_write = buf
            .len()
            .min(this.line_buffer.len() - *this.pos_in_line)
            .min((*this.bytes_remaining).min(usize::MAX as u64) as usize);
        if bytes_to_write == 0 {
            return Poll::Ready(Ok(0));
        }
        let pos = *this.pos_in_line;
        this.line_buffer[pos..pos + bytes_to_write].copy_from_slice(&buf[..bytes_to_write]);
        *this.pos_in_line += bytes_to_write;
        *this.bytes_remaining -= bytes_to_write as u64;

        if *this.pos_in_line == this.line_buffer.len() {
            *this.pos_in_line = 0;
            this.complete_line();
            // the bytes are accepted either way; a pending drain resumes on the next call
            if let Poll::Ready(Err(e)) =
                poll_drain(cx, this.writer, this.pending, this.pending_pos)
            {
                return Poll::Ready(Err(e));
            }
        }
        Poll::Ready(Ok(bytes_to_write))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        ready!(poll_drain(cx, this.writer, this.pending, this.pending_pos))?;
        this.writer.as_mut().poll_flush(cx)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        ready!(poll_drain(cx, this.writer, this.pending, this.pending_pos))?;
        this.writer.as_mut().poll_close(cx)
    }
}
