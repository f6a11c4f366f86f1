//! Incremental decoder for `text/event-stream` frames.
//!
//! Only the subset of the format used by the notification stream is
//! handled: `data:` lines are collected, comment lines and fields we do
//! not consume (`event:`, `id:`, `retry:`) are skipped, and a blank
//! line dispatches the frame. Frames may arrive split across arbitrary
//! chunk boundaries, so the decoder buffers until a full frame is
//! present.

use bytes::BytesMut;

/// Byte range of one complete frame inside the buffer.
struct FrameBoundary {
    /// Length of the frame content, excluding the terminating blank line.
    content: usize,
    /// Total bytes to discard from the buffer, including the blank line.
    consumed: usize,
}

/// Incremental `text/event-stream` frame decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: BytesMut,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes received from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete frame's `data` payload, if one is buffered.
    ///
    /// Returns `None` until a frame terminator has been received. Frames
    /// without any `data:` line yield an empty string; callers skip
    /// those.
    pub fn next_frame(&mut self) -> Option<String> {
        let boundary = find_frame_boundary(&self.buf)?;
        let frame = self.buf.split_to(boundary.consumed);
        let text = String::from_utf8_lossy(&frame[..boundary.content]);

        let mut data_lines = Vec::new();
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("data:") {
                data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
            }
        }
        Some(data_lines.join("\n"))
    }
}

/// Find the first blank line terminating a frame.
fn find_frame_boundary(buf: &[u8]) -> Option<FrameBoundary> {
    let mut line_start = 0;
    for (i, byte) in buf.iter().enumerate() {
        if *byte != b'\n' {
            continue;
        }
        let mut line = &buf[line_start..i];
        if let [rest @ .., b'\r'] = line {
            line = rest;
        }
        if line.is_empty() {
            return Some(FrameBoundary {
                content: line_start,
                consumed: i + 1,
            });
        }
        line_start = i + 1;
    }
    None
}
