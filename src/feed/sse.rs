//! Incremental server-sent-events frame decoder.
//!
//! The update stream is a long-lived `text/event-stream` response. Chunks
//! arrive at arbitrary boundaries, so the decoder buffers partial lines and
//! only dispatches complete, blank-line-terminated frames. Comment lines
//! (the server's heartbeats) and unknown fields are skipped.

/// One dispatched event frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// The `event:` field, if the frame named one.
    pub event: Option<String>,
    /// Joined `data:` payload.
    pub data: String,
}

/// Stateful decoder; feed it raw chunks, collect finished frames.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
    event: Option<String>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a transport chunk and returns every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut frames = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(frame) = self.flush() {
                    frames.push(frame);
                }
            } else {
                self.field(line);
            }
        }
        frames
    }

    fn field(&mut self, line: &str) {
        // A leading colon marks a comment (heartbeat).
        if line.starts_with(':') {
            return;
        }
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // id, retry, and anything else are irrelevant to this client.
            _ => {}
        }
    }

    fn flush(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let data_lines = std::mem::take(&mut self.data_lines);
        if data_lines.is_empty() {
            // Frames without data are not dispatched.
            return None;
        }
        Some(SseFrame {
            event,
            data: data_lines.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_named_event() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: inbox\ndata: [1,2]\n\n");
        assert_eq!(
            frames,
            vec![SseFrame {
                event: Some("inbox".to_string()),
                data: "[1,2]".to_string(),
            }]
        );
    }

    #[test]
    fn decodes_an_unnamed_event() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: []\n\n");
        assert_eq!(frames[0].event, None);
        assert_eq!(frames[0].data, "[]");
    }

    #[test]
    fn reassembles_frames_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: se").is_empty());
        assert!(decoder.push(b"nt\ndata: [\"a\"").is_empty());
        let frames = decoder.push(b"]\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event.as_deref(), Some("sent"));
        assert_eq!(frames[0].data, "[\"a\"]");
    }

    #[test]
    fn skips_heartbeat_comments() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b": heartbeat\n\n").is_empty());
        let frames = decoder.push(b": heartbeat\nevent: trash\ndata: []\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event.as_deref(), Some("trash"));
    }

    #[test]
    fn joins_multiple_data_lines() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: line1\ndata: line2\n\n");
        assert_eq!(frames[0].data, "line1\nline2");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: inbox\r\ndata: []\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event.as_deref(), Some("inbox"));
    }

    #[test]
    fn multiple_frames_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: a\ndata: 1\n\nevent: b\ndata: 2\n\n");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].event.as_deref(), Some("a"));
        assert_eq!(frames[1].event.as_deref(), Some("b"));
    }

    #[test]
    fn event_name_without_data_is_not_dispatched() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: lonely\n\n").is_empty());
    }
}
