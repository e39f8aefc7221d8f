//! Minimal reader for Gradio's `call/{api}/{event_id}` event stream.

/// Terminal outcome of a Gradio call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CallOutcome {
    /// `event: complete`, with its `data` payload.
    Complete(String),
    /// `event: error`, with its `data` payload (often `null`).
    Error(String),
}

/// Scan an event-stream body for the first terminal event.
///
/// `generating` and `heartbeat` events are skipped. Multi-line `data`
/// fields are joined with `\n`. Returns `None` when the stream ended without
/// a terminal event.
pub(crate) fn terminal_event(body: &str) -> Option<CallOutcome> {
    let mut event = String::new();
    let mut data: Vec<&str> = Vec::new();

    // A trailing blank line flushes the last block.
    for line in body.lines().chain(std::iter::once("")) {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            let payload = data.join("\n");
            match event.as_str() {
                "complete" => return Some(CallOutcome::Complete(payload)),
                "error" => return Some(CallOutcome::Error(payload)),
                _ => {}
            }
            event.clear();
            data.clear();
            continue;
        }

        if let Some(value) = field(line, "event") {
            event = value.to_string();
        } else if let Some(value) = field(line, "data") {
            data.push(value);
        }
    }

    None
}

fn field<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
