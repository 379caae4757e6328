//! Recording and playback of canvas commands.

use crate::canvas::Canvas;
use crate::commands::CanvasCommand;
use crate::error::Result;

/// An explicit undo log.
///
/// Callers push the inverse commands returned by canvas operations while
/// recording. [`EventLog::replay`] applies them newest first, which undoes
/// the recorded operations. When replay happens while recording, the log
/// is refilled with the inverses replay produced, so the next replay
/// redoes.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<CanvasCommand>,
    recording: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the log and starts accepting commands.
    pub fn start_recording(&mut self) {
        self.events.clear();
        self.recording = true;
        tracing::debug!("Event recording started");
    }

    pub fn stop_recording(&mut self) {
        self.recording = false;
        tracing::debug!(events = self.events.len(), "Event recording stopped");
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Appends a command. Ignored unless recording.
    pub fn push(&mut self, command: CanvasCommand) {
        if self.recording {
            self.events.push(command);
        }
    }

    pub fn pop(&mut self) -> Option<CanvasCommand> {
        self.events.pop()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[CanvasCommand] {
        &self.events
    }

    /// Applies every recorded command newest first, then runs one canvas
    /// update. Returns the number of commands applied.
    ///
    /// On failure the commands not yet applied stay in the log.
    pub fn replay(&mut self, canvas: &mut Canvas) -> Result<usize> {
        let mut pending = std::mem::take(&mut self.events);
        let mut inverses = Vec::with_capacity(pending.len());

        while let Some(command) = pending.pop() {
            match canvas.apply(command.clone()) {
                Ok(inverse) => inverses.push(inverse),
                Err(e) => {
                    tracing::warn!(command = command.name(), "Playback stopped: {}", e);
                    pending.push(command);
                    self.events = pending;
                    return Err(e);
                }
            }
        }

        let applied = inverses.len();
        if self.recording {
            self.events = inverses;
        }
        canvas.update_now()?;
        tracing::debug!(applied, "Event log replayed");
        Ok(applied)
    }
}
