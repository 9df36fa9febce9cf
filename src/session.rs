//! Chat session orchestration
//!
//! A [`Session`] owns the transcript for one conversation and drives the
//! exchange with the model backend: it validates input, snapshots the
//! history, calls the model, and records both sides of the exchange. A
//! single-slot in-flight guard rejects overlapping submissions instead of
//! queueing them, so one conversation never has two replies racing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, SahaayError};
use crate::location::Coordinates;
use crate::providers::GroundedModel;
use crate::transcript::{Transcript, Turn};

/// One live chat conversation bound to a model backend
pub struct Session {
    transcript: Mutex<Transcript>,
    model: Box<dyn GroundedModel>,
    coords: Option<Coordinates>,
    in_flight: AtomicBool,
}

/// Releases the in-flight slot when a submission ends, including when the
/// submit future is dropped mid-call.
struct SlotGuard<'a>(&'a AtomicBool);

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    /// Creates a session seeded with the welcome turn
    pub fn new(model: Box<dyn GroundedModel>, coords: Option<Coordinates>) -> Self {
        Self {
            transcript: Mutex::new(Transcript::with_welcome()),
            model,
            coords,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submits a user message and returns the assistant's reply
    ///
    /// The user turn is recorded before the model call and the reply right
    /// after it, keeping strict arrival order. The history handed to the
    /// model is the transcript as it stood before this submission; the new
    /// message travels separately. The transcript lock is never held across
    /// the model call.
    ///
    /// # Errors
    ///
    /// Returns [`SahaayError::EmptyMessage`] for blank input and
    /// [`SahaayError::Busy`] while a previous reply is still in flight.
    pub async fn submit(&self, input: &str) -> Result<Turn> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SahaayError::EmptyMessage.into());
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SahaayError::Busy.into());
        }
        let _slot = SlotGuard(&self.in_flight);

        let history = {
            let mut transcript = self.lock_transcript()?;
            let history = transcript.snapshot();
            transcript.append(Turn::user(text));
            history
        };

        let reply = self.model.converse(&history, text, self.coords).await;

        self.lock_transcript()?.append(reply.clone());
        Ok(reply)
    }

    /// Drops the current transcript and starts a fresh welcome-seeded one
    pub fn reset(&self) -> Result<()> {
        let mut transcript = self.lock_transcript()?;
        *transcript = Transcript::with_welcome();
        Ok(())
    }

    /// Owned copy of the turns recorded so far
    pub fn snapshot(&self) -> Vec<Turn> {
        self.transcript
            .lock()
            .map(|transcript| transcript.snapshot())
            .unwrap_or_default()
    }

    /// Number of recorded turns
    pub fn len(&self) -> usize {
        self.transcript
            .lock()
            .map(|transcript| transcript.len())
            .unwrap_or(0)
    }

    /// True when the transcript holds no turns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates the session was opened with, if any
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coords
    }

    /// Model identifier answering this session
    pub fn model_name(&self) -> String {
        self.model.model()
    }

    /// True while a reply is being generated
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn lock_transcript(&self) -> Result<MutexGuard<'_, Transcript>> {
        self.transcript
            .lock()
            .map_err(|_| SahaayError::Session("Transcript lock poisoned".to_string()).into())
    }
}
