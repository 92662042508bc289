//! Participant model.
//!
//! A participant is someone who answered an availability poll: a display
//! name (the unique key throughout the engine), an optional email kept for
//! diagnostics, a set of normal availability intervals, and a separate
//! "if needed" set usable only as a penalized fallback.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::{Interval, TimeSlot};

/// A poll respondent who can be assigned to shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name; unique key for assignments and hour totals.
    pub name: String,
    /// Contact address, diagnostic only.
    pub email: Option<String>,
    /// Windows in which the participant can normally work.
    pub availabilities: Vec<Interval>,
    /// Fallback-only windows, usable but penalized.
    pub if_needed: Vec<Interval>,
}

/// How a participant's declared availability covers a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// A normal availability interval fully contains the slot.
    Normal,
    /// Only an if-needed interval contains the slot.
    IfNeeded,
}

impl Participant {
    /// Creates a participant with no availability yet.
    ///
    /// Rejects empty names; the name keys the schedule output.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(Self {
            name,
            email: None,
            availabilities: Vec::new(),
            if_needed: Vec::new(),
        })
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a normal availability window.
    pub fn with_availability(mut self, interval: Interval) -> Self {
        self.availabilities.push(interval);
        self
    }

    /// Adds a fallback-only window.
    pub fn with_if_needed(mut self, interval: Interval) -> Self {
        self.if_needed.push(interval);
        self
    }

    /// Determines whether this participant can take a slot.
    ///
    /// Normal availability wins over if-needed when both contain the
    /// slot. Returns `None` when neither set fully contains it, in which
    /// case no decision variable is created for the pair.
    pub fn coverage(&self, slot: &TimeSlot) -> Option<Coverage> {
        if self
            .availabilities
            .iter()
            .any(|iv| iv.contains_range(slot.start, slot.end))
        {
            return Some(Coverage::Normal);
        }
        if self
            .if_needed
            .iter()
            .any(|iv| iv.contains_range(slot.start, slot.end))
        {
            return Some(Coverage::IfNeeded);
        }
        None
    }

    /// Whether the participant declared any window at all.
    pub fn has_any_availability(&self) -> bool {
        !self.availabilities.is_empty() || !self.if_needed.is_empty()
    }
}
