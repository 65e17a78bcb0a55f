use serde_json::Value;

use crate::ApiError;

/// What a save is meant to do; scheduling has stricter requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIntent {
    /// Store edits without changing publication.
    Update,
    /// Schedule or publish for the public site.
    Schedule,
}

/// A view-model that can be edited in place and sent back to the server.
pub trait Editable: Sized {
    fn from_raw(raw: &Value) -> Self;
    /// The whole-resource body the write endpoint accepts.
    fn to_json(&self) -> Value;
    fn validate(&self, intent: SaveIntent) -> Result<(), ApiError>;
}

/// Edit buffer around an [`Editable`] model.
///
/// Holds the last-saved server representation so edits can be discarded,
/// and the error of the last rejected save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<M> {
    model: M,
    snapshot: Value,
    save_error: Option<ApiError>,
}

impl<M: Editable> EditSession<M> {
    pub fn new(raw: &Value) -> Self {
        Self {
            model: M::from_raw(raw),
            snapshot: raw.clone(),
            save_error: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    pub fn save_error(&self) -> Option<&ApiError> {
        self.save_error.as_ref()
    }

    /// True when the buffer would serialize differently from the last save.
    pub fn is_dirty(&self) -> bool {
        self.model.to_json() != M::from_raw(&self.snapshot).to_json()
    }

    /// Discards in-progress edits.
    pub fn reset(&mut self) {
        self.model = M::from_raw(&self.snapshot);
        self.save_error = None;
    }

    /// Validates and returns the body to submit. A failed check is recorded
    /// on the session and nothing should be sent.
    pub fn begin_save(&mut self, intent: SaveIntent) -> Result<Value, ApiError> {
        match self.model.validate(intent) {
            Ok(()) => {
                self.save_error = None;
                Ok(self.model.to_json())
            }
            Err(err) => {
                self.save_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Applies the server's answer. On success the buffer is rebuilt from the
    /// canonical representation; on failure the edits are kept.
    pub fn finish_save(&mut self, result: Result<Value, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(canonical) => {
                self.model = M::from_raw(&canonical);
                self.snapshot = canonical;
                self.save_error = None;
                Ok(())
            }
            Err(err) => {
                self.save_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
