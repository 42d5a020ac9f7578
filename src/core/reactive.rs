// Audio-reactive text toggle: one frequency bin thresholded into a
// solid/wireframe choice, passed through a coalescing debounce so noisy
// audio cannot flicker the mesh.

/// Index of the byte-frequency bin the toggle listens to.
pub const REACTIVE_BIN: usize = 8;
/// Amplitude (0..=255) at which the wireframe form is requested.
pub const REACTIVE_THRESHOLD: u8 = 128;
/// How long a requested value must stay current before it is applied.
pub const DEBOUNCE_WINDOW_MS: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextDisplay {
    Solid,
    Wireframe,
}

impl TextDisplay {
    #[inline]
    pub fn solid_visible(self) -> bool {
        matches!(self, TextDisplay::Solid)
    }

    #[inline]
    pub fn wireframe_visible(self) -> bool {
        matches!(self, TextDisplay::Wireframe)
    }
}

#[derive(Clone, Debug)]
struct Pending {
    value: TextDisplay,
    apply_at_ms: f64,
}

/// Debounced visibility flag. Exactly one of the two text forms is applied
/// at any instant; requests only take effect once they have been pending
/// for the full window.
///
/// Semantics: a request differing from the applied value arms a deadline;
/// repeated requests for the same pending value coalesce without extending
/// it; a request matching the applied value disarms any pending flip.
#[derive(Clone, Debug)]
pub struct DisplayToggle {
    applied: TextDisplay,
    pending: Option<Pending>,
    window_ms: f64,
}

impl DisplayToggle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            applied: TextDisplay::Solid,
            pending: None,
            window_ms,
        }
    }

    /// The currently applied form.
    pub fn applied(&self) -> TextDisplay {
        self.applied
    }

    pub fn request(&mut self, value: TextDisplay, now_ms: f64) {
        if value == self.applied {
            self.pending = None;
            return;
        }
        match &self.pending {
            Some(p) if p.value == value => {}
            _ => {
                self.pending = Some(Pending {
                    value,
                    apply_at_ms: now_ms + self.window_ms,
                });
            }
        }
    }

    /// Apply a pending request whose window has elapsed. Returns the newly
    /// applied form, if any.
    pub fn poll(&mut self, now_ms: f64) -> Option<TextDisplay> {
        match &self.pending {
            Some(p) if now_ms >= p.apply_at_ms => {
                self.applied = p.value;
                self.pending = None;
                Some(self.applied)
            }
            _ => None,
        }
    }

    /// Feed one frequency sample. `None` (no audio loaded yet) is a no-op.
    pub fn evaluate(&mut self, bin_amplitude: Option<u8>, now_ms: f64) -> Option<TextDisplay> {
        if let Some(amplitude) = bin_amplitude {
            let wanted = if amplitude >= REACTIVE_THRESHOLD {
                TextDisplay::Wireframe
            } else {
                TextDisplay::Solid
            };
            self.request(wanted, now_ms);
        }
        self.poll(now_ms)
    }
}
