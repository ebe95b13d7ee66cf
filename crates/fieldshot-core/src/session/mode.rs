use std::fmt;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Entering project and equipment names.
    #[default]
    Form,
    /// Camera live, shutter enabled.
    Capture,
}

impl Mode {
    /// Lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Form => "form",
            Mode::Capture => "capture",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
