//! Status-line formatting and transient notices.

use std::time::{Duration, Instant};

use super::cursor::Hover;
use crate::source::LinkState;

/// How long a transient notice replaces the normal status text.
pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(3);

/// One-shot notice shown instead of the status text until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    text: String,
    expires_at: Instant,
}

impl TransientMessage {
    /// Notice posted at `now`, visible for [`MESSAGE_LIFETIME`].
    pub fn new(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            expires_at: now + MESSAGE_LIFETIME,
        }
    }

    /// Notice text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Instant after which the notice is no longer shown.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the notice is still visible at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Colour class of the status line; the view maps it to a concrete colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    /// No connection; retrying.
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Connected, display frozen.
    Paused,
    /// Connected and live.
    Connected,
    /// A transient notice is showing.
    Notice,
}

/// Everything the status line depends on.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    /// Link state of the source.
    pub link: LinkState,
    /// Whether the display is paused.
    pub paused: bool,
    /// Whether auto-scale is on.
    pub auto_scale: bool,
    /// Current throughput in kB/s.
    pub kbps: f64,
    /// Inspected sample, if any.
    pub hover: Option<Hover>,
    /// Pending notice, if any.
    pub message: Option<&'a TransientMessage>,
    /// Current time, for notice expiry.
    pub now: Instant,
}

/// Formatted status text and its tone.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    /// Text to display.
    pub text: String,
    /// Colour class.
    pub tone: StatusTone,
}

/// Build the status line.
///
/// An active notice replaces the whole line. Otherwise the line reads
/// `Status: <STATE> | Scale: <MODE> | Throughput: <x.y> kB/s`, with the
/// hovered value appended while inspecting.
pub fn format_status(ctx: &StatusContext<'_>) -> StatusLine {
    if let Some(message) = ctx.message.filter(|m| m.is_active(ctx.now)) {
        return StatusLine {
            text: message.text().to_string(),
            tone: StatusTone::Notice,
        };
    }

    let (state, tone) = match ctx.link {
        LinkState::Disconnected => ("DISCONNECTED (Retrying...)", StatusTone::Disconnected),
        LinkState::Connecting => ("CONNECTING", StatusTone::Connecting),
        LinkState::Connected if ctx.paused => ("PAUSED", StatusTone::Paused),
        LinkState::Connected => ("CONNECTED", StatusTone::Connected),
    };
    let scale = if ctx.auto_scale { "[AUTO]" } else { "[MANUAL]" };

    let mut text = format!(
        "Status: {state} | Scale: {scale} | Throughput: {:.1} kB/s",
        ctx.kbps
    );
    if let Some(hover) = ctx.hover {
        text.push_str(&format!(" | Value: {} @ {}", hover.value, hover.index));
    }

    StatusLine { text, tone }
}
