//! Transient centre-screen notice.
use bevy_ecs::prelude::*;

/// The message currently shown in the middle of the screen.
///
/// Every [`HudMessage::show`] returns a fresh token. A scheduled clear only
/// hides the text if the token still matches, so a newer message is never
/// wiped by an older timer.
#[derive(Resource, Debug, Clone, Default)]
pub struct HudMessage {
    text: Option<String>,
    token: u64,
}

impl HudMessage {
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.token += 1;
        self.text = Some(text.into());
        self.token
    }

    /// Hide the message shown with `token`. Stale tokens are ignored.
    pub fn clear(&mut self, token: u64) {
        if self.token == token {
            self.text = None;
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_clear_keeps_newer_message() {
        let mut hud = HudMessage::default();
        let first = hud.show("first");
        let second = hud.show("second");
        hud.clear(first);
        assert_eq!(hud.text(), Some("second"));
        hud.clear(second);
        assert_eq!(hud.text(), None);
    }
}
