//! Key translation service: raw platform key-downs to structured keys.
//!
//! Only keys the modal engine grammar treats as *special* translate: named keys
//! (Escape, Return, arrows, function keys, ...) and printable keys held with a
//! command-style modifier. Everything that would produce ordinary text returns
//! `None` and is left to the host's text-input path (layouts, dead keys, input
//! methods).

mod key_token;

use core_events::{KeyToken, ModMask, RawKeyEvent, StructuredKey};
use key_token::{map_named_key, map_printable_chord};

/// Translate a raw key event into a [`StructuredKey`].
///
/// A `None` result is a normal outcome ("defer to host"), never an error.
pub trait KeyTranslationService {
    fn try_translate(&self, event: &RawKeyEvent) -> Option<StructuredKey>;
}

/// Default translator for the built-in platform key code table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecialKeyTranslator;

impl SpecialKeyTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyTranslationService for SpecialKeyTranslator {
    fn try_translate(&self, event: &RawKeyEvent) -> Option<StructuredKey> {
        let translated = if let Some(named) = map_named_key(event.key_code) {
            Some(StructuredKey::new(
                KeyToken::Named(named),
                ModMask::from(event.modifiers),
            ))
        } else {
            map_printable_chord(event).map(|(token, mods)| StructuredKey::new(token, mods))
        };
        match &translated {
            Some(key) => tracing::trace!(
                target: "input.translate",
                key_code = event.key_code,
                key = %key,
                "special_key"
            ),
            None => tracing::trace!(
                target: "input.translate",
                key_code = event.key_code,
                chars_len = event.chars_len(),
                "defer_to_text_input"
            ),
        }
        translated
    }
}

/// Plain closures can stand in for a translator (tests, embedders with their own
/// key tables).
impl<F> KeyTranslationService for F
where
    F: Fn(&RawKeyEvent) -> Option<StructuredKey>,
{
    fn try_translate(&self, event: &RawKeyEvent) -> Option<StructuredKey> {
        self(event)
    }
}
