//! Core key event types shared by the arbiter, translator and renderer.
//!
//! Two layers of key representation live here:
//! * [`RawKeyEvent`]: the platform key-down exactly as the host delivered it
//!   (produced characters, characters ignoring modifiers, virtual key code,
//!   modifier flags). Borrowed for one callback and never retained.
//! * [`StructuredKey`]: the normalized logical key (token + modifier mask) the
//!   modal engine understands. Produced only for keys the engine grammar treats
//!   as special; ordinary text never becomes a `StructuredKey`.
//!
//! Logging guidance: consumers must not log `RawKeyEvent::characters`
//! verbatim. Lengths, key codes and the `Display` form of a `StructuredKey`
//! are safe to record.

use std::fmt;

pub mod key_codes;

bitflags::bitflags! {
    /// Platform modifier flags attached to a raw key-down.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u32 {
        const SHIFT       = 1 << 0;
        const CONTROL     = 1 << 1;
        const OPTION      = 1 << 2;
        const COMMAND     = 1 << 3;
        const CAPS_LOCK   = 1 << 4;
        const FUNCTION    = 1 << 5;
        const NUMERIC_PAD = 1 << 6;
    }
}

/// Platform key-down event as delivered to the editor surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// Text produced by the active layout / input method (may be empty).
    pub characters: String,
    /// Text the key would produce with no modifiers applied.
    pub characters_ignoring_modifiers: String,
    /// Platform virtual key code (see [`key_codes`]).
    pub key_code: u16,
    pub modifiers: KeyModifiers,
}

impl RawKeyEvent {
    pub fn new(
        characters: impl Into<String>,
        characters_ignoring_modifiers: impl Into<String>,
        key_code: u16,
        modifiers: KeyModifiers,
    ) -> Self {
        Self {
            characters: characters.into(),
            characters_ignoring_modifiers: characters_ignoring_modifiers.into(),
            key_code,
            modifiers,
        }
    }

    /// Unmodified key producing `text` (both character fields identical).
    pub fn plain(text: &str, key_code: u16) -> Self {
        Self::new(text, text, key_code, KeyModifiers::empty())
    }

    /// Same event with `modifiers` added.
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// True for intermediate dead-key steps: the layout produced no text yet and the
    /// composed result will arrive later as ordinary text input.
    pub fn is_dead_key(&self) -> bool {
        self.characters.is_empty()
    }

    /// Escape is recognized by its virtual key code; `characters` is unreliable for it
    /// under some layouts.
    pub fn is_escape(&self) -> bool {
        self.key_code == key_codes::ESCAPE
    }

    /// Produced character count (safe to log; the characters themselves are not).
    pub fn chars_len(&self) -> usize {
        self.characters.chars().count()
    }
}

bitflags::bitflags! {
    /// Modifier mask carried by a [`StructuredKey`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModMask: u16 { const CTRL=1; const ALT=2; const SHIFT=4; const SUPER=8; }
}

impl From<KeyModifiers> for ModMask {
    fn from(mods: KeyModifiers) -> Self {
        let mut out = ModMask::empty();
        if mods.contains(KeyModifiers::CONTROL) {
            out |= ModMask::CTRL;
        }
        if mods.contains(KeyModifiers::OPTION) {
            out |= ModMask::ALT;
        }
        if mods.contains(KeyModifiers::SHIFT) {
            out |= ModMask::SHIFT;
        }
        if mods.contains(KeyModifiers::COMMAND) {
            out |= ModMask::SUPER;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Tab,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

impl NamedKey {
    fn notation(self) -> String {
        match self {
            NamedKey::Enter => "CR".into(),
            NamedKey::Esc => "Esc".into(),
            NamedKey::Backspace => "BS".into(),
            NamedKey::Tab => "Tab".into(),
            NamedKey::F(n) => format!("F{n}"),
            NamedKey::Up => "Up".into(),
            NamedKey::Down => "Down".into(),
            NamedKey::Left => "Left".into(),
            NamedKey::Right => "Right".into(),
            NamedKey::Home => "Home".into(),
            NamedKey::End => "End".into(),
            NamedKey::PageUp => "PageUp".into(),
            NamedKey::PageDown => "PageDown".into(),
            NamedKey::Insert => "Insert".into(),
            NamedKey::Delete => "Del".into(),
        }
    }
}

/// Logical key identity: a character or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Named(NamedKey),
}

/// Normalized key handed to the modal engine. Exists only for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuredKey {
    pub token: KeyToken,
    pub mods: ModMask,
}

impl StructuredKey {
    pub fn new(token: KeyToken, mods: ModMask) -> Self {
        Self { token, mods }
    }

    pub fn named(key: NamedKey) -> Self {
        Self::new(KeyToken::Named(key), ModMask::empty())
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyToken::Char(c), ModMask::empty())
    }

    pub fn is_named(&self, key: NamedKey) -> bool {
        self.token == KeyToken::Named(key)
    }
}

/// Angle-bracket notation: `x`, `<Esc>`, `<C-d>`, `<D-S-Left>`.
impl fmt::Display for StructuredKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.token {
            KeyToken::Char(c) => c.to_string(),
            KeyToken::Named(n) => n.notation(),
        };
        let needs_brackets =
            !self.mods.is_empty() || matches!(self.token, KeyToken::Named(_));
        if !needs_brackets {
            return f.write_str(&base);
        }
        f.write_str("<")?;
        for (flag, prefix) in [
            (ModMask::CTRL, "C-"),
            (ModMask::ALT, "M-"),
            (ModMask::SUPER, "D-"),
            (ModMask::SHIFT, "S-"),
        ] {
            if self.mods.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        write!(f, "{base}>")
    }
}
