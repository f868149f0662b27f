use core_events::{KeyModifiers, KeyToken, ModMask, NamedKey, RawKeyEvent, key_codes};

/// Map a platform virtual key code onto a named key.
///
/// Returns `None` for every key that produces ordinary text (letters, digits,
/// punctuation, space) as well as codes we do not support.
pub(crate) fn map_named_key(key_code: u16) -> Option<NamedKey> {
    let named = match key_code {
        key_codes::ESCAPE => NamedKey::Esc,
        key_codes::RETURN | key_codes::KEYPAD_ENTER => NamedKey::Enter,
        key_codes::TAB => NamedKey::Tab,
        key_codes::DELETE => NamedKey::Backspace,
        key_codes::FORWARD_DELETE => NamedKey::Delete,
        key_codes::UP_ARROW => NamedKey::Up,
        key_codes::DOWN_ARROW => NamedKey::Down,
        key_codes::LEFT_ARROW => NamedKey::Left,
        key_codes::RIGHT_ARROW => NamedKey::Right,
        key_codes::HOME => NamedKey::Home,
        key_codes::END => NamedKey::End,
        key_codes::PAGE_UP => NamedKey::PageUp,
        key_codes::PAGE_DOWN => NamedKey::PageDown,
        key_codes::HELP => NamedKey::Insert,
        other => NamedKey::F(key_codes::function_key_ordinal(other)?),
    };
    Some(named)
}

/// Resolve the single base character of a printable chord.
///
/// CONTROL chords usually produce a C0 control character in `characters`, so the
/// base always comes from `characters_ignoring_modifiers`.
pub(crate) fn base_char(event: &RawKeyEvent) -> Option<char> {
    let mut chars = event.characters_ignoring_modifiers.chars();
    let c = chars.next()?;
    if chars.next().is_some() || c.is_control() {
        return None;
    }
    Some(c)
}

/// Decide whether a printable key carries a command-style modifier.
///
/// CONTROL and COMMAND always do. OPTION only counts when the layout did not turn
/// it into an alternate glyph (option-e producing a dead key, option-a producing `å`
/// are text, not chords).
pub(crate) fn is_command_chord(event: &RawKeyEvent) -> bool {
    let mods = event.modifiers;
    if mods.intersects(KeyModifiers::CONTROL | KeyModifiers::COMMAND) {
        return true;
    }
    mods.contains(KeyModifiers::OPTION)
        && event.characters == event.characters_ignoring_modifiers
}

/// Build the printable chord token + mask. SHIFT is dropped because the base char
/// already reflects it (`<C-D>` rather than `<C-S-D>`).
pub(crate) fn map_printable_chord(event: &RawKeyEvent) -> Option<(KeyToken, ModMask)> {
    if !is_command_chord(event) {
        return None;
    }
    let c = base_char(event)?;
    let mods = ModMask::from(event.modifiers) - ModMask::SHIFT;
    Some((KeyToken::Char(c), mods))
}
