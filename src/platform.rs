//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key), Ctrl is accepted too
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Whether `modifiers` hold a shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(SHORTCUT_MODIFIER)
}

/// Export shortcut display
#[cfg(target_os = "macos")]
pub const EXPORT_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const EXPORT_SHORTCUT: &str = "^S";

/// Add medicine shortcut display
#[cfg(target_os = "macos")]
pub const ADD_MEDICINE_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const ADD_MEDICINE_SHORTCUT: &str = "^N";

/// Remove row shortcut display
#[cfg(target_os = "macos")]
pub const REMOVE_ROW_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_ROW_SHORTCUT: &str = "^D";
