use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// All bindable actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    PageUp,
    PageDown,

    // Domains
    Copy,

    // Query
    EnterSearch,
    ClearQuery,

    // UI
    ToggleHelp,
    CloseHelp,
    Quit,

    // Search mode specific
    SearchCancel,
    SearchConfirm,
    SearchBackspace,
    SearchDelete,
    SearchLeft,
    SearchRight,
    SearchHome,
    SearchEnd,
    SearchClear,
}

const ACTION_NAMES: &[(Action, &str)] = &[
    (Action::MoveUp, "move_up"),
    (Action::MoveDown, "move_down"),
    (Action::MoveTop, "move_top"),
    (Action::MoveBottom, "move_bottom"),
    (Action::PageUp, "page_up"),
    (Action::PageDown, "page_down"),
    (Action::Copy, "copy"),
    (Action::EnterSearch, "enter_search"),
    (Action::ClearQuery, "clear_query"),
    (Action::ToggleHelp, "toggle_help"),
    (Action::CloseHelp, "close_help"),
    (Action::Quit, "quit"),
    (Action::SearchCancel, "search_cancel"),
    (Action::SearchConfirm, "search_confirm"),
    (Action::SearchBackspace, "search_backspace"),
    (Action::SearchDelete, "search_delete"),
    (Action::SearchLeft, "search_left"),
    (Action::SearchRight, "search_right"),
    (Action::SearchHome, "search_home"),
    (Action::SearchEnd, "search_end"),
    (Action::SearchClear, "search_clear"),
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = ACTION_NAMES
            .iter()
            .find(|(action, _)| action == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown");
        write!(f, "{}", name)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        ACTION_NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(action, _)| *action)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Uppercase letters arrive with SHIFT set on some terminals and without
    /// it on others; the character itself already carries the case.
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::BackTab | KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("A");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };

        parts.push(&key_str);

        if parts.len() > 1 || key_str.len() > 1 {
            write!(f, "<{}>", parts.join("-"))
        } else {
            write!(f, "{}", key_str)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence(pub Vec<KeyBinding>);

impl KeySequence {
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }
}

/// Parse key sequence: "g", "gg", "<C-u>", "g g", etc.
impl FromStr for KeySequence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = Vec::new();
        let mut chars = s.trim().chars();

        while let Some(c) = chars.next() {
            match c {
                ' ' => continue,
                '<' => {
                    let mut bracket_content = String::from('<');
                    for next in chars.by_ref() {
                        bracket_content.push(next);
                        if next == '>' {
                            break;
                        }
                    }
                    keys.push(bracket_content.parse::<KeyBinding>()?);
                }
                c => keys.push(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            }
        }

        if keys.is_empty() {
            return Err("Empty key sequence".to_string());
        }

        if keys.len() > 2 {
            return Err("Key sequences longer than 2 are not supported".to_string());
        }

        Ok(KeySequence(keys))
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
            return parse_bracket_notation(inner);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            _ => Err(format!("Invalid key binding: {}", s)),
        }
    }
}

fn parse_bracket_notation(s: &str) -> Result<KeyBinding, String> {
    let parts: Vec<&str> = s.split('-').collect();

    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = "";

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            key_part = part;
        } else {
            match part.to_uppercase().as_str() {
                "C" | "CTRL" | "CONTROL" => modifiers |= KeyModifiers::CONTROL,
                "A" | "ALT" | "M" | "META" => modifiers |= KeyModifiers::ALT,
                "S" | "SHIFT" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "space" => Ok(KeyCode::Char(' ')),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "enter" | "return" | "cr" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "bs" | "backspace" => Ok(KeyCode::Backspace),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "del" | "delete" => Ok(KeyCode::Delete),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        lower if lower.starts_with('f') => {
            let n: u8 = lower[1..]
                .parse()
                .map_err(|_| format!("Invalid F key: {}", s))?;
            Ok(KeyCode::F(n))
        }
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookupResult {
    Action(Action),
    Pending,
    None,
}

#[derive(Debug, Clone)]
pub struct KeybindingCache {
    navigate_single: HashMap<KeyBinding, Action>,
    navigate_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>>,
    navigate_sequence_starters: HashSet<KeyBinding>,

    search_single: HashMap<KeyBinding, Action>,
}

impl KeybindingCache {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let mut navigate_single = HashMap::new();
        let mut navigate_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>> =
            HashMap::new();
        let mut navigate_sequence_starters = HashSet::new();
        let mut search_single = HashMap::new();

        for (seq, action) in parse_bindings(&config.navigate) {
            if seq.is_single() {
                navigate_single.insert(seq.0[0], action);
            } else {
                let first = seq.0[0];
                let second = seq.0[1];
                navigate_sequence_starters.insert(first);
                navigate_sequences
                    .entry(first)
                    .or_default()
                    .insert(second, action);
            }
        }

        for (seq, action) in parse_bindings(&config.search) {
            if seq.is_single() {
                search_single.insert(seq.0[0], action);
            }
        }

        Self {
            navigate_single,
            navigate_sequences,
            navigate_sequence_starters,
            search_single,
        }
    }

    pub fn lookup_navigate(&self, event: &KeyEvent, pending: Option<KeyBinding>) -> KeyLookupResult {
        let binding = KeyBinding::from_event(event);

        if let Some(first_key) = pending {
            return self
                .navigate_sequences
                .get(&first_key)
                .and_then(|second_map| second_map.get(&binding))
                .map_or(KeyLookupResult::None, |&action| KeyLookupResult::Action(action));
        }

        if self.navigate_sequence_starters.contains(&binding) {
            return KeyLookupResult::Pending;
        }

        if let Some(&action) = self.navigate_single.get(&binding) {
            return KeyLookupResult::Action(action);
        }

        KeyLookupResult::None
    }

    pub fn get_search_action(&self, event: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.search_single.get(&binding).copied()
    }

    /// First key notation bound to `action` in navigate mode, for help text.
    pub fn navigate_key_for(&self, action: Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .navigate_single
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.to_string())
            .collect();
        keys.sort();
        keys.into_iter().next()
    }
}

impl Default for KeybindingCache {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

fn parse_bindings(map: &HashMap<String, String>) -> impl Iterator<Item = (KeySequence, Action)> + '_ {
    map.iter().filter_map(|(key_str, action_str)| {
        match (key_str.parse::<KeySequence>(), action_str.parse::<Action>()) {
            (Ok(seq), Ok(action)) => Some((seq, action)),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(key = %key_str, action = %action_str, error = %e, "Ignoring keybinding");
                None
            }
        }
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_navigate_bindings")]
    pub navigate: HashMap<String, String>,

    #[serde(default = "default_search_bindings")]
    pub search: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            navigate: default_navigate_bindings(),
            search: default_search_bindings(),
        }
    }
}

impl KeybindingsConfig {
    /// Fill in every default binding the user did not override.
    pub fn merge_with_defaults(mut self) -> Self {
        for (key, action) in default_navigate_bindings() {
            self.navigate.entry(key).or_insert(action);
        }
        for (key, action) in default_search_bindings() {
            self.search.entry(key).or_insert(action);
        }
        self
    }
}

fn default_navigate_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("k".to_string(), "move_up".to_string());
    m.insert("j".to_string(), "move_down".to_string());
    m.insert("<Up>".to_string(), "move_up".to_string());
    m.insert("<Down>".to_string(), "move_down".to_string());
    m.insert("gg".to_string(), "move_top".to_string());
    m.insert("G".to_string(), "move_bottom".to_string());
    m.insert("<Home>".to_string(), "move_top".to_string());
    m.insert("<End>".to_string(), "move_bottom".to_string());
    m.insert("<PageUp>".to_string(), "page_up".to_string());
    m.insert("<PageDown>".to_string(), "page_down".to_string());
    m.insert("<Enter>".to_string(), "copy".to_string());
    m.insert("y".to_string(), "copy".to_string());
    m.insert("<Space>".to_string(), "copy".to_string());
    m.insert("/".to_string(), "enter_search".to_string());
    m.insert("<C-u>".to_string(), "clear_query".to_string());
    m.insert("?".to_string(), "toggle_help".to_string());
    m.insert("<Esc>".to_string(), "close_help".to_string());
    m.insert("q".to_string(), "quit".to_string());

    m
}

fn default_search_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("<Esc>".to_string(), "search_cancel".to_string());
    m.insert("<Enter>".to_string(), "search_confirm".to_string());
    m.insert("<BS>".to_string(), "search_backspace".to_string());
    m.insert("<Del>".to_string(), "search_delete".to_string());
    m.insert("<Left>".to_string(), "search_left".to_string());
    m.insert("<Right>".to_string(), "search_right".to_string());
    m.insert("<Home>".to_string(), "search_home".to_string());
    m.insert("<End>".to_string(), "search_end".to_string());
    m.insert("<C-u>".to_string(), "search_clear".to_string());
    m.insert("<Up>".to_string(), "move_up".to_string());
    m.insert("<Down>".to_string(), "move_down".to_string());

    m
}
