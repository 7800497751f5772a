use crate::codec::{hex_to_bytes, resolve_escape_sequences};
use crate::types::TimerMode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Structured key-value record an action is persisted as.
pub type Record = serde_json::Map<String, Value>;

pub const DEFAULT_ICON: &str = "Play Property";
pub const DEFAULT_TIMER_INTERVAL_MS: i32 = 100;

const KEY_ICON: &str = "icon";
const KEY_TX_DATA: &str = "txData";
const KEY_EOL: &str = "eol";
const KEY_BINARY: &str = "binary";
const KEY_TITLE: &str = "title";
const KEY_TIMER_INTERVAL: &str = "timerIntervalMs";
const KEY_TIMER_MODE: &str = "timerMode";
const KEY_AUTO_EXECUTE: &str = "autoExecuteOnConnect";

/// Collapse internal whitespace runs to a single space and trim both ends.
pub fn simplified(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read `key` from `record`, falling back to `default` when the key is absent
/// or its value does not deserialize as `T`.
fn safe_read<T: DeserializeOwned>(record: &Record, key: &str, default: T) -> T {
    match record.get(key) {
        Some(value) => T::deserialize(value).unwrap_or(default),
        None => default,
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A user-defined command sent to the connected device.
///
/// `action_id` is fixed at construction; it is the key the project uses to
/// look the action up. Everything else is freely editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    action_id: i32,
    icon: String,
    title: String,
    tx_data: String,
    eol_sequence: String,
    binary_data: bool,
    timer_interval_ms: i32,
    timer_mode: TimerMode,
    auto_execute_on_connect: bool,
}

impl Action {
    pub fn new(action_id: i32) -> Self {
        Self {
            action_id,
            icon: DEFAULT_ICON.to_string(),
            title: String::new(),
            tx_data: String::new(),
            eol_sequence: String::new(),
            binary_data: false,
            timer_interval_ms: DEFAULT_TIMER_INTERVAL_MS,
            timer_mode: TimerMode::Off,
            auto_execute_on_connect: false,
        }
    }

    /// Build an action from a persisted record. Returns `None` for an empty record.
    pub fn from_record(action_id: i32, record: &Record) -> Option<Self> {
        let mut action = Self::new(action_id);
        action.read(record).then_some(action)
    }

    pub fn action_id(&self) -> i32 {
        self.action_id
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tx_data(&self) -> &str {
        &self.tx_data
    }

    pub fn eol_sequence(&self) -> &str {
        &self.eol_sequence
    }

    /// `true` when `tx_data` holds hex digits rather than text.
    pub fn binary_data(&self) -> bool {
        self.binary_data
    }

    pub fn timer_interval_ms(&self) -> i32 {
        self.timer_interval_ms
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn auto_execute_on_connect(&self) -> bool {
        self.auto_execute_on_connect
    }

    pub fn set_icon(&mut self, icon: &str) {
        self.icon = simplified(icon);
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = simplified(title);
    }

    pub fn set_tx_data(&mut self, tx_data: impl Into<String>) {
        self.tx_data = tx_data.into();
    }

    pub fn set_eol_sequence(&mut self, eol: impl Into<String>) {
        self.eol_sequence = eol.into();
    }

    pub fn set_binary_data(&mut self, binary: bool) {
        self.binary_data = binary;
    }

    /// Not validated: zero and negative intervals are stored as given.
    pub fn set_timer_interval_ms(&mut self, interval_ms: i32) {
        self.timer_interval_ms = interval_ms;
    }

    pub fn set_timer_mode(&mut self, mode: TimerMode) {
        self.timer_mode = mode;
    }

    pub fn set_auto_execute_on_connect(&mut self, enabled: bool) {
        self.auto_execute_on_connect = enabled;
    }

    /// The bytes to hand to the transport when this action fires.
    ///
    /// In binary mode `tx_data` is hex-decoded; otherwise its escape tokens are
    /// resolved and the text is UTF-8 encoded. A non-empty EOL sequence is
    /// always escape-resolved as text and appended.
    pub fn tx_bytes(&self) -> Vec<u8> {
        let mut bytes = if self.binary_data {
            hex_to_bytes(&self.tx_data)
        } else {
            resolve_escape_sequences(&self.tx_data).into_bytes()
        };

        if !self.eol_sequence.is_empty() {
            bytes.extend_from_slice(resolve_escape_sequences(&self.eol_sequence).as_bytes());
        }

        bytes
    }

    pub fn serialize(&self) -> Record {
        let mut record = Record::new();
        record.insert(KEY_ICON.into(), Value::from(simplified(&self.icon)));
        record.insert(KEY_TX_DATA.into(), Value::from(self.tx_data.clone()));
        record.insert(KEY_EOL.into(), Value::from(self.eol_sequence.clone()));
        record.insert(KEY_BINARY.into(), Value::from(self.binary_data));
        record.insert(KEY_TITLE.into(), Value::from(simplified(&self.title)));
        record.insert(KEY_TIMER_INTERVAL.into(), Value::from(self.timer_interval_ms));
        record.insert(KEY_TIMER_MODE.into(), Value::from(self.timer_mode.as_i64()));
        record.insert(KEY_AUTO_EXECUTE.into(), Value::from(self.auto_execute_on_connect));
        record
    }

    /// Load every field except `action_id` from `record`.
    ///
    /// Returns `false` and leaves the action untouched when the record is
    /// empty. Absent or mistyped keys take their defaults; an out-of-range
    /// timer mode becomes [`TimerMode::Off`].
    pub fn read(&mut self, record: &Record) -> bool {
        if record.is_empty() {
            return false;
        }

        self.eol_sequence = safe_read(record, KEY_EOL, String::new());
        self.tx_data = safe_read(record, KEY_TX_DATA, String::new());
        self.binary_data = safe_read(record, KEY_BINARY, false);
        self.timer_interval_ms =
            safe_read(record, KEY_TIMER_INTERVAL, DEFAULT_TIMER_INTERVAL_MS);
        self.icon = simplified(&safe_read(record, KEY_ICON, String::new()));
        self.title = simplified(&safe_read(record, KEY_TITLE, String::new()));
        self.auto_execute_on_connect = safe_read(record, KEY_AUTO_EXECUTE, false);

        let raw_mode = safe_read(record, KEY_TIMER_MODE, TimerMode::Off.as_i64());
        self.timer_mode = TimerMode::from_i64(raw_mode).unwrap_or_else(|| {
            warn!(
                action_id = self.action_id,
                timer_mode = raw_mode,
                "unknown timer mode, falling back to off"
            );
            TimerMode::Off
        });

        true
    }
}
