//! Mode table definition
//!
//! Each mode fixes where data comes from (its [`Source`]), where it goes
//! (its [`Sink`]), the icon shown while it is active, and how long the
//! loop sleeps between polls. Source, sink and icon are properties of the
//! mode itself; the cyclic order and the poll intervals are configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::display::{icons, Image};

/// Number of operating modes
pub const MODE_COUNT: usize = 4;

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Nothing is read or sent; display and radio off
    Idle,
    /// Radio receive, forwarded to the serial link
    Relay,
    /// Local sensors, written to the serial link
    Log,
    /// Local sensors, sent over the radio
    Transmit,
}

impl Mode {
    /// All modes
    pub const ALL: [Mode; MODE_COUNT] = [Mode::Idle, Mode::Relay, Mode::Log, Mode::Transmit];

    /// Short lowercase name, as used in `modes.toml`
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Relay => "relay",
            Mode::Log => "log",
            Mode::Transmit => "transmit",
        }
    }

    /// Where this mode reads data from
    pub const fn source(self) -> Source {
        match self {
            Mode::Idle => Source::Nothing,
            Mode::Relay => Source::RadioReceive,
            Mode::Log | Mode::Transmit => Source::Sensors,
        }
    }

    /// Where this mode delivers data to
    pub const fn sink(self) -> Sink {
        match self {
            Mode::Idle => Sink::Discard,
            Mode::Relay | Mode::Log => Sink::Serial,
            Mode::Transmit => Sink::RadioSend,
        }
    }

    /// Icon shown while the mode is active (`None` blanks the display)
    pub const fn icon(self) -> Option<Image> {
        match self {
            Mode::Idle => None,
            Mode::Relay => Some(icons::HEART),
            Mode::Log => Some(icons::ARROW_S),
            Mode::Transmit => Some(icons::ARROW_E),
        }
    }
}

/// Data source of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// Never yields data
    Nothing,
    /// One record per poll from the accelerometer, magnetometer and clock
    Sensors,
    /// Next datagram from the radio, if one arrived
    RadioReceive,
}

impl Source {
    /// Check if this source needs the radio powered
    pub const fn uses_radio(self) -> bool {
        matches!(self, Source::RadioReceive)
    }
}

/// Data sink of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sink {
    /// Drops every payload
    Discard,
    /// Writes to the serial link
    Serial,
    /// Sends a radio datagram
    RadioSend,
}

impl Sink {
    /// Check if this sink needs the radio powered
    pub const fn uses_radio(self) -> bool {
        matches!(self, Sink::RadioSend)
    }

    /// Check if this sink needs the serial link initialised
    pub const fn uses_serial(self) -> bool {
        matches!(self, Sink::Serial)
    }
}

/// Fully resolved mode: what [`ModeTable`] hands out on mode entry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSpec {
    pub mode: Mode,
    pub icon: Option<Image>,
    pub source: Source,
    pub sink: Sink,
    pub interval_ms: u32,
}

impl ModeSpec {
    /// Resolve a mode with the given poll interval
    pub const fn new(mode: Mode, interval_ms: u32) -> Self {
        Self {
            mode,
            icon: mode.icon(),
            source: mode.source(),
            sink: mode.sink(),
            interval_ms,
        }
    }

    /// Check if either end of this mode is the radio
    pub const fn uses_radio(&self) -> bool {
        self.source.uses_radio() || self.sink.uses_radio()
    }

    /// Check if this mode writes to the serial link
    pub const fn uses_serial(&self) -> bool {
        self.sink.uses_serial()
    }
}

/// One configured mode: position in the cycle is its index in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeEntryConfig {
    pub mode: Mode,
    pub interval_ms: u32,
}

/// Mode table configuration, in button-press order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeTableConfig {
    pub modes: [ModeEntryConfig; MODE_COUNT],
}

impl ModeTableConfig {
    /// idle → relay → log → transmit
    pub const CANONICAL: Self = Self {
        modes: [
            ModeEntryConfig { mode: Mode::Idle, interval_ms: 50 },
            ModeEntryConfig { mode: Mode::Relay, interval_ms: 5 },
            ModeEntryConfig { mode: Mode::Log, interval_ms: 10 },
            ModeEntryConfig { mode: Mode::Transmit, interval_ms: 30 },
        ],
    };
}

impl Default for ModeTableConfig {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Mode table validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The cycle must start in idle
    FirstModeNotIdle(Mode),
    /// A mode appears more than once
    DuplicateMode(Mode),
    /// A poll interval of zero would spin the loop
    ZeroInterval(Mode),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::FirstModeNotIdle(m) => {
                write!(f, "first mode must be idle, found {}", m.name())
            }
            ConfigError::DuplicateMode(m) => write!(f, "mode {} listed more than once", m.name()),
            ConfigError::ZeroInterval(m) => write!(f, "mode {} has a zero interval_ms", m.name()),
        }
    }
}

/// Validated, ordered mode table
///
/// Holds each of the four modes exactly once, Idle first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeTable {
    specs: [ModeSpec; MODE_COUNT],
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ModeTable {
    /// The canonical table (see [`ModeTableConfig::CANONICAL`])
    pub const fn canonical() -> Self {
        Self::build(&ModeTableConfig::CANONICAL)
    }

    /// Validate a configuration and build the table from it
    pub fn from_config(config: &ModeTableConfig) -> Result<Self, ConfigError> {
        let first = config.modes[0].mode;
        if first != Mode::Idle {
            return Err(ConfigError::FirstModeNotIdle(first));
        }

        for (i, entry) in config.modes.iter().enumerate() {
            if entry.interval_ms == 0 {
                return Err(ConfigError::ZeroInterval(entry.mode));
            }
            if config.modes[..i].iter().any(|e| e.mode == entry.mode) {
                return Err(ConfigError::DuplicateMode(entry.mode));
            }
        }

        // Four distinct entries drawn from four modes cover every mode.
        Ok(Self::build(config))
    }

    const fn build(config: &ModeTableConfig) -> Self {
        let m = &config.modes;
        Self {
            specs: [
                ModeSpec::new(m[0].mode, m[0].interval_ms),
                ModeSpec::new(m[1].mode, m[1].interval_ms),
                ModeSpec::new(m[2].mode, m[2].interval_ms),
                ModeSpec::new(m[3].mode, m[3].interval_ms),
            ],
        }
    }

    /// The mode entered at boot
    pub fn first(&self) -> &ModeSpec {
        &self.specs[0]
    }

    /// The mode after `current` in cyclic order; the first mode for `None`
    pub fn next_after(&self, current: Option<Mode>) -> &ModeSpec {
        match current.and_then(|m| self.position(m)) {
            Some(i) => &self.specs[(i + 1) % MODE_COUNT],
            None => self.first(),
        }
    }

    /// Look up a mode
    pub fn get(&self, mode: Mode) -> Option<&ModeSpec> {
        self.position(mode).map(|i| &self.specs[i])
    }

    /// Modes in cyclic order
    pub fn iter(&self) -> impl Iterator<Item = &ModeSpec> {
        self.specs.iter()
    }

    fn position(&self, mode: Mode) -> Option<usize> {
        self.specs.iter().position(|s| s.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(modes: [(Mode, u32); MODE_COUNT]) -> ModeTableConfig {
        ModeTableConfig {
            modes: modes.map(|(mode, interval_ms)| ModeEntryConfig { mode, interval_ms }),
        }
    }

    #[test]
    fn test_canonical_validates() {
        let table = ModeTable::from_config(&ModeTableConfig::CANONICAL).unwrap();
        assert_eq!(table, ModeTable::canonical());
    }

    #[test]
    fn test_canonical_order_and_intervals() {
        let table = ModeTable::canonical();
        let order: Vec<(Mode, u32)> = table.iter().map(|s| (s.mode, s.interval_ms)).collect();
        assert_eq!(
            order,
            vec![
                (Mode::Idle, 50),
                (Mode::Relay, 5),
                (Mode::Log, 10),
                (Mode::Transmit, 30)
            ]
        );
    }

    #[test]
    fn test_next_after_wraps() {
        let table = ModeTable::canonical();
        assert_eq!(table.next_after(None).mode, Mode::Idle);
        assert_eq!(table.next_after(Some(Mode::Idle)).mode, Mode::Relay);
        assert_eq!(table.next_after(Some(Mode::Relay)).mode, Mode::Log);
        assert_eq!(table.next_after(Some(Mode::Log)).mode, Mode::Transmit);
        assert_eq!(table.next_after(Some(Mode::Transmit)).mode, Mode::Idle);
    }

    #[test]
    fn test_alternate_order() {
        let cfg = config([
            (Mode::Idle, 50),
            (Mode::Log, 10),
            (Mode::Transmit, 30),
            (Mode::Relay, 5),
        ]);
        let table = ModeTable::from_config(&cfg).unwrap();
        assert_eq!(table.next_after(Some(Mode::Transmit)).mode, Mode::Relay);
        assert_eq!(table.next_after(Some(Mode::Relay)).mode, Mode::Idle);
    }

    #[test]
    fn test_rejects_non_idle_first() {
        let cfg = config([
            (Mode::Log, 10),
            (Mode::Idle, 50),
            (Mode::Relay, 5),
            (Mode::Transmit, 30),
        ]);
        assert_eq!(
            ModeTable::from_config(&cfg),
            Err(ConfigError::FirstModeNotIdle(Mode::Log))
        );
    }

    #[test]
    fn test_rejects_duplicate() {
        let cfg = config([
            (Mode::Idle, 50),
            (Mode::Log, 10),
            (Mode::Log, 10),
            (Mode::Transmit, 30),
        ]);
        assert_eq!(
            ModeTable::from_config(&cfg),
            Err(ConfigError::DuplicateMode(Mode::Log))
        );
    }

    #[test]
    fn test_rejects_zero_interval() {
        let cfg = config([
            (Mode::Idle, 50),
            (Mode::Relay, 0),
            (Mode::Log, 10),
            (Mode::Transmit, 30),
        ]);
        assert_eq!(
            ModeTable::from_config(&cfg),
            Err(ConfigError::ZeroInterval(Mode::Relay))
        );
    }

    #[test]
    fn test_capabilities() {
        let table = ModeTable::canonical();
        let idle = table.get(Mode::Idle).unwrap();
        assert!(!idle.uses_radio() && !idle.uses_serial() && idle.icon.is_none());

        let relay = table.get(Mode::Relay).unwrap();
        assert!(relay.uses_radio() && relay.uses_serial());

        let log = table.get(Mode::Log).unwrap();
        assert!(!log.uses_radio() && log.uses_serial());

        let tx = table.get(Mode::Transmit).unwrap();
        assert!(tx.uses_radio() && !tx.uses_serial());
    }
}
