//! Shared constants used across the application

use std::time::Duration;

/// Service used when neither the command line nor the config file names one.
pub const DEFAULT_BASE_URL: &str = "https://moodbot-production.up.railway.app";

/// Maximum number of characters the composer accepts.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Counter switches to the warning tier above this many characters.
pub const COUNTER_WARNING_AFTER: usize = 700;

/// Counter switches to the critical tier above this many characters.
pub const COUNTER_CRITICAL_AFTER: usize = 900;

/// Composer height ceiling, in layout units.
pub const MAX_INPUT_HEIGHT_UNITS: u16 = 120;

/// Layout units occupied by one line of composer text. One terminal row.
pub const INPUT_LINE_UNITS: u16 = 20;

/// Delay between appending a transcript entry and pinning the view to the end.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Lifetime of the connectivity notification.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(10);

/// The single status glyph; colour carries the meaning.
pub const STATUS_GLYPH: &str = "●";
