/// Slot key used by the enhanced agenda layout (records carry `updatedAt`).
pub const ENHANCED_STORAGE_KEY: &str = "enhanced_agenda_data";

/// Slot key used by the legacy agenda layout.
pub const LEGACY_STORAGE_KEY: &str = "agendaData";

/// Number of records returned by `upcoming` when no limit is given.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Largest image accepted for an agenda record (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Buffer size of each change notification channel.
pub const CHANGE_BUS_CAPACITY: usize = 64;
