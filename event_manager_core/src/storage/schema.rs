/// How rows of a table are addressed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Addressed by the integer identifier in the first column.
    PrimaryKey,
    /// Addressed by a unique name column (event_name).
    NaturalKey,
}

/// The closed set of tables the engine writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Event,
    Guest,
    Host,
    Band,
}

/// Static shape of one table. Only strings from a descriptor are ever
/// interpolated into statement text.
#[derive(Debug)]
pub struct TableDescriptor {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub key_column: usize,
    pub key_kind: KeyKind,
    pub depends_on_event: bool,
    pub ddl: &'static str,
}

/// Internal table tracking the highest identifier ever issued per table.
pub const KEY_SEQUENCE_TABLE: &str = "_key_sequence";

pub const KEY_SEQUENCE_DDL: &str = "CREATE TABLE IF NOT EXISTS _key_sequence (
    table_name TEXT PRIMARY KEY,
    last_key INTEGER NOT NULL
)";

static EVENT: TableDescriptor = TableDescriptor {
    name: "event",
    columns: &["id", "event_name", "address"],
    key_column: 1,
    key_kind: KeyKind::NaturalKey,
    depends_on_event: false,
    ddl: "CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY,
    event_name TEXT NOT NULL UNIQUE,
    address TEXT
)",
};

static GUEST: TableDescriptor = TableDescriptor {
    name: "guest",
    columns: &["id", "last_name", "first_name", "email", "birthday", "rsvp", "event_name"],
    key_column: 0,
    key_kind: KeyKind::PrimaryKey,
    depends_on_event: true,
    ddl: "CREATE TABLE IF NOT EXISTS guest (
    id INTEGER PRIMARY KEY,
    last_name TEXT,
    first_name TEXT,
    email TEXT,
    birthday TEXT,
    rsvp TEXT NOT NULL CHECK (rsvp IN ('GOING', 'NOT GOING')),
    event_name TEXT REFERENCES event(event_name)
)",
};

static HOST: TableDescriptor = TableDescriptor {
    name: "host",
    columns: &["id", "last_name", "first_name", "email", "birthday", "event_name"],
    key_column: 0,
    key_kind: KeyKind::PrimaryKey,
    depends_on_event: true,
    ddl: "CREATE TABLE IF NOT EXISTS host (
    id INTEGER PRIMARY KEY,
    last_name TEXT,
    first_name TEXT,
    email TEXT,
    birthday TEXT,
    event_name TEXT REFERENCES event(event_name)
)",
};

static BAND: TableDescriptor = TableDescriptor {
    name: "band",
    columns: &["id", "band_name", "email", "event_name"],
    key_column: 0,
    key_kind: KeyKind::PrimaryKey,
    depends_on_event: true,
    ddl: "CREATE TABLE IF NOT EXISTS band (
    id INTEGER PRIMARY KEY,
    band_name TEXT,
    email TEXT,
    event_name TEXT REFERENCES event(event_name)
)",
};

impl TableKind {
    /// All kinds, in entity-menu order.
    pub const ALL: [TableKind; 4] = [TableKind::Event, TableKind::Guest, TableKind::Host, TableKind::Band];

    pub fn descriptor(&self) -> &'static TableDescriptor {
        match self {
            TableKind::Event => &EVENT,
            TableKind::Guest => &GUEST,
            TableKind::Host => &HOST,
            TableKind::Band => &BAND,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Maps a 1-based entity menu index.
    pub fn from_menu_index(index: usize) -> Option<TableKind> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl TableDescriptor {
    /// Name of the column lookups match against.
    pub fn key_column_name(&self) -> &'static str {
        self.columns[self.key_column]
    }

    /// Resolves a column name to the descriptor's own static string.
    pub fn column(&self, name: &str) -> Option<&'static str> {
        self.columns.iter().copied().find(|c| *c == name)
    }

    /// Trigger that raises the `_key_sequence` mark inside the same INSERT
    /// statement that stores the row.
    pub fn key_sequence_trigger(&self) -> String {
        format!(
            "CREATE TRIGGER IF NOT EXISTS {name}_key_sequence AFTER INSERT ON {name}
BEGIN
    INSERT INTO {KEY_SEQUENCE_TABLE} (table_name, last_key) VALUES ('{name}', NEW.id)
    ON CONFLICT(table_name) DO UPDATE SET last_key = MAX(last_key, excluded.last_key);
END",
            name = self.name
        )
    }

    /// Columns an update may target: all but the identifier and the key.
    pub fn is_updatable(&self, column: &str) -> bool {
        match self.columns.iter().position(|c| *c == column) {
            Some(idx) => idx != 0 && idx != self.key_column,
            None => false,
        }
    }
}
