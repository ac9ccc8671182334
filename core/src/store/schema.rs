// kastelen/src/store/schema.rs

//! Table definitions. Each statement is idempotent so `migrate` can run on
//! every start.

pub(crate) const STATEMENTS: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    phone TEXT,
    password_hash TEXT NOT NULL,
    newsletter BOOLEAN NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
  )
  "#,
  r#"
  CREATE TABLE IF NOT EXISTS reservations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    castle_name TEXT NOT NULL,
    castle_slug TEXT NOT NULL,
    -- TEXT affinity keeps digit-only input such as "1030" a string.
    date TEXT NOT NULL,
    time TEXT,
    visitors INTEGER NOT NULL,
    visit_type TEXT NOT NULL,
    language TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    message TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users (id)
  )
  "#,
  r#"
  CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    castle_slug TEXT NOT NULL,
    castle_name TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users (id),
    UNIQUE (user_id, castle_slug)
  )
  "#,
  "CREATE INDEX IF NOT EXISTS idx_reservations_user_id ON reservations (user_id)",
  "CREATE INDEX IF NOT EXISTS idx_favorites_user_id ON favorites (user_id)",
];
