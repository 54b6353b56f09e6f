//! SQL DDL for the portal tables the gateway touches.
//!
//! Table and column names mirror the monolith schema the gateway shares in
//! production; `CREATE TABLE IF NOT EXISTS` keeps this a no-op against an
//! already-provisioned database while letting tests and dev start from an
//! empty file.

/// SQLite schema:
/// - `tblclients` / `tblinvoices` / `tblinvoiceitems` are owned by the
///   monolith and read-only from this process.
/// - `api_tokens` is owned by the gateway. `client_id` is the primary key,
///   which is what enforces the single-active-session invariant: a re-login
///   upserts over the previous row.
/// - `images` records upload side effects.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS tblclients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstname TEXT NOT NULL DEFAULT '',
    lastname TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    phonenumber TEXT NOT NULL DEFAULT '',
    address1 TEXT NOT NULL DEFAULT '',
    address2 TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT '',
    postcode TEXT NOT NULL DEFAULT '',
    country TEXT NOT NULL DEFAULT '',
    companyname TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'Active',
    datecreated TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS api_tokens (
    client_id INTEGER PRIMARY KEY,
    token TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_api_tokens_token ON api_tokens(token);

CREATE TABLE IF NOT EXISTS tblinvoices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    userid INTEGER NOT NULL,
    invoicenum TEXT NULL,
    date TEXT NOT NULL DEFAULT '',
    duedate TEXT NOT NULL DEFAULT '',
    subtotal REAL NOT NULL DEFAULT 0,
    tax REAL NOT NULL DEFAULT 0,
    tax2 REAL NOT NULL DEFAULT 0,
    total REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'Unpaid',
    paymentmethod TEXT NULL,
    notes TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_tblinvoices_userid ON tblinvoices(userid);

CREATE TABLE IF NOT EXISTS tblinvoiceitems (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    invoiceid INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    amount REAL NOT NULL DEFAULT 0,
    taxed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_tblinvoiceitems_invoiceid ON tblinvoiceitems(invoiceid);

CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    original_name TEXT NOT NULL,
    type TEXT NOT NULL,
    size INTEGER NOT NULL,
    path TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;
