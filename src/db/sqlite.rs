use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::{Client, ClientSummary, ImageRecord, Invoice, InvoiceItem, TokenRecord};
use crate::db::schema::SQLITE_INIT;
use crate::error::GatewayError;

pub type SqlitePool = Pool<Sqlite>;

/// Listing endpoints cap their result sets; the mobile client paginates
/// nothing, so this mirrors the monolith's hard limit.
const LIST_LIMIT: i64 = 50;

/// All database access for the gateway. Constructed once in `main` around an
/// explicitly injected pool and cloned into the router state (the pool is
/// internally reference-counted).
#[derive(Clone)]
pub struct PortalStorage {
    pool: SqlitePool,
}

impl PortalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        // execute statement by statement (sqlx::query rejects multi-commands)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ── Credential store (read-only) ────────────────────────────────

    pub async fn client_by_email(&self, email: &str) -> Result<Option<Client>, GatewayError> {
        let client = sqlx::query_as::<_, Client>(
            r#"SELECT id, firstname, lastname, email, password, phonenumber,
               address1, address2, city, state, postcode, country, companyname,
               status, datecreated
               FROM tblclients WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn client_by_id(&self, id: i64) -> Result<Option<Client>, GatewayError> {
        let client = sqlx::query_as::<_, Client>(
            r#"SELECT id, firstname, lastname, email, password, phonenumber,
               address1, address2, city, state, postcode, country, companyname,
               status, datecreated
               FROM tblclients WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientSummary>, GatewayError> {
        let rows = sqlx::query_as::<_, ClientSummary>(
            "SELECT id, firstname, lastname, email, status FROM tblclients ORDER BY id LIMIT ?",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ── Token store ─────────────────────────────────────────────────

    /// Upsert the session token keyed by client id. A second login for the
    /// same client overwrites the previous row, invalidating its token.
    /// Single statement, so concurrent logins cannot race into two rows.
    pub async fn upsert_token(
        &self,
        client_id: i64,
        token: &str,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        sqlx::query(
            r#"
            INSERT INTO api_tokens (client_id, token, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(client_id) DO UPDATE SET
                token = excluded.token,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(client_id)
        .bind(token)
        .bind(created_at.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Point lookup by token value. Expiry is checked by the caller so the
    /// comparison happens on parsed timestamps, not on text.
    pub async fn find_token(&self, token: &str) -> Result<Option<TokenRecord>, GatewayError> {
        let row = sqlx::query(
            "SELECT client_id, token, created_at, expires_at FROM api_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_token).transpose()
    }

    fn row_to_token(row: SqliteRow) -> Result<TokenRecord, GatewayError> {
        let client_id: i64 = row.try_get("client_id")?;
        let token: String = row.try_get("token")?;
        let created_str: String = row.try_get("created_at")?;
        let expires_str: String = row.try_get("expires_at")?;

        let created_at = parse_rfc3339(&created_str)?;
        let expires_at = parse_rfc3339(&expires_str)?;

        Ok(TokenRecord {
            client_id,
            token,
            created_at,
            expires_at,
        })
    }

    // ── Invoices (read-only) ────────────────────────────────────────

    pub async fn invoices_for_client(&self, client_id: i64) -> Result<Vec<Invoice>, GatewayError> {
        let rows = sqlx::query_as::<_, Invoice>(
            r#"SELECT id, invoicenum, date, duedate, subtotal, tax, tax2, total,
               status, paymentmethod, notes
               FROM tblinvoices WHERE userid = ? ORDER BY date DESC LIMIT ?"#,
        )
        .bind(client_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Invoice detail, scoped to its owner: a client can only fetch its own.
    pub async fn invoice_for_client(
        &self,
        client_id: i64,
        invoice_id: i64,
    ) -> Result<Option<Invoice>, GatewayError> {
        let row = sqlx::query_as::<_, Invoice>(
            r#"SELECT id, invoicenum, date, duedate, subtotal, tax, tax2, total,
               status, paymentmethod, notes
               FROM tblinvoices WHERE id = ? AND userid = ?"#,
        )
        .bind(invoice_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn invoice_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>, GatewayError> {
        let rows = sqlx::query_as::<_, InvoiceItem>(
            "SELECT id, description, amount, taxed FROM tblinvoiceitems WHERE invoiceid = ? ORDER BY id",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ── Uploaded files ──────────────────────────────────────────────

    /// Record an uploaded file. Returns the new row id.
    pub async fn insert_image(
        &self,
        filename: &str,
        original_name: &str,
        kind: &str,
        size: i64,
        path: &str,
    ) -> Result<i64, GatewayError> {
        let result = sqlx::query(
            r#"INSERT INTO images (filename, original_name, type, size, path, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(filename)
        .bind(original_name)
        .bind(kind)
        .bind(size)
        .bind(path)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn image_by_id(&self, id: i64) -> Result<Option<ImageRecord>, GatewayError> {
        let row = sqlx::query_as::<_, ImageRecord>(
            "SELECT id, filename, original_name, type, size, path, created_at FROM images WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_image(&self, id: i64) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, GatewayError> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(parsed)
}
