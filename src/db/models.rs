use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A customer account row from `tblclients`. Read-only from this process;
/// the `password` column holds the bcrypt hash written by the monolith and
/// is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub phonenumber: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub companyname: String,
    pub status: String,
    pub datecreated: String,
}

impl Client {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Projection used by the client listing. Deliberately excludes the
/// password hash column.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientSummary {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub status: String,
}

/// An active session row from `api_tokens`. At most one per client.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub client_id: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Invoice summary row, columns as the mobile client consumes them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub invoicenum: Option<String>,
    pub date: String,
    pub duedate: String,
    pub subtotal: f64,
    pub tax: f64,
    pub tax2: f64,
    pub total: f64,
    pub status: String,
    pub paymentmethod: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceItem {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub taxed: i64,
}

/// An uploaded-file row from `images`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ImageRecord {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub size: i64,
    pub path: String,
    pub created_at: String,
}
