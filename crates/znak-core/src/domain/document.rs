use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A marked-goods introduction document, serialized with the CRPT wire
/// field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub doc_status: String,
    pub doc_type: String,
    pub import_request: bool,
    pub owner_inn: String,
    pub participant_inn: String,
    pub producer_inn: String,
    pub production_date: NaiveDate,
    pub production_type: String,
    pub products: Vec<Product>,
    pub reg_date: DateTime<Utc>,
    pub reg_number: String,
}

/// A single product line inside a [`Document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub certificate_document: String,
    pub certificate_document_date: NaiveDate,
    pub certificate_document_number: String,
    pub owner_inn: String,
    pub producer_inn: String,
    pub production_date: NaiveDate,
    pub tnved_code: String,
    pub uit_code: String,
    pub uitu_code: String,
}
