use chrono::NaiveDate;
use serde::Serialize;

pub const ACTIVE_STATUS: &str = "Active";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRecord {
    pub id: Option<i64>,
    pub contract_number: Option<String>,
    pub contract_name: String,
    pub start_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub value: f64,
    pub status: String,
    pub notes: Option<String>,
}

impl Default for ContractRecord {
    fn default() -> Self {
        Self {
            id: None,
            contract_number: None,
            contract_name: String::new(),
            start_date: None,
            expiration_date: None,
            value: 0.0,
            status: ACTIVE_STATUS.to_string(),
            notes: None,
        }
    }
}
