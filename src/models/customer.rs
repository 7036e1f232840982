use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Raw `POST /customers` form.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub collateral: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub collateral: Option<String>,
}

impl From<CustomerForm> for NewCustomer {
    fn from(form: CustomerForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            phone: form.phone,
            collateral: form
                .collateral
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

/// Customer as listed; `collateral` is `"N/A"` when none was recorded.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub collateral: String,
}

/// Entry in the customer picker of the loan form.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, PartialEq, Eq)]
pub struct CustomerOption {
    pub id: i64,
    pub name: String,
}
