use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    Shopping,
    Education,
    Insurance,
    Salary,
    Investment,
    #[default]
    Other,
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionCategory::Food => "food",
            TransactionCategory::Transport => "transport",
            TransactionCategory::Entertainment => "entertainment",
            TransactionCategory::Utilities => "utilities",
            TransactionCategory::Healthcare => "healthcare",
            TransactionCategory::Shopping => "shopping",
            TransactionCategory::Education => "education",
            TransactionCategory::Insurance => "insurance",
            TransactionCategory::Salary => "salary",
            TransactionCategory::Investment => "investment",
            TransactionCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TransactionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(TransactionCategory::Food),
            "transport" => Ok(TransactionCategory::Transport),
            "entertainment" => Ok(TransactionCategory::Entertainment),
            "utilities" => Ok(TransactionCategory::Utilities),
            "healthcare" => Ok(TransactionCategory::Healthcare),
            "shopping" => Ok(TransactionCategory::Shopping),
            "education" => Ok(TransactionCategory::Education),
            "insurance" => Ok(TransactionCategory::Insurance),
            "salary" => Ok(TransactionCategory::Salary),
            "investment" => Ok(TransactionCategory::Investment),
            "other" => Ok(TransactionCategory::Other),
            _ => Err(format!("Invalid transaction category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Always non-negative; direction comes from `kind`.
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub category: TransactionCategory,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    pub account: String,
    pub tags: Vec<String>,
    pub recurring: bool,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: amount.abs(),
            currency: "USD".to_string(),
            description: description.into(),
            category: TransactionCategory::default(),
            kind,
            date,
            account: "default".to_string(),
            tags: Vec::new(),
            recurring: false,
        }
    }
}
