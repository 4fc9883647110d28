use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

use super::ModelValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Balance,
    Plyometrics,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Strength,
        Category::Cardio,
        Category::Flexibility,
        Category::Balance,
        Category::Plyometrics,
        Category::Sports,
        Category::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        use Category::*;
        match self {
            Strength => "strength",
            Cardio => "cardio",
            Flexibility => "flexibility",
            Balance => "balance",
            Plyometrics => "plyometrics",
            Sports => "sports",
            Other => "other",
        }
    }

    pub fn invalid_message() -> String {
        let choices = Self::ALL.map(|c| c.as_str()).join(", ");
        format!("Category must be one of: {choices}.")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case and surrounding whitespace are ignored
impl FromStr for Category {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ModelValidationError::new("Category is required."));
        }

        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ModelValidationError::new(Self::invalid_message()))
    }
}

#[cfg(feature = "backend")]
impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
