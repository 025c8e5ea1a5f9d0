use serde::{Deserialize, Serialize};

/// A supply item owned by one classroom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[cfg_attr(feature = "database", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub id: i32,
    pub name: String,
    pub category: String,
    /// `left`, `right` or `any`
    pub handed: String,
}
