//! Row types read from the community tables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Direction of a cash transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    /// Any other `tipe`; ignored when computing the balance.
    Other,
}

impl TransactionKind {
    /// Classify a raw `tipe` column value.
    ///
    /// The ledger stores Indonesian labels; English labels are accepted too.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Pemasukan" | "Income" => TransactionKind::Income,
            "Pengeluaran" | "Expense" => TransactionKind::Expense,
            _ => TransactionKind::Other,
        }
    }
}

/// One row of `transaksi_keuangan` (`select=tipe,nominal`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub tipe: String,
    /// PostgREST renders `numeric` columns as JSON numbers or strings
    /// depending on precision, so the raw value is kept.
    pub nominal: Value,
}

impl TransactionRow {
    /// Convenience constructor for a numeric amount.
    pub fn new(tipe: impl Into<String>, nominal: f64) -> Self {
        Self {
            tipe: tipe.into(),
            nominal: serde_json::json!(nominal),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_label(&self.tipe)
    }

    /// Parse `nominal` as a decimal number.
    pub fn amount(&self) -> Result<f64, StoreError> {
        let parsed = match &self.nominal {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(StoreError::MalformedRow(format!(
                "nominal {} is not a decimal number",
                self.nominal
            ))),
        }
    }
}

/// One row of `pengumuman` (`select=judul`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRow {
    pub judul: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_label() {
        assert_eq!(TransactionKind::from_label("Pemasukan"), TransactionKind::Income);
        assert_eq!(TransactionKind::from_label("Income"), TransactionKind::Income);
        assert_eq!(TransactionKind::from_label("Pengeluaran"), TransactionKind::Expense);
        assert_eq!(TransactionKind::from_label(" Expense "), TransactionKind::Expense);
        assert_eq!(TransactionKind::from_label("Transfer"), TransactionKind::Other);
        assert_eq!(TransactionKind::from_label("pemasukan"), TransactionKind::Other);
    }

    #[test]
    fn test_amount_from_number_and_string() {
        let row = TransactionRow::new("Pemasukan", 100000.0);
        assert_eq!(row.amount().unwrap(), 100000.0);

        let row = TransactionRow {
            tipe: "Pengeluaran".to_string(),
            nominal: json!("2500.50"),
        };
        assert_eq!(row.amount().unwrap(), 2500.5);
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        for nominal in [json!("seratus"), json!(null), json!(true), json!("NaN")] {
            let row = TransactionRow {
                tipe: "Pemasukan".to_string(),
                nominal,
            };
            assert!(matches!(row.amount(), Err(StoreError::MalformedRow(_))));
        }
    }

    #[test]
    fn test_rows_deserialize_from_postgrest_json() {
        let rows: Vec<TransactionRow> = serde_json::from_value(json!([
            {"tipe": "Pemasukan", "nominal": 100000},
            {"tipe": "Pengeluaran", "nominal": "30000"}
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind(), TransactionKind::Income);
        assert_eq!(rows[1].amount().unwrap(), 30000.0);

        let rows: Vec<AnnouncementRow> =
            serde_json::from_value(json!([{"judul": "Kerja Bakti"}])).unwrap();
        assert_eq!(rows[0].judul, "Kerja Bakti");
    }
}
