//! Columnar layout of decoded catalog lines

use polars::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::error::Result;
use crate::models::CatalogLineRecord;

/// Scalar columns in output order, before the quantum-number columns
pub const SCALAR_COLUMNS: &[&str] = &[
    "frequency",
    "uncertainty",
    "intensity",
    "s_ij_mu2",
    "a_ij",
    "lower_state_energy",
    "upper_state_energy",
    "lower_state_degeneracy",
    "upper_state_degeneracy",
    "pickett_qn_code",
    "rovibrational",
];

fn decimal_column(
    name: &str,
    records: &[CatalogLineRecord],
    value: impl Fn(&CatalogLineRecord) -> Decimal,
) -> Column {
    let values: Vec<f64> = records
        .iter()
        .map(|record| value(record).to_f64().unwrap_or(f64::NAN))
        .collect();
    Column::new(name.into(), values)
}

fn quantum_number_column(
    name: String,
    records: &[CatalogLineRecord],
    value: impl Fn(&CatalogLineRecord) -> Option<i32>,
) -> Column {
    let values: Vec<Option<i32>> = records.iter().map(value).collect();
    Column::new(name.into(), values)
}

/// Build a DataFrame with one row per catalog line
///
/// Quantum numbers become `upper_<label>` and `lower_<label>` integer
/// columns, in label order.
pub fn catalog_to_dataframe(records: &[CatalogLineRecord], labels: &[String]) -> Result<DataFrame> {
    let mut columns = vec![
        decimal_column("frequency", records, |r| r.frequency),
        decimal_column("uncertainty", records, |r| r.uncertainty),
        decimal_column("intensity", records, |r| r.intensity),
        Column::new(
            "s_ij_mu2".into(),
            records.iter().map(|r| r.s_ij_mu2).collect::<Vec<f64>>(),
        ),
        Column::new(
            "a_ij".into(),
            records.iter().map(|r| r.a_ij).collect::<Vec<f64>>(),
        ),
        decimal_column("lower_state_energy", records, |r| r.lower_state_energy),
        decimal_column("upper_state_energy", records, |r| r.upper_state_energy),
        Column::new(
            "lower_state_degeneracy".into(),
            records
                .iter()
                .map(|r| r.lower_state_degeneracy)
                .collect::<Vec<Option<u32>>>(),
        ),
        Column::new(
            "upper_state_degeneracy".into(),
            records
                .iter()
                .map(|r| r.upper_state_degeneracy)
                .collect::<Vec<u32>>(),
        ),
        Column::new(
            "pickett_qn_code".into(),
            records.iter().map(|r| r.pickett_qn_code).collect::<Vec<i32>>(),
        ),
        Column::new(
            "rovibrational".into(),
            records.iter().map(|r| r.rovibrational).collect::<Vec<bool>>(),
        ),
    ];

    for label in labels {
        columns.push(quantum_number_column(
            format!("upper_{label}"),
            records,
            |r| r.upper_state_qn.get(label),
        ));
    }
    for label in labels {
        columns.push(quantum_number_column(
            format!("lower_{label}"),
            records,
            |r| r.lower_state_qn.get(label),
        ));
    }

    let df = DataFrame::new(columns)?;
    debug!("Built catalog frame with shape {:?}", df.shape());
    Ok(df)
}
