use crate::entries::{JournalEntry, ReconcileConfig};
use crate::error::Result;
use crate::ledger::InterestRecord;
use std::io::Write;
use std::path::Path;

/// Column layout of the SIIGO voucher import template: 33 columns in file
/// order. The header text (including its double spaces) must match the
/// template the accounting system validates against.
pub const IMPORT_COLUMNS: [&str; 33] = [
    "TIPO DE COMPROBANTE (OBLIGATORIO)",
    "CÓDIGO COMPROBANTE  (OBLIGATORIO)",
    "NÚMERO DE DOCUMENTO",
    "CUENTA CONTABLE   (OBLIGATORIO)",
    "DÉBITO O CRÉDITO (OBLIGATORIO)",
    "VALOR DE LA SECUENCIA   (OBLIGATORIO)",
    "AÑO DEL DOCUMENTO",
    "MES DEL DOCUMENTO",
    "DÍA DEL DOCUMENTO",
    "CÓDIGO DEL VENDEDOR",
    "CÓDIGO DE LA CIUDAD",
    "CÓDIGO DE LA ZONA",
    "SECUENCIA",
    "CENTRO DE COSTO",
    "SUBCENTRO DE COSTO",
    "NIT",
    "SUCURSAL",
    "DESCRIPCIÓN DE LA SECUENCIA",
    "NÚMERO DE CHEQUE",
    "COMPROBANTE ANULADO",
    "CÓDIGO DEL MOTIVO DE DEVOLUCIÓN",
    "FORMA DE PAGO",
    "VALOR DEL CARGO 1 DE LA SECUENCIA",
    "VALOR DEL CARGO 2 DE LA SECUENCIA",
    "VALOR DEL DESCUENTO 1 DE LA SECUENCIA",
    "FACTURA ELECTRÓNICA A DEBITAR/ACREDITAR",
    "NÚMERO DE FACTURA ELECTRÓNICA A DEBITAR/ACREDITAR",
    "INGRESOS PARA TERCEROS",
    "BASE DE RETENCIÓN",
    "BASE PARA CUENTAS MARCADAS COMO RETEIVA",
    "SECUENCIA GRAVADA O EXCENTA",
    "VALOR TOTAL IMPOCONSUMO DE LA SECUENCIA",
    "CANTIDAD",
];

fn amount_field(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

fn entry_record(entry: &JournalEntry, config: &ReconcileConfig) -> Vec<String> {
    let s = |v: &str| v.to_string();
    vec![
        config.voucher_type.clone(),
        config.voucher_code.clone(),
        entry.document_number.to_string(),
        entry.account_code.clone(),
        s(entry.side.flag()),
        amount_field(entry.amount),
        entry.year.to_string(),
        entry.month.to_string(),
        entry.day.to_string(),
        s("0"), // vendor code
        s("0"), // city code
        s("0"), // zone code
        entry.sequence.to_string(),
        entry.cost_center.clone(),
        entry.sub_cost_center.clone(),
        entry.tax_id.clone(),
        s("0"), // branch
        entry.description.clone(),
        s(""), // check number
        s(entry.voided_flag),
        s(""),  // return-reason code
        s("0"), // payment method
        s("0"), // charge value 1
        s("0"), // charge value 2
        s("0"), // discount value 1
        s(""),  // e-invoice flag
        s(""),  // e-invoice number
        s(""),  // third-party income
        s("0"), // withholding base
        s(""),  // reteiva base
        s(""),  // taxed/exempt sequence
        s(""),  // consumption tax value
        s("0"), // quantity
    ]
}

/// Write the voucher import table for the accounting system.
pub fn write_import_file<W: Write>(
    writer: W,
    entries: &[JournalEntry],
    config: &ReconcileConfig,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(IMPORT_COLUMNS)?;
    for entry in entries {
        csv_writer.write_record(entry_record(entry, config))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_import_file_to_path(
    path: impl AsRef<Path>,
    entries: &[JournalEntry],
    config: &ReconcileConfig,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_import_file(file, entries, config)
}

/// Write the exceptions report: interest rows that no bank row reconciled.
pub fn write_exceptions_file<W: Write>(writer: W, rows: &[&InterestRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["fecha", "nit", "cuenta", "descripcion", "valor"])?;
    for row in rows {
        csv_writer.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.tax_id.clone(),
            row.account_code.clone(),
            row.description.clone(),
            amount_field(row.amount),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_exceptions_file_to_path(
    path: impl AsRef<Path>,
    rows: &[&InterestRecord],
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_exceptions_file(file, rows)
}
