//! Load batch solve requests from CSV
//!
//! Expected header: `Mode,PV,FV,PMT,EAR,YRS,Frequency`. EAR is a percentage
//! and the column of the unknown variable may be left empty.

use super::data::{SolveRequest, Unknown};
use super::fields::FieldValues;
use crate::error::TvmResult;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row; every column is kept as text so the unknown may be blank
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Mode")]
    mode: String,
    #[serde(rename = "PV", default)]
    pv: String,
    #[serde(rename = "FV", default)]
    fv: String,
    #[serde(rename = "PMT", default)]
    pmt: String,
    #[serde(rename = "EAR", default)]
    ear: String,
    #[serde(rename = "YRS", default)]
    yrs: String,
    #[serde(rename = "Frequency")]
    frequency: String,
}

impl CsvRow {
    fn to_request(self) -> TvmResult<SolveRequest> {
        let unknown: Unknown = self.mode.parse()?;

        let fields = FieldValues {
            pv: self.pv,
            fv: self.fv,
            pmt: self.pmt,
            ear: self.ear,
            yrs: self.yrs,
            frequency: self.frequency,
        };

        Ok(SolveRequest::new(unknown, fields.parse(unknown)?))
    }
}

/// One data row of a batch file
///
/// Rows whose fields do not parse keep their error so the batch can report
/// it next to the rows that solved.
#[derive(Debug, Clone)]
pub struct BatchRow {
    /// Data row number, starting at 1 below the header
    pub row: usize,
    /// Mode column as written
    pub mode: String,
    pub request: TvmResult<SolveRequest>,
}

/// Load all rows from a CSV file
///
/// Fails only when the file itself cannot be read as CSV.
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRow>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_requests(reader)
}

/// Load rows from any reader (e.g., string buffer, stdin)
pub fn load_requests_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<BatchRow>, Box<dyn Error>> {
    collect_requests(Reader::from_reader(reader))
}

fn collect_requests<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<BatchRow>, Box<dyn Error>> {
    let mut rows = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let record: CsvRow = result?;
        let row = idx + 1;
        let mode = record.mode.trim().to_string();
        let request = record.to_request();

        if let Err(e) = &request {
            log::debug!("Row {}: {}", row, e);
        }
        rows.push(BatchRow { row, mode, request });
    }

    log::debug!(
        "Loaded {} batch rows ({} unparseable)",
        rows.len(),
        rows.iter().filter(|r| r.request.is_err()).count()
    );
    Ok(rows)
}
