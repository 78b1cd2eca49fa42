use crate::error::ExportError;
use crate::export::PlacementReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn export_json<P: AsRef<Path>>(report: &PlacementReport, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    write_report(&mut writer, report)?;

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })
}

fn write_report<W: Write>(writer: W, report: &PlacementReport) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
