use crate::error::ExportError;
use crate::export::PlacementRecord;
use std::fs::File;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(records: &[PlacementRecord], path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    write_records(&mut writer, records)?;

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[PlacementRecord],
) -> Result<(), ExportError> {
    writer.write_record([
        "Kind", "Element ID", "Wall ID", "Link ID", "Level ID", "Level", "X", "Y", "Z", "Width",
        "Height",
    ])?;

    for record in records {
        writer.write_record([
            &record.kind.to_string(),
            &record.element_id.to_string(),
            &record.wall_id.to_string(),
            &record.link_id.map(|id| id.to_string()).unwrap_or_default(),
            &record.level_id.to_string(),
            &record.level_name,
            &record.x.to_string(),
            &record.y.to_string(),
            &record.z.to_string(),
            &record.width.to_string(),
            &record.height.to_string(),
        ])?;
    }

    Ok(())
}
