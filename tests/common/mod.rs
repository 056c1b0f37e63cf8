use smeltbench::infrastructure::locator::LogFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a harness log with some noise around the sentinel row.
pub fn write_log(dir: &Path, file: &LogFile, fields: &[&str]) -> PathBuf {
    let path = file.path(dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let row = std::iter::once("||")
        .chain(fields.iter().copied())
        .collect::<Vec<_>>()
        .join("\t");
    fs::write(&path, format!("# harness output\n{file_name}\n{row}\ndone\n", file_name = file.file_name()))
        .unwrap();
    path
}

/// Right-aligned `%10.3f` rendering of a raw cycle count.
#[allow(dead_code)]
pub fn padded(value: f64) -> String {
    format!("{:10.3}", value)
}
