use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "intent,name,email,password,agreed,offering,quantity,link,amount,method";

/// Writes an intent script with the standard header plus the given rows.
pub fn write_script(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
