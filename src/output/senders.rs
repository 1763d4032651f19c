use log::{debug, error};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::utils::error::ProbeError;

pub trait ReportSender: Send + Sync {
    fn send(&self, report: &str) -> Result<(), ProbeError>;
    fn sender_type(&self) -> &str;
    fn destination(&self) -> &str;
}

pub struct ConsoleSender;

impl ReportSender for ConsoleSender {
    fn send(&self, report: &str) -> Result<(), ProbeError> {
        print!("{}", report);
        if !report.ends_with('\n') {
            println!();
        }
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "console"
    }

    fn destination(&self) -> &str {
        "stdout"
    }
}

pub struct FileSender {
    file_path: String,
    append: bool,
}

impl FileSender {
    pub fn new<P: AsRef<Path>>(file_path: P, append: bool) -> Self {
        Self {
            file_path: file_path.as_ref().to_string_lossy().to_string(),
            append,
        }
    }
}

impl ReportSender for FileSender {
    fn send(&self, report: &str) -> Result<(), ProbeError> {
        debug!("📝 Writing {} bytes to {}", report.len(), self.file_path);

        if let Some(parent) = Path::new(&self.file_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&self.file_path)
            .map_err(|e| {
                error!("❌ Failed to open file {}: {}", self.file_path, e);
                ProbeError::IoError(format!("File open error: {}", e))
            })?;

        file.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "file"
    }

    fn destination(&self) -> &str {
        &self.file_path
    }
}
