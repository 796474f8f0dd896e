//! One-shot enumeration mode: list hidraw device nodes and report them
//! to the parent as a single framed event, then exit.

use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::device::Handle;
use crate::framing;
use crate::proto::{event, DeviceEntry};

const DEV_DIR: &str = "/dev";
const DEV_PREFIX: &str = "hidraw";

/// Scan `/dev` and send the resulting device list on `events`.
pub fn run(events: impl AsFd) -> crate::Result<()> {
    let entries = scan(Path::new(DEV_DIR))?;
    tracing::info!(count = entries.len(), "enumerated hidraw devices");
    framing::send(events, &event::device_list(&entries))?;
    Ok(())
}

/// Collect every `hidraw*` node under `dir`, sorted by path, with the
/// product name the kernel reports for it. Nodes that cannot be opened
/// are logged and skipped so one dead entry does not abort the listing.
fn scan(dir: &Path) -> io::Result<Vec<DeviceEntry>> {
    let mut entries = Vec::new();
    for dirent in std::fs::read_dir(dir)? {
        let dirent = dirent?;
        let file_name = dirent.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(DEV_PREFIX) {
            continue;
        }
        let path = dirent.path();
        let product = match File::options()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&path)
        {
            Ok(file) => Handle::from(file).name().unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unopenable device node");
                continue;
            }
        };
        entries.push(DeviceEntry {
            path: path.display().to_string(),
            name: product,
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}
