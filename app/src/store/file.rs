use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use super::{validate_key, Error, Store};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A store keeping each key in its own `<key>.json` file inside one directory.
///
/// All file access goes through a capability handle on that directory, so nothing outside it can
/// be read or written. Writes go to a hidden temporary file next to the target which is then
/// renamed over it, so a reader never sees a partially written value.
#[derive(Debug)]
pub struct FileStore {
    dir: Dir,
    directory: PathBuf,
}

impl FileStore {
    /// Opens the store, creating `directory` if it does not exist yet.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();
        let dir = fs::create_dir_all(&directory)
            .and_then(|()| Dir::open_ambient_dir(&directory, ambient_authority()))
            .map_err(|source| Error::Io {
                path: directory.clone(),
                source,
            })?;
        Ok(Self { dir, directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn io_error(&self, name: &str) -> impl FnOnce(io::Error) -> Error {
        let path = self.directory.join(name);
        move |source| Error::Io { path, source }
    }
}

fn file_name(key: &str) -> Result<String, Error> {
    validate_key(key)?;
    Ok(format!("{}.json", key))
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let name = file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(&name)(source)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let name = file_name(key)?;
        let tmp_name = format!(
            ".{}.tmp.{}.{}",
            name,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        if let Err(source) = write_synced(&self.dir, &tmp_name, value) {
            // Best effort; the temporary file may not exist at all.
            let _ = self.dir.remove_file(&tmp_name);
            return Err(self.io_error(&tmp_name)(source));
        }
        if let Err(source) = self.dir.rename(&tmp_name, &self.dir, &name) {
            let _ = self.dir.remove_file(&tmp_name);
            return Err(self.io_error(&name)(source));
        }
        // Persisting the rename itself is best effort too.
        let _ = self.dir.open(".").and_then(|dir| dir.sync_all());
        Ok(())
    }
}

fn write_synced(dir: &Dir, name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
