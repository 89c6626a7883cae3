//! Reading proto entries out of jar and zip archives.
//!
//! Entries are read into memory; nothing is extracted to disk. The archive
//! handle is dropped before returning.

use std::{fs, io::Read, path::Path};

use protoplan_core::{Origin, PROTO_SUFFIX, ProtoFile};
use zip::ZipArchive;

use crate::{Error, Result};

pub(crate) fn read_archive(path: &Path, location: &str) -> Result<Vec<ProtoFile>> {
    let unreadable = |source| Error::Unreadable {
        location: location.to_string(),
        path: path.to_path_buf(),
        source,
    };
    let corrupt = |source| Error::CorruptArchive {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(unreadable)?;
    let mut archive = ZipArchive::new(file).map_err(corrupt)?;

    let mut files = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(corrupt)?;
        if entry.is_dir() || !entry.name().ends_with(PROTO_SUFFIX) {
            continue;
        }

        let name = entry.name().trim_start_matches('/').to_string();
        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(unreadable)?;

        let origin = Origin::Archive {
            archive: path.to_path_buf(),
            entry: name.clone(),
        };
        files.push(ProtoFile::new(name, origin, content));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    #[test]
    fn test_reads_proto_entries_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("geology.jar");

        let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
        zip.add_directory("squareup/geology/", SimpleFileOptions::default())
            .unwrap();
        zip.start_file("squareup/geology/period.proto", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"package squareup.geology;\nenum Period { CRETACEOUS = 1; }\n")
            .unwrap();
        zip.start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
        zip.finish().unwrap();

        let files = read_archive(&path, "geology.jar").unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].logical_path, "squareup/geology/period.proto");
        assert_eq!(files[0].types, vec!["squareup.geology.Period"]);
        assert_eq!(
            files[0].origin.to_string(),
            format!("{}!/squareup/geology/period.proto", path.display())
        );
    }

    #[test]
    fn test_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.zip");
        fs::write(&path, b"definitely not a zip").unwrap();

        let err = read_archive(&path, "broken.zip").unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
    }
}
