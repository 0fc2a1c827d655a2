use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use chrono::NaiveDateTime;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub struct BackupLogic;

impl BackupLogic {
    /// Write the whole document as JSON, optionally zip-compressed.
    /// Returns the path of the file produced.
    pub fn backup<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        dest_file: &str,
        compress: bool,
        now: NaiveDateTime,
    ) -> AppResult<PathBuf> {
        actor.require_manager()?;

        // the audit line is part of the backup
        repo.log_action(
            "BACKUP_DOWNLOAD",
            actor.id(),
            Some("Downloaded full system backup"),
            now,
        )?;
        let json = repo.export_json()?;

        let dest = Path::new(dest_file);
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            compress_backup(dest, json.as_bytes())?
        } else {
            fs::write(dest, &json)?;
            dest.to_path_buf()
        };

        success(format!("Backup created: {}", final_path.display()));
        Ok(final_path)
    }

    /// Replace the stored document with a backup (`.json` or `.zip`).
    pub fn restore<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        src_file: &str,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        actor.require_manager()?;

        let src = Path::new(src_file);
        if !src.exists() {
            return Err(AppError::not_found("Backup file", src_file));
        }

        let raw = if is_zip(src) {
            read_from_zip(src)?
        } else {
            fs::read_to_string(src)?
        };

        repo.import_json(&raw)?;
        repo.log_action(
            "RESTORE",
            actor.id(),
            Some(&format!("Restored backup {}", src.display())),
            now,
        )?;
        success(format!("Data restored from {}", src.display()));
        Ok(())
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Compress the backup into `<dest>.zip`, one JSON entry inside.
fn compress_backup(dest: &Path, json: &[u8]) -> AppResult<PathBuf> {
    let zip_path = dest.with_extension("zip");
    let entry_name = dest
        .with_extension("json")
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.json".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options)?;
    zip.write_all(json)?;
    zip.finish()?;

    info(format!("📦 Compressed: {}", zip_path.display()));
    Ok(zip_path)
}

/// Read the first `.json` entry of a backup archive.
fn read_from_zip(path: &Path) -> AppResult<String> {
    let mut archive = ZipArchive::new(fs::File::open(path)?)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.name().to_ascii_lowercase().ends_with(".json") {
            let mut raw = String::new();
            entry.read_to_string(&mut raw)?;
            return Ok(raw);
        }
    }

    Err(AppError::ImportFormat(format!(
        "no JSON document inside {}",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::worker::Worker;
    use chrono::NaiveDate;
    use std::env;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn seeded() -> Repository<MemoryStorage> {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let w = Worker {
            id: "1".into(),
            name: "Ali".into(),
            iqama: "111".into(),
            mobile: "055".into(),
            ..Default::default()
        };
        repo.save_worker(w, now()).unwrap();
        repo
    }

    #[test]
    fn zip_backup_restores_into_empty_store() {
        let dest = env::temp_dir().join("samipro_unit_backup.json");
        let mut repo = seeded();
        let zip = BackupLogic::backup(
            &mut repo,
            &Actor::Manager,
            dest.to_str().unwrap(),
            true,
            now(),
        )
        .unwrap();
        assert_eq!(zip.extension().unwrap(), "zip");

        let mut fresh = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        BackupLogic::restore(&mut fresh, &Actor::Manager, zip.to_str().unwrap(), now()).unwrap();

        let doc = fresh.load().unwrap();
        assert_eq!(doc.workers.len(), 1);
        assert_eq!(doc.logs[0].action, "RESTORE");
        assert_eq!(doc.logs[1].action, "BACKUP_DOWNLOAD");
        let _ = fs::remove_file(zip);
    }

    #[test]
    fn rejected_backup_leaves_data_untouched() {
        let src = env::temp_dir().join("samipro_unit_bad_backup.json");
        fs::write(&src, r#"{"workers": []}"#).unwrap();

        let mut repo = seeded();
        let res = BackupLogic::restore(&mut repo, &Actor::Manager, src.to_str().unwrap(), now());
        assert!(matches!(res, Err(AppError::ImportFormat(_))));
        assert_eq!(repo.workers().unwrap().len(), 1);
        let _ = fs::remove_file(src);
    }
}
