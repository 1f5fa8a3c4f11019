use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use log::{error, info, warn};
use tempfile::NamedTempFile;
use crate::manager_output::errors::OutputError;
use crate::manager_output::write_json;

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn/";

const CONDITIONS: [(&str, &str); 18] = [
    ("Klarer Himmel", "01d"),
    ("Ein paar Wolken", "02d"),
    ("Überwiegend bewölkt", "03d"),
    ("Bewölkt", "04d"),
    ("Nieselregen", "09d"),
    ("Regen", "10d"),
    ("Gewitter", "11d"),
    ("Schnee", "13d"),
    ("Nebel", "50d"),
    ("Klarer Himmel (Nacht)", "01n"),
    ("Ein paar Wolken (Nacht)", "02n"),
    ("Überwiegend bewölkt (Nacht)", "03n"),
    ("Bewölkt (Nacht)", "04n"),
    ("Nieselregen (Nacht)", "09n"),
    ("Regen (Nacht)", "10n"),
    ("Gewitter (Nacht)", "11n"),
    ("Schnee (Nacht)", "13n"),
    ("Nebel (Nacht)", "50n"),
];

/// Outcome of an icon copy, none of which is fatal
#[derive(Debug, PartialEq)]
pub enum IconCopy {
    Copied,
    Missing,
    Failed,
}

/// Copies the local image for an icon code to a new name in the destination directory.
/// An existing destination file is replaced in one rename, readers never see a partial image.
///
/// # Arguments
///
/// * 'source_dir' - directory holding '<icon_code>.png' assets
/// * 'icon_code' - provider icon code, i.e. '10d'
/// * 'dest_dir' - directory to copy into
/// * 'new_file_name' - file name of the copy
pub fn copy_icon(source_dir: &Path, icon_code: &str, dest_dir: &Path, new_file_name: &str) -> IconCopy {
    let source = source_dir.join(format!("{}.png", icon_code));
    let destination = dest_dir.join(new_file_name);

    if !source.exists() {
        warn!("icon {} not found, skipping copy to {}", source.display(), destination.display());
        return IconCopy::Missing;
    }

    match replace_with_copy(&source, dest_dir, &destination) {
        Ok(_) => {
            info!("copied icon {} to {}", source.display(), destination.display());
            IconCopy::Copied
        },
        Err(e) => {
            error!("failed to copy icon {} to {}: {}", source.display(), destination.display(), e);
            IconCopy::Failed
        }
    }
}

fn replace_with_copy(source: &Path, dest_dir: &Path, destination: &Path) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dest_dir)?;
    io::copy(&mut File::open(source)?, &mut tmp)?;
    tmp.persist(destination)?;

    Ok(())
}

/// Returns condition names mapped to their large provider hosted icon
///
pub fn icon_links() -> BTreeMap<String, String> {
    CONDITIONS.iter()
        .map(|(condition, code)| (condition.to_string(), format!("{}{}@4x.png", ICON_BASE_URL, code)))
        .collect()
}

/// Writes the icon link table as 'weather_icon_links.json' into the given directory
///
/// # Arguments
///
/// * 'dir' - target directory
pub fn write_icon_links(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir)?;
    write_json(&icon_links(), &dir.join("weather_icon_links.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_icon_copies_and_renames() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("10d.png"), b"rain").unwrap();

        let result = copy_icon(source.path(), "10d", dest.path(), "2025-06-01.png");

        assert_eq!(result, IconCopy::Copied);
        assert_eq!(fs::read(dest.path().join("2025-06-01.png")).unwrap(), b"rain");
    }

    #[test]
    fn test_copy_icon_overwrites_existing() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("01d.png"), b"sun").unwrap();
        fs::write(dest.path().join("wetter_icon.png"), b"old").unwrap();

        copy_icon(source.path(), "01d", dest.path(), "wetter_icon.png");

        assert_eq!(fs::read(dest.path().join("wetter_icon.png")).unwrap(), b"sun");
    }

    #[test]
    fn test_copy_icon_leaves_no_temporary_files() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("10d.png"), b"rain").unwrap();

        for _ in 0..3 {
            assert_eq!(copy_icon(source.path(), "10d", dest.path(), "wetter_icon.png"), IconCopy::Copied);
        }

        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_copy_icon_missing_source() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let result = copy_icon(source.path(), "99x", dest.path(), "wetter_icon.png");

        assert_eq!(result, IconCopy::Missing);
        assert!(!dest.path().join("wetter_icon.png").exists());
    }

    #[test]
    fn test_copy_icon_missing_destination_dir_fails_softly() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("04d.png"), b"clouds").unwrap();

        let result = copy_icon(source.path(), "04d", &dest.path().join("gone"), "wetter_icon.png");

        assert_eq!(result, IconCopy::Failed);
    }

    #[test]
    fn test_icon_links() {
        let links = icon_links();
        assert_eq!(links.len(), 18);
        assert_eq!(links["Regen"], "http://openweathermap.org/img/wn/10d@4x.png");
        assert_eq!(links["Nebel (Nacht)"], "http://openweathermap.org/img/wn/50n@4x.png");
    }

    #[test]
    fn test_write_icon_links() {
        let dir = TempDir::new().unwrap();
        write_icon_links(dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("weather_icon_links.json")).unwrap();
        assert!(content.contains("Klarer Himmel"));
        assert!(content.contains("01d@4x.png"));
    }
}
