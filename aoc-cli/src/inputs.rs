//! Local puzzle inputs

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only store of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}/day{day:02}.txt`
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Where the input for a year/day is expected
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir
            .join(year.to_string())
            .join(format!("day{day:02}.txt"))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing { path },
            _ => InputError::Unreadable { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.path(2016, 1), PathBuf::from("inputs/2016/day01.txt"));
        assert_eq!(store.path(2025, 11), PathBuf::from("inputs/2025/day11.txt"));
    }

    #[test]
    fn reads_existing_and_reports_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2017, 3));
        let err = store.read(2017, 3).unwrap_err();
        assert!(matches!(err, InputError::Missing { .. }));
        assert!(err.to_string().contains("day03.txt"));

        fs::create_dir_all(temp.path().join("2017")).unwrap();
        fs::write(store.path(2017, 3), "361527\n").unwrap();
        assert!(store.contains(2017, 3));
        assert_eq!(store.read(2017, 3).unwrap(), "361527\n");
    }

    #[test]
    fn directory_in_place_of_file_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(store.path(2021, 15)).unwrap();
        assert!(!store.contains(2021, 15));
        assert!(store.read(2021, 15).is_err());
    }
}
