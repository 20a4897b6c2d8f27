use super::*;
use rstest::rstest;
use serde::Deserialize;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    name: String,
    count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

fn record() -> Record {
    Record {
        name: "demo".to_owned(),
        count: 3,
        label: None,
    }
}

fn fallback() -> Record {
    Record {
        name: "fallback".to_owned(),
        count: 0,
        label: Some("default".to_owned()),
    }
}

#[test]
fn missing_keys_load_as_none_or_default() {
    let store = MemoryStore::new();
    assert_eq!(try_load::<Record>(&store, "state").unwrap(), None);
    assert_eq!(load(&store, "state", fallback), fallback());
}

#[test]
fn saved_values_load_back() {
    let store = MemoryStore::new();
    save(&store, "state", &record()).unwrap();
    assert_eq!(try_load::<Record>(&store, "state").unwrap(), Some(record()));
}

#[test]
fn corrupt_values_are_reported_by_try_load() {
    let store = MemoryStore::new();
    store.set("state", "{\"name\": ").unwrap();
    let err = try_load::<Record>(&store, "state").unwrap_err();
    assert!(matches!(err, Error::Corrupt { ref key, .. } if key == "state"));
}

#[rstest]
#[case("not json")]
#[case("{\"name\": \"x\"}")]
#[case("[1, 2, 3]")]
fn corrupt_values_fall_back_to_default(#[case] raw: &str) {
    let store = MemoryStore::new();
    store.set("state", raw).unwrap();
    assert_eq!(load(&store, "state", fallback), fallback());
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case("with space")]
#[case("dotted.key")]
fn invalid_keys_are_rejected(#[case] key: &str) {
    let store = MemoryStore::new();
    assert!(matches!(store.set(key, "{}"), Err(Error::InvalidKey(_))));
    assert!(matches!(store.get(key), Err(Error::InvalidKey(_))));
}

#[test]
fn file_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    save(&FileStore::open(dir.path()).unwrap(), "state", &record()).unwrap();

    let reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(try_load::<Record>(&reopened, "state").unwrap(), Some(record()));
    assert!(dir.path().join("state.json").is_file());
}

#[test]
fn file_store_overwrites_without_leaving_temporary_files() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("state", "1").unwrap();
    store.set("state", "2").unwrap();

    assert_eq!(store.get("state").unwrap().as_deref(), Some("2"));
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
}

#[test]
fn file_store_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = FileStore::open(&nested).unwrap();
    assert_eq!(store.directory(), nested.as_path());
    assert!(nested.is_dir());
    assert_eq!(store.get("state").unwrap(), None);
}

#[test]
fn file_store_falls_back_on_corrupt_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("state.json"), "\u{0}garbage").unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(load(&store, "state", fallback), fallback());
}

#[test]
fn corrupt_value_reports_carry_the_parse_error() {
    let store = MemoryStore::new();
    store.set("state", "nope").unwrap();
    let err = try_load::<Record>(&store, "state").unwrap_err();
    let message = format!("{:#}", anyhow::Error::from(err));
    assert!(message.starts_with("value stored under \"state\" is corrupt: expected "));
}

#[cfg(unix)]
#[test]
fn file_store_stays_inside_its_directory() {
    let outside = TempDir::new().unwrap();
    let secret = outside.path().join("secret.json");
    std::fs::write(&secret, "\"outside\"").unwrap();

    let dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(&secret, dir.path().join("state.json")).unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    assert!(matches!(store.get("state"), Err(Error::Io { .. })));
    assert_eq!(load(&store, "state", fallback), fallback());
}
