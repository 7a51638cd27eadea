use rusqlite::Connection;
use tempfile::TempDir;

use crate::CounterStore;
use crate::StorageConfig;

fn test_store(dir: &TempDir) -> CounterStore {
    let config = StorageConfig {
        db_path: dir.path().join("counters.db"),
        busy_timeout_ms: 5_000,
    };
    let store = CounterStore::new(&config);
    store.ensure_schema().expect("schema creation failed");
    store
}

fn raw_connection(dir: &TempDir) -> Connection {
    Connection::open(dir.path().join("counters.db")).expect("open raw connection")
}

#[test]
fn ensure_schema_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    // Second invocation against the already-initialized file
    store.ensure_schema().expect("re-running schema creation failed");
}

#[test]
fn player_kills_unknown_returns_zero_without_creating_row() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    assert_eq!(store.player_kills(42).unwrap(), 0);

    let conn = raw_connection(&dir);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn upsert_player_kill_creates_then_increments() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    assert_eq!(store.upsert_player_kill(100, "Alice").unwrap(), 1);
    assert_eq!(store.upsert_player_kill(100, "Alice").unwrap(), 2);
    assert_eq!(store.player_kills(100).unwrap(), 2);
}

#[test]
fn upsert_player_kill_overwrites_display_name() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.upsert_player_kill(100, "Old Name").unwrap();
    store.upsert_player_kill(100, "New Name").unwrap();

    let conn = raw_connection(&dir);
    let name: String = conn
        .query_row(
            "SELECT display_name FROM players WHERE player_id = 100",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "New Name");
}

#[test]
fn ensure_player_exists_never_resets_kills() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.upsert_player_kill(100, "Alice").unwrap();
    store.upsert_player_kill(100, "Alice").unwrap();
    store.ensure_player_exists(100, "Alice").unwrap();

    assert_eq!(store.player_kills(100).unwrap(), 2);
}

#[test]
fn connect_then_kills_scenario() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.ensure_player_exists(100, "Alice").unwrap();
    assert_eq!(store.player_kills(100).unwrap(), 0);

    for _ in 0..3 {
        store.upsert_player_kill(100, "Alice").unwrap();
    }
    assert_eq!(store.player_kills(100).unwrap(), 3);
}

#[test]
fn large_player_ids_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let steam_id = u64::MAX - 5;
    assert_eq!(store.upsert_player_kill(steam_id, "Edge").unwrap(), 1);
    assert_eq!(store.player_kills(steam_id).unwrap(), 1);
}

#[test]
fn bot_kills_are_scoped_by_map() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    assert_eq!(store.upsert_bot_kill("Guard", "de_dust2").unwrap(), 1);

    assert_eq!(
        store.list_bot_kills("de_dust2").unwrap(),
        vec![("Guard".to_string(), 1)]
    );
    assert!(store.list_bot_kills("de_inferno").unwrap().is_empty());

    // Same name on another map is an independent counter
    assert_eq!(store.upsert_bot_kill("Guard", "de_inferno").unwrap(), 1);
    assert_eq!(store.upsert_bot_kill("Guard", "de_dust2").unwrap(), 2);
}

#[test]
fn list_bot_kills_orders_by_count_then_insertion() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.upsert_bot_kill("Alpha", "de_dust2").unwrap();
    store.upsert_bot_kill("Bravo", "de_dust2").unwrap();
    store.upsert_bot_kill("Bravo", "de_dust2").unwrap();
    store.upsert_bot_kill("Bravo", "de_dust2").unwrap();
    store.upsert_bot_kill("Charlie", "de_dust2").unwrap();

    assert_eq!(
        store.list_bot_kills("de_dust2").unwrap(),
        vec![
            ("Bravo".to_string(), 3),
            ("Alpha".to_string(), 1),
            ("Charlie".to_string(), 1),
        ]
    );
}

#[test]
fn delete_bot_counters_keeps_only_active_map() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.upsert_bot_kill("Guard", "de_dust2").unwrap();
    store.upsert_bot_kill("Sniper", "de_dust2").unwrap();
    store.upsert_bot_kill("Guard", "de_inferno").unwrap();

    let removed = store.delete_bot_counters("de_inferno").unwrap();
    assert_eq!(removed, 2);

    assert!(store.list_bot_kills("de_dust2").unwrap().is_empty());
    assert_eq!(
        store.list_bot_kills("de_inferno").unwrap(),
        vec![("Guard".to_string(), 1)]
    );
}

#[test]
fn concurrent_player_upserts_lose_no_increment() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let threads: u64 = 8;
    let kills_per_thread: u64 = 25;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..kills_per_thread {
                    store.upsert_player_kill(7, "Racer").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        store.player_kills(7).unwrap(),
        threads * kills_per_thread
    );
}

#[test]
fn concurrent_bot_upserts_lose_no_increment() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let threads: u64 = 4;
    let kills_per_thread: u64 = 20;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..kills_per_thread {
                    store.upsert_bot_kill("Guard", "de_dust2").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        store.list_bot_kills("de_dust2").unwrap(),
        vec![("Guard".to_string(), threads * kills_per_thread)]
    );
}
