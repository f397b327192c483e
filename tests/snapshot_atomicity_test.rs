//! A reader racing the fetcher's snapshot replace must always observe a
//! complete file: either the fully-old or the fully-new snapshot.

use std::thread;

use odour_bridge::errors::SnapshotError;
use odour_bridge::observations::SnapshotRow;
use odour_bridge::snapshot::{CsvSnapshotStore, SnapshotStore};

fn rows(count: usize) -> Vec<SnapshotRow> {
    (0..count)
        .map(|i| SnapshotRow {
            id: i as i64,
            user: i.to_string(),
            published_at: "2022-04-24T13:43:43.893254Z".to_string(),
            category: String::new(),
            odour_type: "Rotten eggs".to_string(),
            hedonic_tone: "Neutral".to_string(),
            intensity: "Weak".to_string(),
            latitude: 41.5,
            longitude: 2.2,
        })
        .collect()
}

#[test]
fn test_concurrent_reader_never_sees_partial_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odourcollect.csv");

    let small = rows(5);
    let large = rows(500);

    let writer_store = CsvSnapshotStore::new(&path);
    writer_store.write(&small).unwrap();

    let writer = thread::spawn(move || {
        for i in 0..50 {
            let batch = if i % 2 == 0 { &large } else { &small };
            writer_store.write(batch).unwrap();
        }
    });

    let reader_store = CsvSnapshotStore::new(&path);
    let mut reads = 0;
    while !writer.is_finished() {
        match reader_store.read() {
            Ok(rows) => {
                // Only complete snapshots are ever visible
                assert!(
                    rows.len() == 5 || rows.len() == 500,
                    "observed a partial snapshot of {} rows",
                    rows.len()
                );
                reads += 1;
            }
            Err(SnapshotError::Missing { .. }) => {
                panic!("snapshot disappeared during replace");
            }
            Err(err) => panic!("snapshot unreadable during replace: {}", err),
        }
    }

    writer.join().unwrap();
    assert!(reads > 0, "reader never ran while writer was active");
}
