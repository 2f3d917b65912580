//! Both storage backends must agree on every observable result.

use jukebox_analytics_server::analytics::{AnalyticsError, AnalyticsService};
use jukebox_analytics_server::analytics_store::{
    AnalyticsStore, InMemoryAnalyticsStore, NewPlaybackLog, SqliteAnalyticsStore, TopTrackStat,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Plays, with unknown track ids mixed in, covering ties at several counts.
const PLAYS: [i64; 14] = [3, 2, 9, 1, 3, 2, 1, 4, 3, 2, 1, 1, 0, 2];

fn replay(service: &AnalyticsService) -> Vec<Result<(), AnalyticsError>> {
    PLAYS
        .iter()
        .map(|track_id| service.create_log(*track_id, 1.0))
        .collect()
}

#[test]
fn backends_agree_on_mixed_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let stores: Vec<Arc<dyn AnalyticsStore>> = vec![
        Arc::new(InMemoryAnalyticsStore::new()),
        Arc::new(SqliteAnalyticsStore::new(temp_dir.path().join("parity.db")).unwrap()),
    ];

    let mut outcomes = Vec::new();
    for store in stores {
        let service = AnalyticsService::new(store.clone());
        let log_results = replay(&service);
        let price_results = vec![
            service.update_price(2, 0.0),
            service.update_price(2, 2.5),
            service.update_price(8, 2.5),
        ];
        let top = service.get_top_tracks().unwrap();
        let logged: Vec<i64> = store
            .get_all_logs()
            .unwrap()
            .iter()
            .map(|log| log.track_id)
            .collect();
        let price = service.get_track(2).unwrap().price;
        outcomes.push((log_results, price_results, top, logged, price));
    }

    assert_eq!(outcomes[0], outcomes[1]);

    let (_, _, top, logged, price) = &outcomes[0];
    assert_eq!(logged.len(), 11);
    assert_eq!(*price, 2.5);
    assert_eq!(
        top,
        &vec![
            TopTrackStat {
                title: "Dirty Diana".to_string(),
                count: 4
            },
            TopTrackStat {
                title: "Comfortably Numb".to_string(),
                count: 4
            },
            TopTrackStat {
                title: "Space Oddity".to_string(),
                count: 3
            },
        ]
    );
}

#[test]
fn backends_store_logs_of_unknown_tracks_without_ranking_them() {
    let temp_dir = TempDir::new().unwrap();
    let stores: Vec<Arc<dyn AnalyticsStore>> = vec![
        Arc::new(InMemoryAnalyticsStore::new()),
        Arc::new(SqliteAnalyticsStore::new(temp_dir.path().join("dangling.db")).unwrap()),
    ];

    for store in stores {
        assert!(store.create_log(NewPlaybackLog::now(99, 1.0)).is_ok());
        assert!(store.create_log(NewPlaybackLog::now(99, 1.0)).is_ok());
        store.create_log(NewPlaybackLog::now(3, 1.0)).unwrap();

        assert_eq!(store.get_all_logs().unwrap().len(), 3);
        assert_eq!(
            store.get_top_tracks(3).unwrap(),
            vec![TopTrackStat {
                title: "Space Oddity".to_string(),
                count: 1
            }]
        );
    }
}
