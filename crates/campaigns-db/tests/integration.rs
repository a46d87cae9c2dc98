use campaigns_db::{
    create_pool, ensure_ready, list_campaigns, summarize_campaigns, DbRuntimeSettings,
    SEED_CAMPAIGNS,
};
use campaigns_types::CampaignStatus;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn file_pool(dir: &TempDir) -> campaigns_db::DbPool {
    let path = dir.path().join("data").join("campaigns.db");
    create_pool(
        path.to_str().expect("temp path should be utf-8"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to create pool")
}

#[test]
fn readiness_check_seeds_once_across_connections() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = file_pool(&dir);

    let first = pool.get().expect("failed to get connection");
    assert_eq!(ensure_ready(&first).expect("first readiness check"), 10);
    drop(first);

    for _ in 0..3 {
        let conn = pool.get().expect("failed to get connection");
        assert_eq!(ensure_ready(&conn).expect("repeat readiness check"), 0);
    }

    let conn = pool.get().expect("failed to get connection");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))
        .expect("failed to count campaigns");
    assert_eq!(count, 10);
}

#[test]
fn seed_survives_reopening_the_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    {
        let pool = file_pool(&dir);
        let conn = pool.get().expect("failed to get connection");
        ensure_ready(&conn).expect("readiness check");
    }

    let pool = file_pool(&dir);
    let conn = pool.get().expect("failed to get connection");
    assert_eq!(ensure_ready(&conn).expect("readiness check"), 0);
    assert_eq!(list_campaigns(&conn, None).expect("list").len(), 10);
}

#[test]
fn unfiltered_list_matches_seed_in_id_order() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = file_pool(&dir);
    let conn = pool.get().expect("failed to get connection");
    ensure_ready(&conn).expect("readiness check");

    let campaigns = list_campaigns(&conn, None).expect("list");
    assert_eq!(campaigns.len(), SEED_CAMPAIGNS.len());

    for (campaign, seed) in campaigns.iter().zip(SEED_CAMPAIGNS) {
        let (id, name, status, clicks, cost, impressions) = *seed;
        assert_eq!(campaign.id, id);
        assert_eq!(campaign.name, name);
        assert_eq!(campaign.status, status);
        assert_eq!(campaign.clicks, clicks);
        assert_eq!(campaign.cost, cost);
        assert_eq!(campaign.impressions, impressions);
    }
}

#[test]
fn paused_filter_returns_paused_rows() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = file_pool(&dir);
    let conn = pool.get().expect("failed to get connection");
    ensure_ready(&conn).expect("readiness check");

    let paused = list_campaigns(&conn, Some(CampaignStatus::Paused)).expect("list");
    let ids: Vec<i64> = paused.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 5, 8, 10]);
}

#[test]
fn summaries_add_up_per_status() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = file_pool(&dir);
    let conn = pool.get().expect("failed to get connection");
    ensure_ready(&conn).expect("readiness check");

    let all = summarize_campaigns(&conn, None).expect("summary");
    assert_eq!(all.status, None);
    assert_eq!(all.count, 10);
    assert_eq!(all.clicks, 2378);
    assert!((all.cost - 629.18).abs() < 1e-9, "cost was {}", all.cost);
    assert_eq!(all.impressions, 20200);

    let active = summarize_campaigns(&conn, Some(CampaignStatus::Active)).expect("summary");
    assert_eq!(active.status, Some(CampaignStatus::Active));
    assert_eq!(active.count, 6);
    assert_eq!(active.clicks, 1558);
    assert!((active.cost - 416.38).abs() < 1e-9, "cost was {}", active.cost);
    assert_eq!(active.impressions, 13300);

    let paused = summarize_campaigns(&conn, Some(CampaignStatus::Paused)).expect("summary");
    assert_eq!(paused.count, 4);
    assert_eq!(paused.clicks, 820);
    assert!((paused.cost - 212.80).abs() < 1e-9, "cost was {}", paused.cost);
    assert_eq!(paused.impressions, 6900);
}

#[test]
fn reads_do_not_mutate_the_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = file_pool(&dir);
    let conn = pool.get().expect("failed to get connection");
    ensure_ready(&conn).expect("readiness check");

    let before = list_campaigns(&conn, None).expect("list");
    for _ in 0..5 {
        ensure_ready(&conn).expect("readiness check");
        list_campaigns(&conn, Some(CampaignStatus::Active)).expect("list");
        summarize_campaigns(&conn, None).expect("summary");
    }
    let after = list_campaigns(&conn, None).expect("list");
    assert_eq!(before, after);
}

#[test]
fn concurrent_instances_seed_exactly_once() {
    const INSTANCES: usize = 4;

    for _ in 0..20 {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        // One pool per simulated server process, all on the same fresh file.
        let pools: Vec<_> = (0..INSTANCES).map(|_| file_pool(&dir)).collect();
        let barrier = Arc::new(Barrier::new(INSTANCES));

        let handles: Vec<_> = pools
            .into_iter()
            .map(|pool| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let conn = pool.get().expect("failed to get connection");
                    barrier.wait();
                    ensure_ready(&conn).map_err(|e| e.to_string())
                })
            })
            .collect();

        let results: Vec<Result<usize, String>> = handles
            .into_iter()
            .map(|h| h.join().expect("readiness thread panicked"))
            .collect();

        let failures: Vec<&String> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert!(failures.is_empty(), "concurrent readiness checks failed: {failures:?}");

        let inserted: usize = results.iter().filter_map(|r| r.as_ref().ok()).sum();
        assert_eq!(inserted, 10, "exactly one instance should seed");

        let conn = file_pool(&dir).get().expect("failed to get connection");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))
            .expect("failed to count campaigns");
        assert_eq!(count, 10);
    }
}
