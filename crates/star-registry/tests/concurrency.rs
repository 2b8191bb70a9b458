//! Concurrent submissions and reads against one shared registry.

use std::sync::Arc;

use star_registry_testkit::{init_tracing, multi_wallet_fixtures, star, TestFixture};

const WRITERS: usize = 8;
const CLAIMS_PER_WRITER: usize = 5;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_produce_a_dense_chain() {
    init_tracing();
    let fixture = Arc::new(TestFixture::new());
    let wallets = multi_wallet_fixtures(WRITERS);

    let mut handles = Vec::new();
    for (w, wallet) in wallets.iter().cloned().enumerate() {
        let fixture = Arc::clone(&fixture);
        handles.push(tokio::task::spawn_blocking(move || {
            (0..CLAIMS_PER_WRITER)
                .map(|i| {
                    fixture
                        .claim(&wallet, star(&format!("star-{}-{}", w, i)))
                        .unwrap()
                        .height
                })
                .collect::<Vec<_>>()
        }));
    }

    let mut heights = Vec::new();
    for handle in handles {
        heights.extend(handle.await.unwrap());
    }
    heights.sort_unstable();

    let total = (WRITERS * CLAIMS_PER_WRITER) as u64;
    assert_eq!(heights, (1..=total).collect::<Vec<_>>());
    assert_eq!(fixture.registry.height(), total);
    assert!(fixture.registry.validate_chain().is_valid());

    for wallet in &wallets {
        let stars = fixture.registry.get_stars_by_address(&wallet.address());
        assert_eq!(stars.len(), CLAIMS_PER_WRITER);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_see_a_torn_chain() {
    let fixture = Arc::new(TestFixture::new());
    let writer_wallet = multi_wallet_fixtures(1).remove(0);

    let writer = {
        let fixture = Arc::clone(&fixture);
        tokio::task::spawn_blocking(move || {
            for i in 0..20 {
                fixture
                    .claim(&writer_wallet, star(&format!("star-{}", i)))
                    .unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let fixture = Arc::clone(&fixture);
        readers.push(tokio::task::spawn_blocking(move || {
            let mut last_height = 0;
            for _ in 0..50 {
                let blocks = fixture.registry.blocks();
                assert_eq!(blocks.len() as u64, blocks.last().unwrap().height + 1);
                assert!(star_registry::validate_chain(&blocks).is_valid());

                let height = fixture.registry.height();
                assert!(height >= last_height);
                assert!(fixture.registry.get_block_by_height(height).is_some());
                last_height = height;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(fixture.registry.height(), 20);
}
