//! Concurrent access through `ModelCatalog`.

mod common;

use std::sync::Barrier;

use model_catalog::{ModelCatalog, ProviderId};

const THREADS: usize = 16;

/// **Scenario**: many threads ask for the same provider on a cold cache. Every caller
/// sees the same document and one entry ends up cached.
#[test]
fn cold_cache_concurrent_lookups_agree() {
    let dir = common::models_dir();
    let catalog = ModelCatalog::with_config_dir(dir.path());
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    (
                        catalog.default_model(ProviderId::Anthropic),
                        catalog.context_window("anthropic", "claude-3-5-sonnet-20241022"),
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (default, window) in &results {
        assert_eq!(default.as_deref(), Ok("claude-sonnet-4-20250514"));
        assert_eq!(*window, Some(200_000));
    }
    assert_eq!(catalog.cached_len(), 1);
}

/// **Scenario**: readers on several providers run while another thread keeps reloading.
/// Each lookup returns either a complete document or a clean miss; nothing deadlocks.
#[test]
fn lookups_survive_concurrent_reloads() {
    let dir = common::models_dir();
    let catalog = ModelCatalog::with_config_dir(dir.path());

    std::thread::scope(|s| {
        for provider in ["anthropic", "openai", "ollama", "groq"] {
            let catalog = &catalog;
            s.spawn(move || {
                for _ in 0..50 {
                    let models = catalog.all_models(provider);
                    match provider {
                        "anthropic" => assert_eq!(models.len(), 2),
                        "openai" | "ollama" => assert_eq!(models.len(), 1),
                        _ => assert!(models.is_empty()),
                    }
                }
            });
        }
        s.spawn(|| {
            for _ in 0..10 {
                assert!(catalog.reload());
            }
        });
    });

    assert_eq!(
        catalog.default_model("openai").as_deref(),
        Ok("gpt-4o-mini")
    );
}

/// **Scenario**: while the directory flips between two documents that disagree on
/// every field, each aggregate lookup is built from one document only.
#[test]
fn aggregate_lookup_never_mixes_documents() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    common::write(
        a.path(),
        "groq",
        "models:\n  m: {context_window: 1000, max_output_tokens: 100, pricing: {input: 1.0, output: 1.0}}\n",
    );
    common::write(
        b.path(),
        "groq",
        "models:\n  m: {context_window: 2000, max_output_tokens: 200, pricing: {input: 2.0, output: 2.0}}\n",
    );
    let catalog = ModelCatalog::with_config_dir(a.path());

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..200 {
                    let m = catalog.model_config_with_defaults("groq", "m");
                    let Some(window) = m.context_window else {
                        assert!(!m.configured);
                        continue;
                    };
                    let scale = window / 1000;
                    assert_eq!(m.max_output_tokens, Some(100 * scale));
                    let price = m.pricing.and_then(|p| p.input);
                    assert_eq!(price, Some(scale as f64));
                }
            });
        }
        s.spawn(|| {
            for i in 0..50 {
                let dir = if i % 2 == 0 { b.path() } else { a.path() };
                catalog.set_config_directory(dir);
            }
        });
    });
}

#[test]
fn global_catalog_is_shared_across_threads() {
    let addresses: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| ModelCatalog::global() as *const ModelCatalog as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.iter().all(|a| *a == addresses[0]));
}
