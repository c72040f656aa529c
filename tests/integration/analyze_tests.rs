//! Integration tests for package analysis and export
//!
//! These tests build real zip containers in memory (including split APKs
//! nested inside an XAPK) and run the full discover → classify → export
//! cycle end-to-end.

use apk_sieve::archive::{analyze_package, analyze_package_bytes};
use apk_sieve::capture::{parse_har, CapturedRequest};
use apk_sieve::classify::classify_urls;
use apk_sieve::config::ArchiveConfig;
use apk_sieve::output::{export_requests, export_urls};
use apk_sieve::url::{CandidateFilter, BLACKLIST, STATIC_ASSET_EXTENSIONS};
use apk_sieve::SieveError;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Builds a zip container from (name, bytes) pairs
fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, FileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(bytes).expect("Failed to write zip entry");
    }
    writer
        .finish()
        .expect("Failed to finish zip")
        .into_inner()
}

/// The package described in the discovery scenario: a base entry with an
/// endpoint and a tracker URL, an ignored image, and a nested split APK.
fn scenario_package() -> Vec<u8> {
    let split = build_zip(&[(
        "res/values/strings.xml",
        b"<string name=\"auth\">https://auth.example-shop.com/login</string>",
    )]);

    build_zip(&[
        (
            "classes.dex",
            b"dex\n035\x00\x00\x12https://api.example-shop.com/v1/cart/add?x=1\x00\x07https://www.googleapis.com/track\x00",
        ),
        ("assets/icon.png", b"\x89PNGhttps://api.example-shop.com/v1/hidden"),
        ("split.apk", &split),
    ])
}

fn analyze(bytes: Vec<u8>) -> Vec<String> {
    analyze_package_bytes(bytes, &CandidateFilter::new(), &ArchiveConfig::default())
        .expect("Analysis failed")
        .urls
}

#[test]
fn test_discovery_scenario() {
    let urls = analyze(scenario_package());

    assert_eq!(
        urls,
        vec![
            "https://api.example-shop.com/v1/cart/add?x=1",
            "https://auth.example-shop.com/login",
        ]
    );

    let classification = classify_urls(&urls);
    assert_eq!(classification.category_of(&urls[0]), Some("Cart & Checkout"));
    assert_eq!(
        classification.category_of(&urls[1]),
        Some("Authentication & User")
    );
}

#[test]
fn test_analysis_from_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("shop.xapk");
    std::fs::write(&path, scenario_package()).expect("Failed to write package");

    let discovery = analyze_package(&path, &CandidateFilter::new(), &ArchiveConfig::default())
        .expect("Analysis failed");

    assert_eq!(discovery.urls.len(), 2);
    assert_eq!(discovery.stats.containers_opened, 2);
    assert_eq!(discovery.stats.nested_containers, 1);
    assert_eq!(discovery.stats.entries_scanned, 2);
    assert!(!discovery.stats.is_partial());
}

#[test]
fn test_discovery_is_idempotent() {
    let first = analyze(scenario_package());
    let second = analyze(scenario_package());
    assert_eq!(first, second);
}

#[test]
fn test_output_unique_and_sorted() {
    let package = build_zip(&[
        (
            "classes.dex",
            b"https://z.example.com/v1/a\x00https://b.example.com/v1/b\x00https://z.example.com/v1/a",
        ),
        (
            "classes2.dex",
            b"https://b.example.com/v1/b\x00http://m.example.com/v1/c",
        ),
        ("lib/arm64-v8a/libapi.so", b"\x7fELF\x00https://a.example.com/v1/d\x00"),
    ]);

    let urls = analyze(package);

    let mut expected = urls.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(urls, expected);
    assert_eq!(urls.len(), 4);
}

#[test]
fn test_blacklisted_and_asset_urls_excluded() {
    let mut blob = Vec::new();
    for domain in BLACKLIST {
        blob.extend_from_slice(format!("https://x.{}/v1/endpoint\x00", domain).as_bytes());
    }
    for ext in STATIC_ASSET_EXTENSIONS {
        blob.extend_from_slice(format!("https://cdn.example.com/file{}\x00", ext.to_uppercase()).as_bytes());
    }
    blob.extend_from_slice(b"https://api.example.com/v1/keep\x00");

    let urls = analyze(build_zip(&[("classes.dex", &blob)]));

    assert_eq!(urls, vec!["https://api.example.com/v1/keep"]);
    for url in &urls {
        assert!(BLACKLIST.iter().all(|d| !url.contains(d)));
        let lower = url.to_lowercase();
        assert!(STATIC_ASSET_EXTENSIONS.iter().all(|ext| !lower.ends_with(ext)));
    }
}

#[test]
fn test_nested_flattening_two_levels() {
    let innermost = build_zip(&[("assets/env.json", b"{\"base\":\"https://deep.example.com/v2/profile\"}")]);
    let middle = build_zip(&[("config.arm64_v8a.apk", &innermost)]);
    let outer = build_zip(&[("base.apk", &middle)]);

    assert_eq!(analyze(outer), vec!["https://deep.example.com/v2/profile"]);
}

#[test]
fn test_nesting_cap_from_config() {
    let innermost = build_zip(&[("a.xml", b"https://deep.example.com/v2/profile")]);
    let middle = build_zip(&[("inner.apk", &innermost)]);
    let outer = build_zip(&[("base.apk", &middle)]);

    let config = ArchiveConfig {
        max_nesting_depth: Some(1),
    };
    let discovery = analyze_package_bytes(outer, &CandidateFilter::new(), &config)
        .expect("Analysis failed");

    assert!(discovery.urls.is_empty());
    assert_eq!(discovery.stats.nested_failures, 1);
}

#[test]
fn test_corrupt_nested_container_is_skipped() {
    let package = build_zip(&[
        ("broken.apk", b"PK\x03\x04 this is not really a zip"),
        ("classes.dex", b"https://api.example.com/v1/orders"),
    ]);

    let discovery = analyze_package_bytes(package, &CandidateFilter::new(), &ArchiveConfig::default())
        .expect("Nested failures must not abort the analysis");

    assert_eq!(discovery.urls, vec!["https://api.example.com/v1/orders"]);
    assert_eq!(discovery.stats.nested_failures, 1);
    assert!(discovery.stats.is_partial());
}

#[test]
fn test_outer_open_failure_is_fatal() {
    let result = analyze_package_bytes(
        b"not a zip at all".to_vec(),
        &CandidateFilter::new(),
        &ArchiveConfig::default(),
    );
    assert!(matches!(result, Err(SieveError::ContainerOpen { .. })));

    let missing = analyze_package(
        std::path::Path::new("/nonexistent/app.apk"),
        &CandidateFilter::new(),
        &ArchiveConfig::default(),
    );
    assert!(matches!(missing, Err(SieveError::ContainerOpen { .. })));
}

#[test]
fn test_extra_blacklist_applies_across_nested_containers() {
    let split = build_zip(&[("strings.xml", b"https://metrics.partner.example/v1/ingest")]);
    let package = build_zip(&[
        ("classes.dex", b"https://api.example.com/v1/items"),
        ("split.apk", &split),
    ]);

    let filter = CandidateFilter::with_extra_blacklist(vec!["partner.example".to_string()]);
    let discovery = analyze_package_bytes(package, &filter, &ArchiveConfig::default())
        .expect("Analysis failed");

    assert_eq!(discovery.urls, vec!["https://api.example.com/v1/items"]);
}

#[tokio::test]
async fn test_async_analysis_matches_sync() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("shop.xapk");
    std::fs::write(&path, scenario_package()).expect("Failed to write package");

    let sync = analyze_package(&path, &CandidateFilter::new(), &ArchiveConfig::default())
        .expect("Analysis failed");
    let async_result = apk_sieve::analyze_package_async(
        path.clone(),
        CandidateFilter::new(),
        ArchiveConfig::default(),
    )
    .await
    .expect("Async analysis failed");

    assert_eq!(sync.urls, async_result.urls);
}

#[test]
fn test_url_export_shape() {
    let urls = analyze(scenario_package());
    let json = export_urls("Example Shop", &urls).expect("Export failed");

    let doc: serde_json::Value = serde_json::from_str(&json).expect("Export is not valid JSON");
    assert_eq!(doc["info"]["name"], "Example Shop");
    assert_eq!(
        doc["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    );

    let folders = doc["item"].as_array().expect("item must be an array");
    assert_eq!(folders.len(), classify_urls(&urls).non_empty_count());
    assert_eq!(folders[0]["name"], "Authentication & User");
    assert_eq!(folders[1]["name"], "Cart & Checkout");

    let cart = &folders[1]["item"][0];
    assert_eq!(cart["name"], "/v1/cart/add");
    assert_eq!(cart["request"]["method"], "GET");
    assert_eq!(cart["request"]["url"]["query"][0]["key"], "x");
    assert_eq!(cart["request"]["url"]["query"][0]["value"], "1");
    assert!(cart["response"].as_array().unwrap().is_empty());

    let login = &folders[0]["item"][0];
    assert_eq!(login["name"], "/login");
    assert_eq!(login["request"]["url"]["host"], serde_json::json!(["auth", "example-shop", "com"]));
}

#[test]
fn test_url_export_is_byte_identical() {
    let urls = analyze(scenario_package());
    let first = export_urls("Example Shop", &urls).expect("Export failed");
    let second = export_urls("Example Shop", &urls).expect("Export failed");
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_request_export_shape() {
    let har = r#"{
        "log": {
            "version": "1.2",
            "entries": [
                {
                    "request": {
                        "method": "POST",
                        "url": "https://api.example-shop.com/v1/cart/add?x=1",
                        "headers": [
                            { "name": "Content-Type", "value": "application/json" },
                            { "name": "Authorization", "value": "Bearer t" }
                        ],
                        "postData": { "text": "{\"sku\":42}" }
                    },
                    "response": { "status": 200 }
                },
                {
                    "request": { "method": "GET", "url": "https://auth.example-shop.com/login", "headers": [] },
                    "response": { "status": 200 }
                }
            ]
        }
    }"#;
    let requests: Vec<CapturedRequest> = parse_har(har).expect("HAR parse failed");
    let json = export_requests("Captured", &requests).expect("Export failed");

    let doc: serde_json::Value = serde_json::from_str(&json).expect("Export is not valid JSON");
    assert_eq!(doc["info"]["name"], "Captured");

    let items = doc["item"].as_array().expect("item must be an array");
    assert_eq!(items.len(), requests.len());

    let add = &items[0];
    assert_eq!(add["name"], "POST /v1/cart/add?x=1");
    assert_eq!(add["request"]["header"][0]["key"], "Content-Type");
    assert_eq!(add["request"]["header"][1]["key"], "Authorization");
    assert_eq!(add["request"]["header"][1]["type"], "text");
    assert_eq!(add["request"]["body"]["raw"], "{\"sku\":42}");
    assert_eq!(add["request"]["body"]["options"]["raw"]["language"], "json");

    let login = &items[1];
    assert_eq!(login["name"], "GET /login");
    assert!(login["request"].get("body").is_none());
}
