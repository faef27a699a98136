// ABOUTME: Criterion benchmarks for the payload transforms and the snapshot cache hot path
// ABOUTME: Measures USDA, Open Food Facts and ExerciseDB mapping throughput plus cached listing reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! Criterion benchmarks for transforms.
//!
//! Search pages are decoded once up front; the timed loop covers only the
//! mapping to canonical records, which runs once per upstream result.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use forage::cache::memory::InMemoryCache;
use forage::cache::{CacheKey, CacheProvider};
use forage::transform::exercise::transform_exercises;
use forage::transform::open_food_facts::OffSearchResponse;
use forage::transform::usda::UsdaSearchResponse;
use forage::transform::{exercise_slug, transform_product, transform_usda_food, ExerciseRecord};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::runtime::Runtime;

const PAGE_SIZES: [usize; 3] = [25, 100, 200];

fn usda_page(size: usize) -> UsdaSearchResponse {
    let foods: Vec<Value> = (0..size)
        .map(|i| {
            json!({
                "fdcId": i,
                "description": format!("Food {i}"),
                "brandOwner": "Bench Foods",
                "servingSize": 30,
                "servingSizeUnit": "g",
                "foodNutrients": [
                    { "nutrientName": "Energy", "unitName": "kJ", "value": 400.0 },
                    { "nutrientName": "Energy", "unitName": "KCAL", "value": 95.0 },
                    { "nutrientName": "Protein", "unitName": "G", "value": 3.2 },
                    { "nutrientName": "Total lipid (fat)", "unitName": "G", "value": 1.1 },
                    { "nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 18.4 },
                    { "nutrientName": "Fiber, total dietary", "unitName": "G", "value": 2.0 },
                    { "nutrientName": "Sugars, total including NLEA", "unitName": "G", "value": 6.5 },
                    { "nutrientName": "Sodium, Na", "unitName": "MG", "value": 120.0 },
                    { "nutrientName": "Cholesterol", "unitName": "MG", "value": 0.0 },
                    { "nutrientName": "Fatty acids, total saturated", "unitName": "G", "value": 0.3 },
                    { "nutrientName": "Vitamin C, total ascorbic acid", "unitName": "MG", "value": 4.0 }
                ]
            })
        })
        .collect();
    serde_json::from_value(json!({ "foods": foods })).unwrap()
}

fn off_page(size: usize) -> OffSearchResponse {
    let products: Vec<Value> = (0..size)
        .map(|i| {
            json!({
                "code": format!("{i:013}"),
                "product_name": format!("Product {i}"),
                "brands": "Brand A, Brand B",
                "serving_quantity": "40",
                "nutriments": {
                    "energy-kcal_100g": 389,
                    "proteins_100g": 13.2,
                    "carbohydrates_100g": 67.7,
                    "fat_100g": 6.5,
                    "sodium_100g": 0.004
                }
            })
        })
        .collect();
    serde_json::from_value(json!({ "products": products })).unwrap()
}

fn exercise_page(size: usize) -> Vec<ExerciseRecord> {
    let records: Vec<Value> = (0..size)
        .map(|i| {
            json!({
                "exerciseId": format!("ex{i}"),
                "name": format!("Barbell Variation #{i} (Wide Grip)"),
                "gifUrl": "https://static.exercisedb.dev/media/x.gif",
                "targetMuscles": ["pectorals"],
                "bodyParts": ["chest"],
                "equipments": ["barbell"],
                "secondaryMuscles": ["triceps", "shoulders"],
                "instructions": ["Lie down.", "Press."]
            })
        })
        .collect();
    serde_json::from_value(Value::Array(records)).unwrap()
}

fn bench_usda_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("usda_transform");

    for size in PAGE_SIZES {
        let page = usda_page(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| {
                page.foods
                    .iter()
                    .map(transform_usda_food)
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

fn bench_open_food_facts_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_food_facts_transform");

    for size in PAGE_SIZES {
        let page = off_page(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| {
                page.products
                    .iter()
                    .map(|p| transform_product(black_box(p), ""))
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

fn bench_exercise_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("exercise_transform");

    for size in PAGE_SIZES {
        let records = exercise_page(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| transform_exercises(black_box(records.clone())));
        });
    }

    group.bench_function("slug", |b| {
        b.iter(|| exercise_slug(black_box("Dumbbell Incline Bench Press (Neutral Grip) -- v2")));
    });

    group.finish();
}

fn bench_cached_listing(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = InMemoryCache::new(4);
    let listing = transform_exercises(exercise_page(200));
    rt.block_on(cache.put(&CacheKey::ExerciseList, &listing))
        .unwrap();

    c.bench_function("cache_listing_hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .get(black_box(&CacheKey::ExerciseList), Duration::from_secs(3600))
                    .await
                    .unwrap()
            })
        });
    });
}

criterion_group!(
    benches,
    bench_usda_transform,
    bench_open_food_facts_transform,
    bench_exercise_transform,
    bench_cached_listing
);
criterion_main!(benches);
