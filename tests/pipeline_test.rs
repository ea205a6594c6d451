// ABOUTME: End-to-end tests for the meal analysis pipeline with stub recognizers
// ABOUTME: Cache dedup, personalization, text input, deadlines, failures, and soft warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveTime;
use common::{BrokenCache, StubRecognizer, UnavailableRecognizer};
use hawkerlens::cache::memory::InMemoryCache;
use hawkerlens::cache::{CacheProvider, CacheTtlConfig, RecognitionCache};
use hawkerlens::config::RecognitionConfig;
use hawkerlens::i18n::Language;
use hawkerlens::pipeline::{MealAnalysisPipeline, MealAnalysisRequest, RecognitionWarning};
use hawkerlens::recognition::{FoodRecognizer, RecognitionError};
use hawkerlens_core::errors::ValidationError;
use hawkerlens_core::models::{ActivityLevel, HealthGoal, HealthProfile, MealContext};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn lunch_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 15, 0).unwrap()
}

async fn pipeline_with(
    recognizer: Arc<dyn FoodRecognizer>,
) -> MealAnalysisPipeline<InMemoryCache> {
    common::init_test_logging();
    let cache = RecognitionCache::new(common::memory_cache().await, CacheTtlConfig::default());
    MealAnalysisPipeline::new(recognizer, cache)
}

#[tokio::test]
async fn test_repeat_photo_is_served_from_cache() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = common::sample_profile(HealthGoal::Maintain);
    let photo = common::png_bytes(64, 64);

    let first = pipeline
        .analyze(MealAnalysisRequest::photo(photo.clone(), lunch_time()), &profile)
        .await
        .unwrap();
    let second = pipeline
        .analyze(MealAnalysisRequest::photo(photo, lunch_time()), &profile)
        .await
        .unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(recognizer.calls(), 1);
    assert_eq!(first.content_hash, second.content_hash);
    assert_eq!(first.recognition, second.recognition);
    assert_eq!(first.rating, second.rating);
    assert_ne!(first.analysis_id, second.analysis_id);

    let metrics = pipeline.cache().metrics().await;
    assert_eq!((metrics.hits, metrics.misses), (1, 1));
}

#[tokio::test]
async fn test_cache_hit_keeps_meal_context_of_first_analysis() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = common::sample_profile(HealthGoal::Maintain);
    let photo = common::png_bytes(40, 40);
    let evening = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

    let at_lunch = pipeline
        .analyze(MealAnalysisRequest::photo(photo.clone(), lunch_time()), &profile)
        .await
        .unwrap();
    let at_dinner = pipeline
        .analyze(MealAnalysisRequest::photo(photo, evening), &profile)
        .await
        .unwrap();

    assert!(at_dinner.from_cache);
    assert_eq!(recognizer.calls(), 1);
    assert_eq!(at_lunch.recognition.meal_context(), MealContext::Lunch);
    assert_eq!(at_dinner.recognition.meal_context(), MealContext::Lunch);
    assert_eq!(at_lunch.rating, at_dinner.rating);
}

#[tokio::test]
async fn test_personalized_entries_do_not_share_with_default() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = common::sample_profile(HealthGoal::LoseWeight);
    let photo = common::png_bytes(48, 48);

    pipeline
        .analyze(
            MealAnalysisRequest::photo(photo.clone(), lunch_time())
                .with_user("user-1")
                .personalized(),
            &profile,
        )
        .await
        .unwrap();
    let shared = pipeline
        .analyze(
            MealAnalysisRequest::photo(photo.clone(), lunch_time()).with_user("user-1"),
            &profile,
        )
        .await
        .unwrap();
    let personal_again = pipeline
        .analyze(
            MealAnalysisRequest::photo(photo, lunch_time())
                .with_user("user-1")
                .personalized(),
            &profile,
        )
        .await
        .unwrap();

    assert!(!shared.from_cache);
    assert!(personal_again.from_cache);
    assert_eq!(recognizer.calls(), 2);
}

#[tokio::test]
async fn test_description_dedup_ignores_case_and_spacing() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = common::sample_profile(HealthGoal::Maintain);

    let first = pipeline
        .analyze(
            MealAnalysisRequest::description("Chicken  Rice, extra chilli".to_owned(), lunch_time()),
            &profile,
        )
        .await
        .unwrap();
    let second = pipeline
        .analyze(
            MealAnalysisRequest::description(
                "  chicken rice,\nEXTRA chilli ".to_owned(),
                lunch_time(),
            ),
            &profile,
        )
        .await
        .unwrap();

    assert_eq!(first.content_hash, second.content_hash);
    assert!(second.from_cache);
    assert_eq!(recognizer.calls(), 1);
}

#[tokio::test]
async fn test_blank_description_rejected_without_calling_recognizer() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;

    let error = pipeline
        .analyze(
            MealAnalysisRequest::description(" \n\t ".to_owned(), lunch_time()),
            &common::sample_profile(HealthGoal::Maintain),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, RecognitionError::EmptyDescription));
    assert_eq!(recognizer.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_recognizer_times_out_and_nothing_is_cached() {
    let recognizer = StubRecognizer::slow(common::chicken_rice_payload(), Duration::from_secs(60));
    let pipeline = pipeline_with(recognizer.clone())
        .await
        .with_recognition_config(RecognitionConfig {
            timeout_secs: 5,
            ..RecognitionConfig::default()
        });
    let profile = common::sample_profile(HealthGoal::Maintain);
    let request = MealAnalysisRequest::description("mee siam".to_owned(), lunch_time());

    let error = pipeline
        .analyze(request.clone(), &profile)
        .await
        .unwrap_err();
    assert!(matches!(error, RecognitionError::Timeout { secs: 5 }));
    assert!(error.is_retryable());
    assert_eq!(error.message_key(), "error.timeout");

    let _ = pipeline.analyze(request, &profile).await;
    assert_eq!(recognizer.calls(), 2);
}

#[tokio::test]
async fn test_recognizer_failure_is_retryable() {
    let pipeline = pipeline_with(Arc::new(UnavailableRecognizer)).await;

    let error = pipeline
        .analyze(
            MealAnalysisRequest::description("nasi lemak".to_owned(), lunch_time()),
            &common::sample_profile(HealthGoal::Maintain),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, RecognitionError::Recognizer(_)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_rejected_payload_is_not_cached() {
    let recognizer = StubRecognizer::new(json!({ "foods": [] }));
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = common::sample_profile(HealthGoal::Maintain);
    let photo = common::png_bytes(32, 32);

    for _ in 0..2 {
        let error = pipeline
            .analyze(MealAnalysisRequest::photo(photo.clone(), lunch_time()), &profile)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            RecognitionError::Validation(ValidationError::NoFoodDetected)
        ));
        assert!(!error.is_retryable());
    }
    assert_eq!(recognizer.calls(), 2);
}

#[tokio::test]
async fn test_low_confidence_items_become_warnings() {
    let pipeline = pipeline_with(StubRecognizer::new(common::uncertain_drink_payload())).await;

    let analysis = pipeline
        .analyze(
            MealAnalysisRequest::description("kaya toast and kopi".to_owned(), lunch_time())
                .with_language(Language::ZhCn),
            &common::sample_profile(HealthGoal::ControlSugar),
        )
        .await
        .unwrap();

    assert_eq!(
        analysis.warnings,
        vec![RecognitionWarning::LowConfidence {
            food: "Kopi".to_owned(),
            confidence: 45.0
        }]
    );
    assert_eq!(analysis.recognition.meal_context(), MealContext::Breakfast);

    let lines = analysis.localized_warnings(Language::En);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Kopi"));
    assert!(lines[0].contains("45"));
}

#[tokio::test]
async fn test_invalid_profile_fails_before_recognition() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;
    let profile = HealthProfile::new(0.0, 70.0, HealthGoal::Maintain, ActivityLevel::Light);

    let error = pipeline
        .analyze(
            MealAnalysisRequest::description("roti prata".to_owned(), lunch_time()),
            &profile,
        )
        .await
        .unwrap_err();

    assert!(matches!(error, RecognitionError::Profile(_)));
    assert_eq!(error.message_key(), "error.invalid_profile");
    assert_eq!(recognizer.calls(), 0);
}

#[tokio::test]
async fn test_unreachable_cache_does_not_fail_analysis() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let cache = RecognitionCache::new(BrokenCache, CacheTtlConfig::default());
    let pipeline = MealAnalysisPipeline::new(recognizer.clone(), cache);
    let profile = common::sample_profile(HealthGoal::Maintain);

    for _ in 0..2 {
        let analysis = pipeline
            .analyze(
                MealAnalysisRequest::description("chicken rice".to_owned(), lunch_time()),
                &profile,
            )
            .await
            .unwrap();
        assert!(!analysis.from_cache);
    }
    assert_eq!(recognizer.calls(), 2);
}

#[tokio::test]
async fn test_unsupported_photo_rejected() {
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let pipeline = pipeline_with(recognizer.clone()).await;

    let error = pipeline
        .analyze(
            MealAnalysisRequest::photo(b"BM not really a bitmap".to_vec(), lunch_time()),
            &common::sample_profile(HealthGoal::Maintain),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, RecognitionError::UnsupportedFormat { .. }));
    assert_eq!(recognizer.calls(), 0);
}

#[tokio::test]
async fn test_analysis_serializes_for_persistence() {
    let pipeline = pipeline_with(StubRecognizer::new(common::chicken_rice_payload())).await;
    let analysis = pipeline
        .analyze(
            MealAnalysisRequest::description("chicken rice".to_owned(), lunch_time()),
            &common::sample_profile(HealthGoal::Maintain),
        )
        .await
        .unwrap();

    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(
        value["content_hash"].as_str(),
        Some(analysis.content_hash.as_str())
    );
    assert_eq!(value["rating"]["score"], json!(analysis.rating.score));

    let localized = analysis.localized_rating(Language::En);
    assert_eq!(localized.factors.len(), 6);
    assert!(localized.headline.contains(&analysis.rating.score.to_string()));
}

#[tokio::test]
async fn test_cache_backend_is_shared_between_pipelines() {
    let backend = common::memory_cache().await;
    let recognizer = StubRecognizer::new(common::chicken_rice_payload());
    let first = MealAnalysisPipeline::new(
        recognizer.clone(),
        RecognitionCache::new(backend.clone(), CacheTtlConfig::default()),
    );
    let second = MealAnalysisPipeline::new(
        recognizer.clone(),
        RecognitionCache::new(backend.clone(), CacheTtlConfig::default()),
    );
    let profile = common::sample_profile(HealthGoal::GainMuscle);
    let request = MealAnalysisRequest::description("char siew rice".to_owned(), lunch_time());

    first.analyze(request.clone(), &profile).await.unwrap();
    let cached = second.analyze(request, &profile).await.unwrap();

    assert!(cached.from_cache);
    assert_eq!(recognizer.calls(), 1);
    backend.health_check().await.unwrap();
}
