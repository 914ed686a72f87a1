//! Command handlers for `rank` and `phash`.

use std::path::Path;

use adtrend_core::AppConfig;
use adtrend_pipeline::{image_source_for, perceptual_hash, summarize_tagspace, Pipeline};

use crate::input::{load_ads, load_history};
use crate::ranking_file::{write_ranking, RankingEntry};

/// Number of tags listed in the run summary.
const SUMMARY_TAGS: usize = 10;

/// Load the batch and history, run the pipeline, and write the ranking file.
///
/// When `dry_run` is `true` the ranking is printed to stdout instead of
/// written to `config.ranking_output`.
pub(crate) fn run_rank(config: &AppConfig, ads_path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let ads = load_ads(ads_path)?;
    let history = load_history(config.history_path.as_deref())?;
    let pipeline = Pipeline::from_config(config)?;

    tracing::info!(
        ads = ads.len(),
        history_tags = history.len(),
        backend = %config.image_backend,
        detector = %config.person_detector,
        policy = %config.scoring_policy,
        "starting rank run"
    );
    let report = pipeline.run(ads, &history)?;
    let funnel = report.funnel;

    println!(
        "ranked {} of {} ads (noise: {}, duplicates: {}, unanalyzed: {})",
        funnel.ranked,
        funnel.input,
        funnel.noise_dropped,
        funnel.duplicates_dropped,
        funnel.unanalyzed
    );
    let tagspace = summarize_tagspace(&report.ranked);
    if !tagspace.is_empty() {
        let top: Vec<String> = tagspace
            .iter()
            .take(SUMMARY_TAGS)
            .map(|(tag, count)| format!("{tag}={count}"))
            .collect();
        println!("top tags: {}", top.join(", "));
    }

    if dry_run {
        let entries: Vec<RankingEntry> = report.ranked.iter().map(RankingEntry::from).collect();
        println!("dry-run: ranking not written");
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    write_ranking(&config.ranking_output, &report.ranked)?;
    println!("wrote ranking to {}", config.ranking_output.display());
    Ok(())
}

/// Hex perceptual hash of one image read through the configured backend.
pub(crate) fn image_phash(config: &AppConfig, image: &Path) -> anyhow::Result<String> {
    let source = image_source_for(config.image_backend);
    let pixels = source.load(image)?;
    Ok(format!("{:016x}", perceptual_hash(&pixels)))
}
