//! PlaylistForge: picks representative tracks from a library export
//!
//! Loads the library, clusters its tracks and writes or prints the picks.

use anyhow::Result;
use clap::Parser;
use playlistforge::{
    load_records, pick_tracks, report, Args, FileConfig, JsonLibrary, JsonPlaylistWriter,
    NewPlaylist, PlaylistSink, Settings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let settings = Settings::resolve(&args, file_config)?;

    let start_time = Instant::now();

    // Step 1: Load tracks and their audio features
    info!("Reading library from {:?}", args.input);
    let library = JsonLibrary::load(&args.input)?;
    let records = load_records(&library)?;

    // Step 2: Cluster and pick
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "Clustering into {} clusters over {} passes",
        settings.engine.k, settings.engine.passes
    );
    let outcome = pick_tracks(
        records,
        settings.engine,
        settings.schema.clone(),
        settings.zero_variance,
        rng,
    )?;

    if args.show_clusters {
        println!("{}", report::render_clustering(&outcome.clustering));
    }
    if args.verbose {
        println!(
            "{}",
            report::render_statistics(&outcome.clustering, &settings.schema, &outcome.stats)
        );
    }

    // Step 3: Hand the picks over
    println!("=== Your picks ===");
    print!("{}", report::render_picks(&outcome.picks));

    if let Some(output) = &args.output {
        let playlist = NewPlaylist {
            name: settings.playlist_name.clone(),
            description: settings.playlist_description.clone(),
            public: settings.playlist_public,
            track_ids: outcome.track_ids(),
        };
        let location = JsonPlaylistWriter::new(output).create_playlist(&playlist)?;
        println!("\nDone! You can check out \"{}\" here: {}", playlist.name, location);
    }

    info!(
        "Finished in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
