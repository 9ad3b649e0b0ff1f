//! CLI logic for the Constellation placement tool.
//!
//! Each subcommand loads the content store through the [`Constellation`]
//! builder, runs one placement or authoring task and reports what changed.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, CreateArgs};

use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use constellation::{
    Constellation, ConstellationError,
    content::{ContentStore, NewItem},
    placement::{CheckReport, RepairReport},
};

/// Run the Constellation CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ConstellationError` for:
/// - Configuration loading errors
/// - Content directory read or write errors
/// - Manifest or preview export errors
pub fn run(args: &Args) -> Result<(), ConstellationError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(content_dir) = &args.content_dir {
        app_config = app_config.with_content_root(content_dir);
    }
    let constellation = Constellation::new(app_config);
    info!(
        content_root:? = constellation.config().content().root();
        "Using content directory"
    );

    match &args.command {
        Command::Generate { output, seed } => {
            let store = load(&constellation)?;
            let layout = constellation.regenerate(&store, &mut rng(*seed));
            constellation.write_manifest(&store, &layout, output)?;

            let report = CheckReport::new(&layout.items(), constellation.config().placement());
            if !report.is_valid() {
                warn!(
                    overlaps = report.overlaps().len(),
                    zone_violations = report.zone_violations().len();
                    "Generated layout still has collisions"
                );
            }
            info!(items = layout.len(), output; "Portfolio generated");
        }
        Command::Check => {
            let store = load(&constellation)?;
            log_check_report(&constellation.check(&store));
        }
        Command::Fix { seed, dry_run } => {
            let mut store = load(&constellation)?;
            let report = constellation.repair(&mut store, &mut rng(*seed), !dry_run)?;
            log_repair_report(&report, *dry_run);
        }
        Command::Reset { .. } => {
            let mut store = load(&constellation)?;
            let count = store.reset_positions()?;
            info!(count; "Positions reset to origin");
        }
        Command::Create(create) => {
            let mut store = load(&constellation)?;
            let item = store.create(new_item(create))?;
            info!(id = item.id(), path:? = item.content_path(); "Item created");
        }
        Command::Remove { id, .. } => {
            let mut store = load(&constellation)?;
            let dir = store.remove(id)?;
            info!(id = id.as_str(), dir:?; "Item removed");
        }
        Command::Preview { output, seed } => {
            let store = load(&constellation)?;
            let layout = constellation.regenerate(&store, &mut rng(*seed));
            constellation.export_svg(&layout, output)?;
            info!(output; "Preview exported");
        }
    }

    Ok(())
}

/// Loads the content store and warns about every item that could not be read.
fn load(constellation: &Constellation) -> Result<ContentStore, ConstellationError> {
    let store = constellation.load()?;
    for skipped in store.skipped() {
        let reason = error_adapter::render_skipped(skipped);
        warn!(
            tag = skipped.tag(),
            slug = skipped.slug(),
            dir:? = skipped.dir();
            "Item skipped, remove or repair its content.json\n{reason}"
        );
    }
    Ok(store)
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn new_item(args: &CreateArgs) -> NewItem {
    NewItem {
        title: args.title.clone(),
        description: args.description.clone(),
        short_description: args.short_description.clone(),
        tag: args.tag.clone(),
        date: args.date.clone(),
        technologies: args.technologies.clone(),
        status: args.status,
        links: args.links.clone(),
    }
}

fn log_check_report(report: &CheckReport) {
    for overlap in report.overlaps() {
        warn!(
            first = overlap.first,
            second = overlap.second,
            distance = overlap.distance;
            "Items overlap"
        );
    }
    for violation in report.zone_violations() {
        warn!(
            id = violation.id,
            x = violation.position.x(),
            y = violation.position.y();
            "Item intrudes into the protected zone"
        );
    }
    if report.is_valid() {
        info!(items = report.item_count(); "No overlaps or protected-zone violations");
    } else {
        info!(
            items = report.item_count(),
            overlaps = report.overlaps().len(),
            zone_violations = report.zone_violations().len();
            "Check finished with problems"
        );
    }
}

fn log_repair_report(report: &RepairReport, dry_run: bool) {
    for relocation in report.relocations() {
        info!(
            id = relocation.id,
            reason = relocation.reason.to_string(),
            from_x = relocation.from.x(),
            from_y = relocation.from.y(),
            to_x = relocation.to.x(),
            to_y = relocation.to.y(),
            outcome = relocation.outcome.kind();
            "Item relocated"
        );
    }
    if report.is_clean() {
        info!("No overlaps found, nothing to fix");
    } else if dry_run {
        info!(moves = report.relocations().len(); "Dry run, content files left unchanged");
    } else {
        info!(moves = report.relocations().len(); "Overlaps fixed");
    }
}
