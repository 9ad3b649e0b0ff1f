use std::{fs, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use serde_json::{Value, json};
use tempfile::TempDir;

use constellation::{
    Constellation, ConstellationError,
    config::{AppConfig, JitterConfig, PlacementConfig},
    content::ContentError,
    geometry::Point,
    placement::{Outcome, RelocationReason},
};

fn write_item(root: &Path, tag: &str, slug: &str, position: (i32, i32)) {
    let dir = root.join(tag).join(slug);
    fs::create_dir_all(&dir).unwrap();
    let content = json!({
        "title": slug,
        "thumbnailUrl": "thumbnail.jpg",
        "position": {"x": position.0, "y": position.1},
        "metadata": {"status": "completed"},
    });
    fs::write(
        dir.join("content.json"),
        serde_json::to_string_pretty(&content).unwrap(),
    )
    .unwrap();
}

fn read_position(root: &Path, tag: &str, slug: &str) -> Point {
    let path = root.join(tag).join(slug).join("content.json");
    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    Point::new(
        value["position"]["x"].as_f64().unwrap() as f32,
        value["position"]["y"].as_f64().unwrap() as f32,
    )
}

fn still_config(root: &Path) -> AppConfig {
    AppConfig::default()
        .with_placement(PlacementConfig::default().with_jitter(JitterConfig::disabled()))
        .with_content_root(root)
}

#[test]
fn test_regenerate_and_write_manifest() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for (i, slug) in ["one", "two", "three", "four"].iter().enumerate() {
        write_item(root, "digital", slug, (i as i32, 0));
    }
    write_item(root, "motion", "five", (0, 0));

    let constellation = Constellation::new(still_config(root));
    let store = constellation.load().unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let layout = constellation.regenerate(&store, &mut rng);

    // Store order: digital slugs sorted, then motion.
    let ids: Vec<&str> = layout.placements().iter().map(|p| p.id()).collect();
    assert_eq!(ids, ["four", "one", "three", "two", "five"]);
    assert_eq!(layout.position("four"), Some(Point::new(900.0, 0.0)));
    assert!(constellation.check(&store).overlaps().len() > 0);

    let output = root.join("generated").join("portfolio.json");
    let manifest = constellation
        .write_manifest(&store, &layout, &output)
        .unwrap();
    assert_eq!(manifest.len(), 5);

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["items"][0]["id"], "four");
    assert_eq!(written["items"][0]["position"], json!({"x": 900, "y": 0}));
    assert_eq!(
        written["items"][4]["thumbnailUrl"],
        "/content/motion/five/thumbnail.jpg"
    );
    assert!(written["canvasBounds"]["maxX"].as_f64().unwrap() >= 1092.0);

    // Regeneration does not touch content files.
    assert_eq!(read_position(root, "digital", "four"), Point::new(3.0, 0.0));
}

#[test]
fn test_repair_persists_moved_items_only() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_item(root, "digital", "anchor", (900, 0));
    write_item(root, "digital", "center", (0, 0));
    write_item(root, "motion", "twin-a", (2000, 2000));
    write_item(root, "motion", "twin-b", (2000, 2000));

    let constellation = Constellation::new(still_config(root));
    let mut store = constellation.load().unwrap();
    let before = constellation.check(&store);
    assert_eq!(before.overlaps().len(), 1);
    assert_eq!(before.zone_violations().len(), 1);

    let mut rng = StdRng::seed_from_u64(0);
    let report = constellation.repair(&mut store, &mut rng, true).unwrap();

    let reasons: Vec<(&str, RelocationReason)> = report
        .relocations()
        .iter()
        .map(|r| (r.id.as_str(), r.reason))
        .collect();
    assert_eq!(
        reasons,
        [
            ("twin-a", RelocationReason::Overlap),
            ("center", RelocationReason::ProtectedZone),
        ]
    );
    assert!(constellation.check(&store).is_valid());

    assert_eq!(read_position(root, "digital", "anchor"), Point::new(900.0, 0.0));
    assert_eq!(read_position(root, "motion", "twin-b"), Point::new(2000.0, 2000.0));
    assert_ne!(read_position(root, "motion", "twin-a"), Point::new(2000.0, 2000.0));
    assert_eq!(
        read_position(root, "digital", "center"),
        store.get("center").unwrap().position()
    );

    // Reloading from disk sees a valid set, so a second repair moves nothing.
    let mut reloaded = constellation.load().unwrap();
    let second = constellation.repair(&mut reloaded, &mut rng, true).unwrap();
    assert!(second.is_clean());
}

#[test]
fn test_repair_keeps_saving_after_a_failed_write() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_item(root, "digital", "gone", (0, 0));
    write_item(root, "motion", "kept", (0, 0));

    let constellation = Constellation::new(still_config(root));
    let mut store = constellation.load().unwrap();
    fs::remove_dir_all(root.join("digital").join("gone")).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let result = constellation.repair(&mut store, &mut rng, true);

    assert!(matches!(
        result,
        Err(ConstellationError::Content(ContentError::Io { .. }))
    ));
    let kept = store.get("kept").unwrap().position();
    assert_ne!(kept, Point::new(0.0, 0.0));
    assert_eq!(read_position(root, "motion", "kept"), kept);
    assert_ne!(store.get("gone").unwrap().position(), Point::new(0.0, 0.0));
}

#[test]
fn test_repair_dry_run_leaves_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_item(root, "digital", "center", (0, 0));

    let constellation = Constellation::new(still_config(root));
    let mut store = constellation.load().unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let report = constellation.repair(&mut store, &mut rng, false).unwrap();

    assert_eq!(report.relocations().len(), 1);
    assert!(matches!(report.relocations()[0].outcome, Outcome::Found { .. }));
    assert_eq!(store.get("center").unwrap().position(), Point::new(900.0, 0.0));
    assert_eq!(read_position(root, "digital", "center"), Point::new(0.0, 0.0));
}

#[test]
fn test_empty_content() {
    let temp = TempDir::new().unwrap();

    let constellation = Constellation::new(still_config(temp.path()));
    let mut store = constellation.load().unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let layout = constellation.regenerate(&store, &mut rng);
    assert!(layout.is_empty());
    assert_eq!(
        layout.canvas_bounds(),
        constellation.config().canvas().min_viewport()
    );

    let report = constellation.repair(&mut store, &mut rng, true).unwrap();
    assert!(report.is_clean());
    assert!(constellation.check(&store).is_valid());
}

#[test]
fn test_export_svg_preview() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_item(root, "brand", "logo", (0, 0));

    let constellation = Constellation::new(still_config(root));
    let store = constellation.load().unwrap();
    let layout = constellation.regenerate(&store, &mut StdRng::seed_from_u64(0));

    let path = root.join("layout.svg");
    constellation.export_svg(&layout, &path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("logo"));
    assert_eq!(svg, constellation.render_svg(&layout));
}
