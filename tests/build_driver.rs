//! Build driver integration tests — tree mirroring, staleness and failure handling.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use compgen::codegen::{Generator, HandlebarsRenderer};
use compgen::driver::{BuildDriver, BuildOptions};
use compgen::Error;

const HEALTH: &str =
    r#"comp Health "Entity health" { F32 current "Current HP"; F32 max "Max HP"; }"#;
const TRANSFORM: &str = r#"
# The transform of a 3D entity.
comp Transform "The transform of a 3D entity" {
    Vec3 position "The position of the entity in the scene";
    Vec3 rotation "The XYZ Euler rotation of the entity";
    Vec3 scale "A scaling factor for the entity";
}
"#;

fn driver(force: bool) -> BuildDriver<HandlebarsRenderer> {
    let renderer = HandlebarsRenderer::new().expect("built-in template");
    BuildDriver::new(
        Generator::new(renderer),
        BuildOptions {
            force,
            ..BuildOptions::default()
        },
    )
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Input tree with two schemas, one nested, plus an unrelated file.
fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let indir = dir.path().join("in");
    write(&indir.join("Health.comp"), HEALTH);
    write(&indir.join("Scene").join("Transform.comp"), TRANSFORM);
    write(&indir.join("Scene").join("README.md"), "not a schema");
    fs::create_dir_all(indir.join("Empty").join("Nested")).unwrap();
    dir
}

/// Push every input an hour into the past so fresh outputs are strictly newer.
fn age_inputs(indir: &Path) {
    let past = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&indir.join("Health.comp"), past);
    set_mtime(&indir.join("Scene").join("Transform.comp"), past);
}

#[test]
fn first_run_generates_every_schema() {
    let dir = sample_tree();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));

    let report = driver(false).run(&indir, &outdir).unwrap();

    assert_eq!(
        report.generated,
        vec![
            outdir.join("Health.hh"),
            outdir.join("Scene").join("Transform.hh"),
        ]
    );
    assert!(report.up_to_date.is_empty());

    let header = fs::read_to_string(outdir.join("Scene").join("Transform.hh")).unwrap();
    assert!(header.contains("struct Transform"));
    assert!(header.contains("Vec3 position;"));
}

#[test]
fn directory_structure_is_mirrored_and_other_files_ignored() {
    let dir = sample_tree();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));

    driver(false).run(&indir, &outdir).unwrap();

    assert!(outdir.join("Empty").join("Nested").is_dir());
    assert!(outdir.join("Scene").is_dir());
    assert!(!outdir.join("Scene").join("README.md").exists());
    assert!(!outdir.join("Scene").join("README.hh").exists());
}

#[test]
fn second_run_is_a_no_op() {
    let dir = sample_tree();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    age_inputs(&indir);

    let first = driver(false).run(&indir, &outdir).unwrap();
    assert_eq!(first.generated.len(), 2);

    let second = driver(false).run(&indir, &outdir).unwrap();
    assert!(second.generated.is_empty());
    assert_eq!(second.up_to_date.len(), 2);
}

#[test]
fn touching_one_input_regenerates_only_its_output() {
    let dir = sample_tree();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    age_inputs(&indir);
    driver(false).run(&indir, &outdir).unwrap();

    let sibling = outdir.join("Health.hh");
    let sibling_mtime = fs::metadata(&sibling).unwrap().modified().unwrap();

    let transform = indir.join("Scene").join("Transform.comp");
    set_mtime(&transform, SystemTime::now() + Duration::from_secs(3600));

    let report = driver(false).run(&indir, &outdir).unwrap();
    assert_eq!(report.generated, vec![outdir.join("Scene").join("Transform.hh")]);
    assert_eq!(report.up_to_date, vec![sibling.clone()]);
    assert_eq!(fs::metadata(&sibling).unwrap().modified().unwrap(), sibling_mtime);
}

#[test]
fn force_regenerates_everything() {
    let dir = sample_tree();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    age_inputs(&indir);
    driver(false).run(&indir, &outdir).unwrap();

    let report = driver(true).run(&indir, &outdir).unwrap();
    assert_eq!(report.generated.len(), 2);
    assert!(report.up_to_date.is_empty());
}

#[test]
fn empty_schema_produces_valid_empty_header() {
    let dir = tempfile::tempdir().unwrap();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    write(&indir.join("Nothing.comp"), "# no comps yet\n");

    let report = driver(false).run(&indir, &outdir).unwrap();
    assert_eq!(report.generated, vec![outdir.join("Nothing.hh")]);

    let header = fs::read_to_string(outdir.join("Nothing.hh")).unwrap();
    assert!(header.contains("#pragma once"));
    assert!(!header.contains("struct"));
}

#[test]
fn invalid_input_dir_is_a_precondition_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let err = driver(false)
        .run(&missing, &dir.path().join("out"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInputDir(ref p) if *p == missing));
    assert!(!dir.path().join("out").exists());

    let file = dir.path().join("file.comp");
    write(&file, HEALTH);
    let err = driver(false).run(&file, &dir.path().join("out")).unwrap_err();
    assert!(matches!(err, Error::InvalidInputDir(_)));
}

#[test]
fn syntax_error_aborts_run_and_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    write(&indir.join("A.comp"), HEALTH);
    write(&indir.join("B.comp"), r#"comp health "x" { F32 hp "HP"; }"#);
    write(&indir.join("C.comp"), TRANSFORM);

    let err = driver(false).run(&indir, &outdir).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("B.comp"), "{message}");
    assert!(message.contains("expected comp name (PascalCase), found field name 'health'"));

    // Files are processed in name order: A before the failure, C never.
    assert!(outdir.join("A.hh").exists());
    assert!(!outdir.join("B.hh").exists());
    assert!(!outdir.join("C.hh").exists());
}

#[test]
fn custom_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let (indir, outdir) = (dir.path().join("in"), dir.path().join("out"));
    write(&indir.join("Health.schema"), HEALTH);
    write(&indir.join("Ignored.comp"), HEALTH);

    let driver = BuildDriver::new(
        Generator::new(HandlebarsRenderer::new().unwrap()),
        BuildOptions {
            input_ext: "schema".to_string(),
            output_ext: "h".to_string(),
            force: false,
        },
    );
    let report = driver.run(&indir, &outdir).unwrap();
    assert_eq!(report.generated, vec![outdir.join("Health.h")]);
    assert!(!outdir.join("Ignored.hh").exists());
}
