use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

const SMALL_FIGURE: &str = r#"{ "figure": { "width_in": 4.0, "height_in": 3.0, "dpi": 50 } }"#;

fn write_arm(dir: &Path, name: &str, reversed: bool) -> anyhow::Result<()> {
    let mut rows: Vec<String> = (0..20)
        .map(|i| format!("{} {}", i * 1_000_000, 5_000_000 + i * 900_000))
        .collect();
    rows.push("9e8 1".to_string());
    if reversed {
        rows.reverse();
    }
    std::fs::write(dir.join(name), rows.join("\n"))?;
    Ok(())
}

#[test]
fn command_render_with_tsv() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    write_arm(input.path(), "header_filt_chr1_PJL_6x", false)?;
    write_arm(input.path(), "header_filt_chr1_BEB_6x", true)?;
    let config = input.path().join("config.json");
    std::fs::write(&config, SMALL_FIGURE)?;

    let mut cmd = Command::cargo_bin("arm-overlay")?;
    cmd.arg("render")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--config")
        .arg(&config)
        .arg("--chrom")
        .arg("1")
        .arg("--tsv")
        .assert()
        .success();

    let png = output.path().join("chr1_quadraplot_50dpi.png");
    assert!(png.is_file());

    let tsv = std::fs::read_to_string(output.path().join("chr1_quadraplot_50dpi.tsv"))?;
    // header + 20 points per population, the far outlier dropped
    assert_eq!(tsv.lines().count(), 41);
    assert!(tsv.lines().skip(1).all(|l| l.contains("\t6x\t")));
    assert!(!tsv.contains("\t900000000.0\t"));

    Ok(())
}

#[test]
fn command_render_missing_inputs_still_writes_image() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    let config = input.path().join("config.json");
    std::fs::write(&config, SMALL_FIGURE)?;

    let mut cmd = Command::cargo_bin("arm-overlay")?;
    cmd.arg("render")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("-c")
        .arg(&config)
        .arg("--chrom")
        .arg("X")
        .assert()
        .success();

    assert!(output.path().join("chrX_quadraplot_50dpi.png").is_file());

    Ok(())
}

#[test]
fn command_render_bad_config() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let config = input.path().join("config.json");
    std::fs::write(&config, r#"{ "clustering": { "eps": -1.0 } }"#)?;

    let mut cmd = Command::cargo_bin("arm-overlay")?;
    cmd.arg("render")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(input.path().join("out"))
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));

    Ok(())
}

#[test]
fn command_render_unwritable_output() -> anyhow::Result<()> {
    let input = tempfile::tempdir()?;
    let blocker = input.path().join("not_a_dir");
    std::fs::write(&blocker, "")?;

    let mut cmd = Command::cargo_bin("arm-overlay")?;
    cmd.arg("render")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(&blocker)
        .arg("--chrom")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot create output directory"));

    Ok(())
}

#[test]
#[cfg(target_os = "linux")]
fn command_render_read_only_output() -> anyhow::Result<()> {
    // /proc exists, so nothing needs creating, but no file can be made in it
    let input = tempfile::tempdir()?;
    write_arm(input.path(), "header_filt_chr1_PJL_6x", false)?;

    let mut cmd = Command::cargo_bin("arm-overlay")?;
    cmd.arg("render")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg("/proc")
        .arg("--chrom")
        .arg("1")
        .arg("--chrom")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write to output directory"));

    Ok(())
}
