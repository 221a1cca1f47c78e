use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::LoadError;

use super::model::{Point, PointSeries};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column coordinate file.
///
/// Layout: one hit per line, whitespace-delimited, `x` then `y`. Extra columns
/// are ignored. Lines that are blank, short, non-numeric or non-finite are
/// dropped rather than rejected.
pub fn load_series(path: &Path) -> Result<PointSeries, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = read_series(BufReader::new(file)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if series.is_empty() {
        return Err(LoadError::NoData(path.to_path_buf()));
    }
    Ok(series)
}

/// Parse coordinate pairs from any buffered reader.
pub fn read_series<R: BufRead>(reader: R) -> std::io::Result<PointSeries> {
    let mut points = Vec::new();
    for line in reader.lines() {
        if let Some(p) = parse_line(&line?) {
            points.push(p);
        }
    }
    Ok(PointSeries::new(points))
}

fn parse_line(line: &str) -> Option<Point> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

// ---------------------------------------------------------------------------
// Path templates
// ---------------------------------------------------------------------------

/// Substitute `{chrom}`, `{population}` and `{coverage}` in an input template.
pub fn input_path(dir: &Path, template: &str, chrom: &str, population: &str, coverage: &str) -> PathBuf {
    let name = template
        .replace("{chrom}", chrom)
        .replace("{population}", population)
        .replace("{coverage}", coverage);
    dir.join(name)
}
