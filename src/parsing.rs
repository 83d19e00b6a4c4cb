//! Parsing adapters for raw dataset files
//!
//! - Frame-rate table: CSV with a header row, `<filename>,<fps>[,<other fields>]`
//! - Temporal annotation text: `<filename> <start_seconds> <end_seconds>` per line.
//!   THUMOS labels put two spaces after the filename, MultiTHUMOS labels one;
//!   both are accepted.

use crate::annotation::{Annotation, FrameIndex};
use crate::error::{AnnotationError, Result};
use crate::store::AnnotationStore;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parse a frame-rate table, mapping filename to fps
///
/// The first line is a header and is always skipped. Only the first two
/// columns are read.
pub fn parse_video_fps(contents: &str) -> Result<HashMap<String, f64>> {
    let mut video_fps = HashMap::new();
    for (index, line) in contents.lines().enumerate().skip(1) {
        let line = line.trim_end_matches('\r');
        let line_number = index + 1;
        let mut fields = line.split(',');
        let filename = fields.next().unwrap_or_default();
        let fps_field = fields.next().ok_or_else(|| AnnotationError::MalformedLine {
            line: line_number,
            reason: format!("expected at least two columns, got {:?}", line),
        })?;
        let fps = parse_float(fps_field, line_number)?;
        video_fps.insert(filename.to_string(), fps);
    }
    Ok(video_fps)
}

/// Read and parse a frame-rate table file. See [`parse_video_fps`].
pub fn parse_video_fps_file(path: &Path) -> Result<HashMap<String, f64>> {
    let contents = fs::read_to_string(path).map_err(|e| AnnotationError::io(path, e))?;
    let video_fps = parse_video_fps(&contents)?;
    debug!(path = %path.display(), videos = video_fps.len(), "Parsed frame-rate table");
    Ok(video_fps)
}

/// Parse temporal annotation text for one category
///
/// Frame bounds are `floor(start_seconds * fps)` and `ceil(end_seconds * fps)`,
/// with fps looked up by filename in `video_fps`. An unknown filename is an
/// error. Fields are separated by one space, or two after the filename; a
/// line in any other shape, blank lines included, is an error.
pub fn parse_annotations(
    contents: &str,
    video_fps: &HashMap<String, f64>,
    category: &str,
) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let mut fields: Vec<&str> = line.trim().split(' ').collect();
        // THUMOS: two spaces after the filename
        if fields.len() > 1 && fields[1].is_empty() {
            fields.remove(1);
        }
        let (filename, start, end) = match fields.as_slice() {
            [filename, start, end] if !filename.is_empty() => (*filename, *start, *end),
            _ => {
                return Err(AnnotationError::MalformedLine {
                    line: line_number,
                    reason: format!("expected 3 fields, got {}", fields.len()),
                })
            }
        };

        let start_seconds = parse_float(start, line_number)?;
        let end_seconds = parse_float(end, line_number)?;
        let fps = *video_fps
            .get(filename)
            .ok_or_else(|| AnnotationError::UnknownFilename {
                filename: filename.to_string(),
                table: "frame-rate table",
            })?;

        annotations.push(Annotation {
            filename: filename.to_string(),
            start_frame: to_frame((start_seconds * fps).floor(), line_number)?,
            end_frame: to_frame((end_seconds * fps).ceil(), line_number)?,
            start_seconds,
            end_seconds,
            frames_per_second: fps,
            category: category.to_string(),
        });
    }
    Ok(annotations)
}

/// Read and parse one annotation text file. See [`parse_annotations`].
pub fn parse_annotation_file(
    path: &Path,
    video_fps: &HashMap<String, f64>,
    category: &str,
) -> Result<Vec<Annotation>> {
    let contents = fs::read_to_string(path).map_err(|e| AnnotationError::io(path, e))?;
    let annotations = parse_annotations(&contents, video_fps, category)?;
    debug!(
        path = %path.display(),
        category,
        annotations = annotations.len(),
        "Parsed annotation file"
    );
    Ok(annotations)
}

/// Build a store from one annotation text file per category
pub fn load_text_annotations(
    files: &[(String, PathBuf)],
    video_fps: &HashMap<String, f64>,
) -> Result<AnnotationStore> {
    let mut annotations = Vec::new();
    for (category, path) in files {
        annotations.extend(parse_annotation_file(path, video_fps, category)?);
    }
    let store = AnnotationStore::from_annotations(annotations);
    info!(
        categories = files.len(),
        files = store.len(),
        annotations = store.num_annotations(),
        "Loaded text annotations"
    );
    Ok(store)
}

/// Load a JSON object mapping filename to total frame count
pub fn load_frame_counts(path: &Path) -> Result<HashMap<String, usize>> {
    let file = fs::File::open(path).map_err(|e| AnnotationError::io(path, e))?;
    let frame_counts: HashMap<String, usize> =
        serde_json::from_reader(std::io::BufReader::new(file))?;
    debug!(path = %path.display(), videos = frame_counts.len(), "Loaded frame counts");
    Ok(frame_counts)
}

fn parse_float(field: &str, line: usize) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| AnnotationError::MalformedLine {
            line,
            reason: format!("invalid number {:?}: {}", field, e),
        })
}

fn to_frame(value: f64, line: usize) -> Result<FrameIndex> {
    if !value.is_finite() {
        return Err(AnnotationError::MalformedLine {
            line,
            reason: format!("frame index is not finite: {}", value),
        });
    }
    Ok(value as FrameIndex)
}
