//! Re-encode a folder of region map files in the modern layout.
//!
//! ```text
//! convert <maps folder>
//! ```
//!
//! Every `.dat` and `.gz` file directly inside the folder is decoded (legacy
//! payloads included) and written, modern encoded, to `<maps folder>/converted`
//! under the same name. Gzipped inputs are written gzipped. A file that fails
//! to convert is logged and skipped. Set `RUST_LOG=info` for progress.

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use log::{info, warn};
use rayon::prelude::*;
use rscodec::terrain::{HeightSource, RegionPosition, TerrainCodec, TileFormat};
use std::{
    error, fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

fn is_map_file(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == "dat" || ext == "gz")
}

fn convert<H: HeightSource>(
    codec: &TerrainCodec<H>,
    path: &Path,
    output: &Path,
) -> Result<TileFormat, Box<dyn error::Error + Send + Sync>> {
    let raw = fs::read(path)?;
    let data = if is_gzip(path) {
        let mut data = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
        data
    } else {
        raw
    };

    let region = codec.decode(&data, RegionPosition::default())?;
    let encoded = region.block.encode()?;

    let out = if is_gzip(path) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded)?;
        encoder.finish()?
    } else {
        encoded
    };

    let name = path.file_name().ok_or("map file without a name")?;
    fs::write(output.join(name), out)?;
    Ok(region.format)
}

fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::init();

    let folder = std::env::args()
        .nth(1)
        .ok_or("usage: convert <maps folder>")?;
    let maps = Path::new(&folder);
    if !maps.is_dir() {
        return Err(format!("{} is not a directory", maps.display()).into());
    }

    let output = maps.join("converted");
    fs::create_dir_all(&output)?;

    let files: Vec<PathBuf> = fs::read_dir(maps)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_map_file(path))
        .collect();

    let codec = TerrainCodec::default();
    let formats = files
        .par_iter()
        .filter_map(|path| match convert(&codec, path, &output) {
            Ok(format) => {
                info!("converted {} ({:?})", path.display(), format);
                Some(format)
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect::<Vec<_>>();

    let upgraded = formats.iter().filter(|&&f| f == TileFormat::Legacy).count();
    println!(
        "converted {} of {} map files ({} upgraded from the legacy layout)",
        formats.len(),
        files.len(),
        upgraded
    );

    Ok(())
}
