use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::dataset::{self, Dataset};

/// Where the dataset of `operator_id` lives inside `dir`.
pub fn path_for<P: AsRef<Path>>(dir: P, operator_id: &str) -> PathBuf {
    dir.as_ref().join(format!("{operator_id}.json"))
}

/// Writes `dataset` as pretty JSON to `{dir}/{operator}.json`, creating
/// `dir` if needed. The file is written next to its destination and renamed
/// into place, so readers never see a partial artifact.
pub fn write<P: AsRef<Path>>(dataset: &Dataset, dir: P) -> Result<PathBuf, dataset::Error> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = path_for(dir, &dataset.system.id);
    let partial = path.with_extension("json.partial");
    let result = write_partial(dataset, &partial).and_then(|()| Ok(fs::rename(&partial, &path)?));
    if let Err(err) = result {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }

    let size = fs::metadata(&path)?.len();
    info!("Written {} ({:.2} KB)", path.display(), size as f64 / 1024.0);
    Ok(path)
}

fn write_partial(dataset: &Dataset, partial: &Path) -> Result<(), dataset::Error> {
    let mut writer = BufWriter::new(File::create(partial)?);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}

pub fn read<P: AsRef<Path>>(path: P) -> Result<Dataset, dataset::Error> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
