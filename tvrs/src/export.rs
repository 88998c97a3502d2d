use crate::error::Result;
use crate::stats::RankedEntry;
use log::info;
use std::io::Write;
use std::path::Path;

/// Write `entries` as a `name,rating` table with a header row.
pub fn write_ranking<W: Write>(writer: W, entries: &[RankedEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["name", "rating"])?;
    for entry in entries {
        wtr.write_record([entry.name.as_str(), format!("{:?}", entry.rating).as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replace the file at `path` with the ranking table.
pub fn write_ranking_file(path: &Path, entries: &[RankedEntry]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_ranking(file, entries)?;
    info!("wrote {} rows to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, rating: f64) -> RankedEntry {
        RankedEntry {
            name: name.to_string(),
            rating,
        }
    }

    #[test]
    fn table_with_header() {
        let mut out = Vec::new();
        let entries = [entry("Breaking Bad", 9.2), entry("Lost, Again", 8.0)];
        write_ranking(&mut out, &entries).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,rating\nBreaking Bad,9.2\n\"Lost, Again\",8.0\n"
        );
    }

    #[test]
    fn empty_table_keeps_header() {
        let mut out = Vec::new();
        write_ranking(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,rating\n");
    }

    #[test]
    fn file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sorted.csv");
        std::fs::write(&path, "stale content that is longer than the new table\n").unwrap();

        write_ranking_file(&path, &[entry("A", 7.5)]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "name,rating\nA,7.5\n"
        );
    }
}
