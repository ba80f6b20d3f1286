//! CSV dataset writers

use std::path::Path;

use crate::harvest::ArtworkRecord;
use crate::roster::ArtistEntry;
use crate::Result;

/// Artist dataset columns, matching the roster schema
const INFO_HEADER: [&str; 6] = ["artist", "period", "school", "url", "base", "nationality"];

/// Artwork dataset columns, led by the dense record identifier
const ARTWORK_HEADER: [&str; 6] = ["ID", "artist", "title", "picture data", "file info", "jpg url"];

/// Writes the artist dataset
pub fn write_info_dataset(path: &Path, artists: &[ArtistEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if artists.is_empty() {
        writer.write_record(INFO_HEADER)?;
    }
    for entry in artists {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the artwork dataset
pub fn write_artwork_dataset(path: &Path, records: &[ArtworkRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ARTWORK_HEADER)?;
    for record in records {
        writer.write_record([
            record.id.to_string().as_str(),
            record.artist.as_str(),
            record.title.as_str(),
            record.attribute("picture data"),
            record.attribute("file info"),
            record.image_url.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_artist() -> ArtistEntry {
        ArtistEntry {
            artist: "AACHEN, Hans von".to_string(),
            period: "Baroque".to_string(),
            school: "painter".to_string(),
            url: "https://example.com/bio/a/aachen.html".to_string(),
            base: "Prague".to_string(),
            nationality: "German".to_string(),
        }
    }

    fn sample_record(id: u64) -> ArtworkRecord {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            "picture data".to_string(),
            "oil on panel, 77 x 53 cm".to_string(),
        );
        attributes.insert("file info".to_string(), "1200x800, 245 kb".to_string());
        ArtworkRecord {
            id,
            artist: "LEONARDO da Vinci".to_string(),
            title: "mona lisa".to_string(),
            attributes,
            image_url: "https://example.com/art/l/leonardo/a1.jpg".to_string(),
        }
    }

    #[test]
    fn test_info_dataset_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info_dataset.csv");

        write_info_dataset(&path, &[sample_artist()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "artist,period,school,url,base,nationality"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"AACHEN, Hans von\",Baroque,painter,https://example.com/bio/a/aachen.html,Prague,German"
        );
    }

    #[test]
    fn test_info_dataset_empty_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info_dataset.csv");

        write_info_dataset(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "artist,period,school,url,base,nationality");
    }

    #[test]
    fn test_artwork_dataset_header_and_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artwork_dataset.csv");

        write_artwork_dataset(&path, &[sample_record(0), sample_record(1)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,artist,title,picture data,file info,jpg url"
        );
        assert!(lines.next().unwrap().starts_with("0,"));
        assert!(lines.next().unwrap().starts_with("1,"));
    }

    #[test]
    fn test_artwork_dataset_round_trips() {
        // Re-parsing the written dataset must reproduce the field values
        // exactly; no separator may leak across field boundaries.
        let dir = tempdir().unwrap();
        let path = dir.path().join("artwork_dataset.csv");
        let record = sample_record(7);

        write_artwork_dataset(&path, &[record.clone()]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(0).unwrap(), "7");
        assert_eq!(row.get(1).unwrap(), record.artist);
        assert_eq!(row.get(2).unwrap(), record.title);
        assert_eq!(row.get(3).unwrap(), record.attribute("picture data"));
        assert_eq!(row.get(4).unwrap(), record.attribute("file info"));
        assert_eq!(row.get(5).unwrap(), record.image_url);
    }

    #[test]
    fn test_missing_attribute_serializes_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artwork_dataset.csv");
        let mut record = sample_record(0);
        record.attributes.remove("file info");

        write_artwork_dataset(&path, &[record]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(4).unwrap(), "");
    }
}
