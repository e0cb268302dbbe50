//! Filename-based quality inference and stream ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResolvedStream;

/// Video quality label, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "LD")]
    Ld,
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "FHD")]
    Fhd,
    #[serde(rename = "4K")]
    Uhd4k,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Uhd4k => "4K",
            Quality::Fhd => "FHD",
            Quality::Hd => "HD",
            Quality::Sd => "SD",
            Quality::Ld => "LD",
            Quality::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution markers, checked in this order.
const RESOLUTION_MARKERS: &[(&str, Quality)] = &[
    ("2160p", Quality::Uhd4k),
    ("1080p", Quality::Fhd),
    ("720p", Quality::Hd),
    ("480p", Quality::Sd),
    ("360p", Quality::Ld),
];

/// Infer quality from a filename.
///
/// Resolution markers win over the looser `4k`/`uhd` tags, so
/// "Movie.4K.1080p.mkv" is FHD.
pub fn classify_quality(filename: &str) -> Quality {
    let name = filename.to_lowercase();

    if let Some((_, quality)) = RESOLUTION_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
    {
        return *quality;
    }

    if name.contains("4k") || name.contains("uhd") {
        return Quality::Uhd4k;
    }

    Quality::Unknown
}

/// Sort best first: quality, then file size. Stable for equal pairs.
pub fn rank_streams(streams: &mut [ResolvedStream]) {
    streams.sort_by(|a, b| {
        b.quality
            .cmp(&a.quality)
            .then_with(|| b.filesize.cmp(&a.filesize))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(id: u32, quality: Quality, filesize: u64) -> ResolvedStream {
        ResolvedStream {
            id,
            filename: format!("file-{}.mkv", id),
            mime_type: "video/x-matroska".to_string(),
            filesize,
            link: format!("https://download.example/{}", id),
            host: "real-debrid.com".to_string(),
            quality,
        }
    }

    #[test]
    fn test_quality_order() {
        assert!(Quality::Uhd4k > Quality::Fhd);
        assert!(Quality::Fhd > Quality::Hd);
        assert!(Quality::Hd > Quality::Sd);
        assert!(Quality::Sd > Quality::Ld);
        assert!(Quality::Ld > Quality::Unknown);
    }

    #[test]
    fn test_quality_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Quality::Uhd4k).unwrap(), "\"4K\"");
        assert_eq!(serde_json::to_string(&Quality::Fhd).unwrap(), "\"FHD\"");
        assert_eq!(serde_json::to_string(&Quality::Unknown).unwrap(), "\"unknown\"");
        assert_eq!(Quality::Ld.to_string(), "LD");
    }

    #[test]
    fn test_classify_resolution_markers() {
        assert_eq!(classify_quality("Movie.2160p.HDR.mkv"), Quality::Uhd4k);
        assert_eq!(classify_quality("Movie.1080p.BluRay.mkv"), Quality::Fhd);
        assert_eq!(classify_quality("Movie.720p.WEB.mkv"), Quality::Hd);
        assert_eq!(classify_quality("Movie.480p.DVDRip.avi"), Quality::Sd);
        assert_eq!(classify_quality("Movie.360p.mp4"), Quality::Ld);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_quality("MOVIE.1080P.MKV"), Quality::Fhd);
        assert_eq!(classify_quality("movie.UHD.remux.mkv"), Quality::Uhd4k);
        assert_eq!(classify_quality("Movie.4K.mkv"), Quality::Uhd4k);
    }

    #[test]
    fn test_classify_marker_beats_loose_tag() {
        assert_eq!(classify_quality("Movie.4K.Upscale.1080p.mkv"), Quality::Fhd);
        assert_eq!(classify_quality("Movie.UHD.720p.mkv"), Quality::Hd);
    }

    #[test]
    fn test_classify_table_precedence() {
        // Both markers present: the earlier table entry wins.
        assert_eq!(classify_quality("Movie.720p.1080p.mkv"), Quality::Fhd);
        assert_eq!(classify_quality("Movie.360p.2160p.mkv"), Quality::Uhd4k);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify_quality("Movie.DVDRip.avi"), Quality::Unknown);
        assert_eq!(classify_quality(""), Quality::Unknown);
    }

    #[test]
    fn test_rank_quality_then_size() {
        let mut streams = vec![
            stream(1, Quality::Hd, 2_000),
            stream(2, Quality::Fhd, 1_000),
            stream(3, Quality::Fhd, 4_000),
            stream(4, Quality::Unknown, 9_000),
            stream(5, Quality::Uhd4k, 10),
        ];
        rank_streams(&mut streams);
        let ids: Vec<u32> = streams.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 3, 2, 1, 4]);
    }

    #[test]
    fn test_rank_is_stable_for_equal_pairs() {
        let mut streams = vec![
            stream(1, Quality::Hd, 500),
            stream(2, Quality::Hd, 500),
            stream(3, Quality::Hd, 500),
        ];
        rank_streams(&mut streams);
        let ids: Vec<u32> = streams.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
