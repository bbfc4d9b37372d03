use std::{io::Write, num::NonZeroUsize};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tempfile::NamedTempFile;
use weather_stats::{output::format, process_file, Error};

const STATIONS: &[&str] = &[
    "Abha", "Amman", "Bosaso", "Fort;Worth", "Kunming", "Petropavlovsk-Kamchatsky", "São Paulo",
    "Zurich", "İzmir",
];

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn chunks(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

async fn summary(content: &str, n: usize) -> String {
    let file = fixture(content);
    format(&process_file(file.path(), chunks(n)).await.unwrap())
}

fn measurements(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut content = String::new();
    for _ in 0..rows {
        let station = STATIONS[rng.gen_range(0..STATIONS.len())];
        let tenths: i32 = rng.gen_range(-999..=999);
        let sign = if tenths < 0 { "-" } else { "" };
        let tenths = tenths.abs();
        content.push_str(&format!("{station};{sign}{}.{}\n", tenths / 10, tenths % 10));
    }
    content
}

#[tokio::test]
async fn single_reading() {
    assert_eq!(summary("Kunming;19.8\n", 1).await, "{Kunming=19.8/19.8/19.8}\n");
}

#[tokio::test]
async fn negative_values_average() {
    assert_eq!(
        summary("Bosaso;20.0\nBosaso;-15.0\nBosaso;-1.0\n", 2).await,
        "{Bosaso=-15.0/1.3/20.0}\n"
    );
}

#[tokio::test]
async fn locations_sorted() {
    assert_eq!(
        summary("Zurich;10.0\nAmman;30.0\n", 3).await,
        "{Amman=30.0/30.0/30.0, Zurich=10.0/10.0/10.0}\n"
    );
}

#[tokio::test]
async fn empty_file() {
    assert_eq!(summary("", 4).await, "{}\n");
}

#[tokio::test]
async fn last_line_without_newline() {
    assert_eq!(
        summary("Amman;30.0\nAmman;10.0", 2).await,
        "{Amman=10.0/20.0/30.0}\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn chunk_count_does_not_change_output() {
    let content = measurements(2_000, 0x1b7c);
    let expected = summary(&content, 1).await;
    for n in [2, 3, 4, 7, 16, 61, 256] {
        assert_eq!(summary(&content, n).await, expected, "{n} chunks");
    }
}

#[tokio::test]
async fn delimiter_on_chunk_boundary() {
    // Two chunks over 25 bytes put the boundary on byte 12, the `;` of line two.
    let content = "Abha;1.0\nAmm;-2.0\nXy;3.5\n";
    assert_eq!(content.as_bytes()[12], b';');
    for n in 1..=content.len() {
        assert_eq!(
            summary(content, n).await,
            "{Abha=1.0/1.0/1.0, Amm=-2.0/-2.0/-2.0, Xy=3.5/3.5/3.5}\n",
            "{n} chunks"
        );
    }
}

#[tokio::test]
async fn missing_delimiter_aborts_every_split() {
    let mut content = measurements(300, 7);
    content.push_str("Nowhere 12.0\n");
    content.push_str(&measurements(300, 8));
    let file = fixture(&content);
    for n in [1, 2, 5, 13, 64] {
        let error = process_file(file.path(), chunks(n)).await.unwrap_err();
        assert!(matches!(error, Error::Parse { .. }), "{n} chunks: {error}");
    }
}
