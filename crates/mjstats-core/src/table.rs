//! 結果表の読み込み（CSV、gzip対応）

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{StatsError, StatsResult};
use crate::types::{DrawDetailRow, ResultRow};

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// `.gz` は透過的に展開する。存在しなければ [`StatsError::DataUnavailable`]
pub fn open_reader<P: AsRef<Path>>(path: P) -> StatsResult<Box<dyn BufRead>> {
    let p = path.as_ref();
    let f = match File::open(p) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StatsError::DataUnavailable { path: p.to_path_buf() });
        }
        Err(e) => return Err(e.into()),
    };
    let ext = p.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();

    if ext == "gz" {
        let dec = flate2::read::GzDecoder::new(f);
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, dec)));
    }
    Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, f)))
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> StatsResult<Vec<T>> {
    let reader = open_reader(path)?;
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        let row: T = record.map_err(|source| StatsError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// 結果表（`player_comparison_results.csv`）
pub fn load_results<P: AsRef<Path>>(path: P) -> StatsResult<Vec<ResultRow>> {
    let path = path.as_ref();
    let rows: Vec<ResultRow> = read_rows(path)?;
    log::debug!("loaded {} result rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// 複数の結果表を引数順に連結
pub fn load_results_many<P: AsRef<Path>>(paths: &[P]) -> StatsResult<Vec<ResultRow>> {
    let mut rows = Vec::new();
    for path in paths {
        rows.extend(load_results(path)?);
    }
    Ok(rows)
}

/// 引き分け詳細表（`pattern_overlap_details.csv`）
///
/// 進捗が 0-1 の比率で書かれていれば%に直す。
pub fn load_draw_details<P: AsRef<Path>>(path: P) -> StatsResult<Vec<DrawDetailRow>> {
    let path = path.as_ref();
    let mut rows: Vec<DrawDetailRow> = read_rows(path)?;
    if normalize_progress(&mut rows) {
        log::info!("progress values in {} look like fractions; scaled to percent", path.display());
    }
    log::debug!("loaded {} draw rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// すべて 1.0 以下なら比率とみなす。空は比率ではない
pub fn is_fraction_scale<I: IntoIterator<Item = f64>>(values: I) -> bool {
    let mut max: Option<f64> = None;
    for v in values {
        max = Some(max.map_or(v, |m| m.max(v)));
    }
    max.is_some_and(|m| m <= 1.0)
}

/// `player_progress` が比率なら進捗の2列をまとめて100倍する。
/// 判定は `player_progress` だけで行い、2列は同じ尺度に揃える
pub fn normalize_progress(rows: &mut [DrawDetailRow]) -> bool {
    if !is_fraction_scale(rows.iter().map(|r| r.player_progress)) {
        return false;
    }
    for row in rows.iter_mut() {
        row.player_progress *= 100.0;
        row.opponent_progress *= 100.0;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NervousnessConfig, OverlapCategory, Strategy};
    use std::io::Write;

    const RESULTS_HEADER: &str = "player1_type,player2_type,config_name,total_games,p1_wins,p2_wins,draws,decisive_games,p1_win_rate_decisive,p2_win_rate_decisive,draw_pct,draw_pattern_overlap_pct,reshuffle_pct,games_reshuffled,wins_after_reshuffle,draw_both_high_progress,draw_both_stuck,draw_similar_progress,draw_p1_stuck_p2_ahead,draw_p2_stuck_p1_ahead,draw_avg_p1_progress,draw_avg_p2_progress";

    fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_results("no/such/results.csv").unwrap_err();
        assert!(matches!(err, StatsError::DataUnavailable { .. }));
        assert!(err.to_string().contains("no/such/results.csv"));
    }

    #[test]
    fn loads_typed_result_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let body = format!(
            "{RESULTS_HEADER}\nbayesian,greedy,neither,100,12,8,80,20,60.0,40.0,80.0,95.5,92.0,92,10,3,40,20,30,7,55.5,48.25\n"
        );
        let path = write_file(tmp.path(), "results.csv", &body);
        let rows = load_results(&path).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.player1_type, Strategy::Bayesian);
        assert_eq!(row.player2_type, Strategy::Greedy);
        assert_eq!(row.config_name, NervousnessConfig::Neither);
        assert_eq!(row.decisive_games, 20);
        assert_eq!(row.draw_p2_stuck_p1_ahead, 7);
        assert_eq!(row.draw_avg_p2_progress, Some(48.25));
    }

    #[test]
    fn empty_average_progress_cells_load() {
        let tmp = tempfile::tempdir().unwrap();
        let body = format!(
            "{RESULTS_HEADER}\nbayesian,pure_random,neither,500,500,0,0,500,100.0,0.0,0.0,0.0,0.0,0,0,0,0,0,0,0,,\n\
             greedy,greedy,neither,10,1,1,8,2,50.0,50.0,80.0,90.0,90.0,9,1,0,6,4,1,1,NaN,51.0\n"
        );
        let path = write_file(tmp.path(), "results.csv", &body);
        let rows = load_results(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].draw_avg_p1_progress, None);
        assert_eq!(rows[0].draw_avg_p2_progress, None);
        assert!(rows[1].draw_avg_p1_progress.is_some_and(f64::is_nan));

        let p = crate::draws::DrawProfile::from_row(&rows[1]);
        assert_eq!(p.avg_p1_progress, 0.0);
        assert_eq!(p.avg_p2_progress, 51.0);
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_file(tmp.path(), "bad.csv", "player1_type,player2_type\nbayesian,greedy\n");
        let err = load_results(&path).unwrap_err();
        assert!(matches!(err, StatsError::Csv { .. }));
    }

    #[test]
    fn fraction_progress_is_scaled_to_percent() {
        let tmp = tempfile::tempdir().unwrap();
        let body = "p1_type,p2_type,player_progress,opponent_progress,overlap_pct,overlap_category,final_turn\n\
                    bayesian,bayesian,0.5,0.25,100.0,100% (Exact),80\n\
                    greedy,bayesian,1.0,0.7,40.0,25-49%,72\n";
        let path = write_file(tmp.path(), "details.csv", body);
        let rows = load_draw_details(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert!((rows[0].player_progress - 50.0).abs() < 1e-9);
        assert!((rows[0].opponent_progress - 25.0).abs() < 1e-9);
        assert!((rows[1].opponent_progress - 70.0).abs() < 1e-9);
        assert_eq!(rows[1].overlap_category, OverlapCategory::Partial);
    }

    #[test]
    fn percent_progress_is_left_alone() {
        assert!(!is_fraction_scale([0.5, 42.0, 100.0]));
        assert!(is_fraction_scale([0.0, 1.0]));
        assert!(!is_fraction_scale(std::iter::empty()));

        let tmp = tempfile::tempdir().unwrap();
        let body = "p1_type,p2_type,player_progress,opponent_progress,overlap_pct,overlap_category,final_turn\n\
                    bayesian,greedy,0.5,42.0,0.0,0-24%,60\n\
                    greedy,greedy,100.0,0.9,100.0,100% (Exact),90\n";
        let path = write_file(tmp.path(), "details.csv", body);
        let rows = load_draw_details(&path).unwrap();
        assert_eq!(rows[0].player_progress, 0.5);
        assert_eq!(rows[1].opponent_progress, 0.9);
    }

    #[test]
    fn gzip_tables_are_read_transparently() {
        use flate2::write::GzEncoder;
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), flate2::Compression::default());
        writeln!(enc, "{RESULTS_HEADER}").unwrap();
        writeln!(enc, "greedy,greedy,both,10,1,1,8,2,50.0,50.0,80.0,90.0,90.0,9,1,0,6,4,1,1,50.0,50.0").unwrap();
        enc.finish().unwrap();

        let rows = load_results_many(&[&path, &path]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].config_name, NervousnessConfig::Both);
    }
}
