//! 出力先と結果ディレクトリのユーティリティ

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 結果ディレクトリ名の接頭辞（`comparison_results_<timestamp>`）
pub const RESULTS_DIR_PREFIX: &str = "comparison_results_";

/// ファイルまたは標準出力への書き込み。`close()` で flush エラーを返す
#[must_use = "call .close() to propagate IO errors"]
pub enum Writer {
    Plain(BufWriter<File>),
    Stdout(io::Stdout),
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Writer::Plain(f) => f.write(buf),
            Writer::Stdout(s) => s.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => f.flush(),
            Writer::Stdout(s) => s.flush(),
        }
    }
}

impl Writer {
    pub fn close(self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => {
                let mut file = f.into_inner().map_err(|e| e.into_error())?;
                file.flush()
            }
            Writer::Stdout(mut s) => s.flush(),
        }
    }
}

/// `-` は標準出力
pub fn open_writer<P: AsRef<Path>>(path: P) -> io::Result<Writer> {
    let p = path.as_ref();
    if p.to_string_lossy() == "-" {
        return Ok(Writer::Stdout(io::stdout()));
    }
    Ok(Writer::Plain(BufWriter::new(File::create(p)?)))
}

/// テキストを書き出して閉じる
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> io::Result<()> {
    let mut w = open_writer(path)?;
    w.write_all(text.as_bytes())?;
    w.close()
}

/// 無ければ作る（親も含む）
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// `root` 直下の `comparison_results_*` のうち名前が最後のもの。
/// タイムスタンプ付きの名前なので辞書順の最後が最新
pub fn latest_results_dir(root: &Path) -> Option<PathBuf> {
    let pattern = root.join(format!("{RESULTS_DIR_PREFIX}*"));
    let mut dirs: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .ok()?
        .filter_map(Result::ok)
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_dir_is_the_last_timestamp() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["comparison_results_20250101_120000", "comparison_results_20250301_090000", "other"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        // 同名のファイルは無視
        File::create(tmp.path().join("comparison_results_20991231_000000")).unwrap();
        let latest = latest_results_dir(tmp.path()).unwrap();
        assert!(latest.ends_with("comparison_results_20250301_090000"));
    }

    #[test]
    fn no_results_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(latest_results_dir(tmp.path()).is_none());
    }

    #[test]
    fn write_text_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("out.txt");
        ensure_dir(path.parent().unwrap()).unwrap();
        write_text(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
